//! Data frames in the shape the node graph panel consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::present;

pub const NODES_FRAME_NAME: &str = "Nodes";
pub const EDGES_FRAME_NAME: &str = "Edges";

static NULL: Value = Value::Null;

/// The type of a field of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Fixed,
}

/// The color value is passed on as received, so it need not be a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldColor {
    pub mode: ColorMode,
    pub fixed_color: Value,
}

impl FieldColor {
    pub fn fixed(color: impl Into<Value>) -> Self {
        FieldColor {
            mode: ColorMode::Fixed,
            fixed_color: color.into(),
        }
    }
}

/// Display configuration of a field. Unset entries are left out of the serialized form, while
/// an entry set to `null` is written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldColor>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub links: Option<Value>,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub config: FieldConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferredVisualisationType {
    NodeGraph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMeta {
    pub preferred_visualisation_type: PreferredVisualisationType,
}

/// A table of rows described by an ordered list of fields.
///
/// Rows are kept exactly as received. Their keys are expected to match the field names, but
/// this is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFrame {
    pub name: String,
    pub ref_id: String,
    pub fields: Vec<Field>,
    pub rows: Vec<Value>,
    pub meta: FrameMeta,
}

impl DataFrame {
    /// An empty frame meant for the node graph panel.
    pub fn node_graph(
        name: impl Into<String>,
        ref_id: impl Into<String>,
        fields: Vec<Field>,
    ) -> Self {
        DataFrame {
            name: name.into(),
            ref_id: ref_id.into(),
            fields,
            rows: Vec::new(),
            meta: FrameMeta {
                preferred_visualisation_type: PreferredVisualisationType::NodeGraph,
            },
        }
    }

    pub fn add(&mut self, row: Value) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The values of one column, one per row. Rows without the column yield `null`.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(name).unwrap_or(&NULL))
    }
}
