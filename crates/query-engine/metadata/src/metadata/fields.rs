//! Field descriptors, as served by the fields endpoint of the graph API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The kind of values a field holds.
///
/// The API only distinguishes numbers from everything else: any `type` other than
/// `"number"`, including a missing one, is a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    #[default]
    String,
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("number") => FieldKind::Number,
            _ => FieldKind::String,
        })
    }
}

/// Description of one column of the nodes or edges frame.
///
/// Names follow the node graph conventions (`id`, `title`, `arc__*`, `detail__*`, ...), which
/// are not checked here. The optional metadata is kept whenever its key is present, whatever
/// the value, `null` included.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldDescriptor {
    pub field_name: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    /// Fixed color, used by the `arc__*` fields of the nodes.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Value>,
    #[serde(
        rename = "displayName",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<Value>,
    /// Data links, passed on untouched.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub links: Option<Value>,
}

impl FieldDescriptor {
    pub fn new(field_name: impl Into<String>, kind: FieldKind) -> Self {
        FieldDescriptor {
            field_name: field_name.into(),
            kind,
            color: None,
            display_name: None,
            links: None,
        }
    }
}

/// Deserialize a key that is present, so that an explicit `null` becomes `Some(Value::Null)`.
/// Used together with `#[serde(default)]`, which covers the absent key.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Body of the fields endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphFields {
    pub nodes_fields: Vec<FieldDescriptor>,
    pub edges_fields: Vec<FieldDescriptor>,
}
