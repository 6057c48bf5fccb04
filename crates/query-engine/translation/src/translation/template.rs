//! Substitute dashboard variables into the query text.
//!
//! Recognised forms are `$name`, `${name}`, `${name:format}` and `[[name]]`. Variables that are
//! not in scope are left as written.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value;

static VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(\w+)|\[\[(\w+?)(?::(\w+))?\]\]|\$\{(\w+)(?::([^}]+))?\}")
        .expect("variable pattern is valid")
});

/// The current value of one dashboard variable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScopedVar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default)]
    pub value: Value,
}

impl ScopedVar {
    pub fn new(value: impl Into<Value>) -> Self {
        ScopedVar {
            text: None,
            value: value.into(),
        }
    }
}

pub type ScopedVars = BTreeMap<String, ScopedVar>;

/// Replace every in-scope variable of `query` by its formatted value.
pub fn interpolate(query: &str, scoped_vars: &ScopedVars) -> String {
    if scoped_vars.is_empty() {
        return query.to_string();
    }

    VARIABLE
        .replace_all(query, |captures: &Captures| {
            let name = captures
                .get(1)
                .or_else(|| captures.get(2))
                .or_else(|| captures.get(4))
                .map_or("", |name| name.as_str());
            let format = captures
                .get(3)
                .or_else(|| captures.get(5))
                .map(|format| format.as_str());

            match scoped_vars.get(name) {
                Some(variable) => format_value(&variable.value, format),
                None => captures[0].to_string(),
            }
        })
        .into_owned()
}

fn format_value(value: &Value, format: Option<&str>) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => match format {
            Some("json") => value.to_string(),
            _ => text.clone(),
        },
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => value.to_string(),
        Value::Array(values) => {
            if format == Some("json") {
                return value.to_string();
            }
            let mut parts: Vec<String> = values
                .iter()
                .map(|value| format_value(value, None))
                .collect();
            match format {
                Some("csv" | "raw") => parts.join(","),
                Some("pipe") => parts.join("|"),
                _ if parts.len() == 1 => parts.remove(0),
                _ => format!("{{{}}}", parts.join(",")),
            }
        }
    }
}
