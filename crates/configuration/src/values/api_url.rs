use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Secret;

/// Base URL of the graph API, or of the proxy placed in front of it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ApiUrl(pub Secret);

impl From<String> for ApiUrl {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ApiUrl {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}
