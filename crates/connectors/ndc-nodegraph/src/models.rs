//! Requests and responses exchanged with the dashboard.

use serde::{Deserialize, Serialize};

use query_engine_metadata::metadata::DataFrame;
use query_engine_translation::translation::template::ScopedVars;

pub const DEFAULT_REF_ID: &str = "A";

fn default_ref_id() -> String {
    DEFAULT_REF_ID.to_string()
}

/// One query of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    #[serde(default = "default_ref_id")]
    pub ref_id: String,
    /// Query string for the graph API. May contain dashboard variables.
    #[serde(default)]
    pub query_text: String,
}

impl Default for QueryTarget {
    fn default() -> Self {
        QueryTarget {
            ref_id: default_ref_id(),
            query_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub targets: Vec<QueryTarget>,
    #[serde(default)]
    pub scoped_vars: ScopedVars,
}

/// The frames of the first target of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub data: Vec<DataFrame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Success,
    Error,
}

/// Outcome of a connection test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDataSourceResponse {
    pub status: TestStatus,
    pub message: String,
}

impl TestDataSourceResponse {
    pub fn success(message: impl Into<String>) -> Self {
        TestDataSourceResponse {
            status: TestStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        TestDataSourceResponse {
            status: TestStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TestStatus::Success
    }
}
