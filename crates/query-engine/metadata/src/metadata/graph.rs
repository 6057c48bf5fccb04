//! Graph records, as served by the data endpoint of the graph API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the data endpoint. Each record is kept verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphData {
    pub nodes: Vec<Value>,
    pub edges: Vec<Value>,
}
