//! Query execution against the graph API.

pub mod backend;
pub mod error;
pub mod metrics;
pub mod query;
