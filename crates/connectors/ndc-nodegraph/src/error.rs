//! Errors returned by the data source.

use nodegraph_configuration::error::{MakeRuntimeConfigurationError, ParseConfigurationError};
use query_engine_execution::error::RequestError;

use crate::state::InitializationError;

/// A query that could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("query target task failed: {0}")]
    TaskFailed(String),
}

/// Failure to get the data source ready to serve.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    ParseConfiguration(#[from] ParseConfigurationError),
    #[error("invalid configuration: {0}")]
    MakeRuntimeConfiguration(#[from] MakeRuntimeConfigurationError),
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}
