//! Transient state used by the connector.
//!
//! This is initialized on startup.

use thiserror::Error;
use tracing::{info_span, Instrument};

use nodegraph_configuration::Configuration;
use query_engine_execution::backend::BackendClient;
use query_engine_execution::metrics;

/// State for our connector.
#[derive(Debug, Clone)]
pub struct State {
    pub metrics: metrics::Metrics,
    pub backend: BackendClient,
}

/// Create the graph API client and wrap it inside a connector State.
pub async fn create_state(
    configuration: &Configuration,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let metrics = async {
        let metrics_inner = metrics::Metrics::initialize(metrics_registry)
            .map_err(InitializationError::MetricsError)?;
        Ok::<_, InitializationError>(metrics_inner)
    }
    .instrument(info_span!("Setup metrics"))
    .await?;

    let backend = BackendClient::new(configuration.base_url(), configuration.request_timeout)
        .map_err(InitializationError::UnableToCreateClient)?;

    tracing::info!(base_url = backend.base_url(), "graph API client ready");

    Ok(State { metrics, backend })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize HTTP client: {0}")]
    UnableToCreateClient(reqwest::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}

