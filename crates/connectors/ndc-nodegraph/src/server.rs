//! An HTTP surface for a data source: `POST /query`, `GET /health` and `GET /metrics`.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Serialize;

use crate::connector::{DataSource, DataSourceSetup};
use crate::error::{QueryError, SetupError};
use crate::models::{QueryRequest, QueryResponse, TestDataSourceResponse};

/// Everything a request handler needs.
pub struct ServerState<C: DataSource> {
    configuration: Arc<C::Configuration>,
    state: Arc<C::State>,
    metrics: Registry,
}

impl<C: DataSource> Clone for ServerState<C> {
    fn clone(&self) -> Self {
        ServerState {
            configuration: Arc::clone(&self.configuration),
            state: Arc::clone(&self.state),
            metrics: self.metrics.clone(),
        }
    }
}

impl<C: DataSource> ServerState<C> {
    pub fn configuration(&self) -> &C::Configuration {
        &self.configuration
    }

    pub fn state(&self) -> &C::State {
        &self.state
    }

    pub fn metrics(&self) -> &Registry {
        &self.metrics
    }
}

/// Read the configuration directory and set up the data source.
pub async fn init_server_state<Setup: DataSourceSetup>(
    setup: Setup,
    configuration_dir: impl AsRef<Path> + Send,
) -> Result<ServerState<Setup::DataSource>, SetupError> {
    let mut metrics = Registry::new();
    let configuration = setup.parse_configuration(configuration_dir).await?;
    let state = setup.try_init_state(&configuration, &mut metrics).await?;

    Ok(ServerState {
        configuration: Arc::new(configuration),
        state: Arc::new(state),
        metrics,
    })
}

pub fn create_router<C>(state: ServerState<C>) -> Router
where
    C: DataSource + Send + Sync + 'static,
{
    Router::new()
        .route("/query", post(post_query::<C>))
        .route("/health", get(get_health::<C>))
        .route("/metrics", get(get_metrics::<C>))
        .with_state(state)
}

async fn post_query<C>(
    State(state): State<ServerState<C>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ServerError>
where
    C: DataSource + Send + Sync + 'static,
{
    let response = C::query(state.configuration(), state.state(), request).await?;
    Ok(Json(response))
}

/// The outcome of the connection test is always in the body; the route itself succeeds.
async fn get_health<C>(State(state): State<ServerState<C>>) -> Json<TestDataSourceResponse>
where
    C: DataSource + Send + Sync + 'static,
{
    Json(C::test_datasource(state.configuration(), state.state()).await)
}

async fn get_metrics<C>(State(state): State<ServerState<C>>) -> Result<String, ServerError>
where
    C: DataSource + Send + Sync + 'static,
{
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&state.metrics().gather(), &mut buffer)
        .map_err(|err| ServerError::Internal(err.to_string()))?;
    String::from_utf8(buffer).map_err(|err| ServerError::Internal(err.to_string()))
}

pub enum ServerError {
    Internal(String),
    Backend(String),
}

#[derive(Serialize)]
struct JsonErrorResponse {
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            ServerError::Backend(message) => (StatusCode::BAD_GATEWAY, message),
        };

        tracing::info!(%status, error = %message, "returning error");
        (status, Json(JsonErrorResponse { message })).into_response()
    }
}

impl From<QueryError> for ServerError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::Request(_) => ServerError::Backend(value.to_string()),
            QueryError::TaskFailed(_) => ServerError::Internal(value.to_string()),
        }
    }
}
