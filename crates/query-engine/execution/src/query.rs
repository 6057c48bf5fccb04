//! Fetch graph fields, graph data and health from the graph API.

use query_engine_metadata::metadata::{GraphData, GraphFields};

use crate::backend::{BackendClient, BackendResponse};
use crate::error::RequestError;
use crate::metrics::Metrics;

pub const FIELDS_ENDPOINT: &str = "/api/graph/fields";
pub const DATA_ENDPOINT: &str = "/api/graph/data";
pub const HEALTH_ENDPOINT: &str = "/api/health";

/// The responses of the fields and data endpoints for one resolved query.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphResponse {
    pub fields: GraphFields,
    pub data: GraphData,
}

/// Fetch the field descriptors and the records for a query. Both requests are sent together
/// and both run to completion. A failure of either fails the fetch, the fields endpoint first.
pub async fn fetch_graph(
    client: &BackendClient,
    metrics: &Metrics,
    query: &str,
) -> Result<GraphResponse, RequestError> {
    let (fields, data) = tokio::join!(
        record(metrics, client.get_json::<GraphFields>(FIELDS_ENDPOINT, query)),
        record(metrics, client.get_json::<GraphData>(DATA_ENDPOINT, query)),
    );

    Ok(GraphResponse {
        fields: fields?,
        data: data?,
    })
}

/// Call the health endpoint.
pub async fn fetch_health(
    client: &BackendClient,
    metrics: &Metrics,
) -> Result<BackendResponse, RequestError> {
    record(metrics, client.get(HEALTH_ENDPOINT, "")).await
}

async fn record<T>(
    metrics: &Metrics,
    request: impl std::future::Future<Output = Result<T, RequestError>>,
) -> Result<T, RequestError> {
    let result = request.await;
    metrics.record_backend_request(result.is_ok());
    result
}
