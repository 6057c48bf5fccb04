//! A stand-in for the graph API, listening on an ephemeral local port.
//!
//! Every endpoint answers with a canned response, and every request is recorded so tests can
//! check which endpoints were called and with which query string.

use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::task::JoinHandle;

/// The route prefix used by the static test configuration.
pub const ROUTE_PATH: &str = "/nodegraphds";

pub const FIELDS_ENDPOINT: &str = "/api/graph/fields";
pub const DATA_ENDPOINT: &str = "/api/graph/data";
pub const HEALTH_ENDPOINT: &str = "/api/health";

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::text(status, body.to_string())
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        MockResponse {
            status: StatusCode::from_u16(status).expect("invalid status code"),
            body: body.into(),
        }
    }

    pub fn ok() -> Self {
        Self::text(200, "")
    }
}

/// A request received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// The path without the route prefix.
    pub endpoint: String,
    /// The raw query string, if there was one.
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MockGraphApi {
    responses: HashMap<String, MockResponse>,
}

impl MockGraphApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(self, body: &serde_json::Value) -> Self {
        self.with_response(FIELDS_ENDPOINT, MockResponse::json(200, body))
    }

    pub fn with_data(self, body: &serde_json::Value) -> Self {
        self.with_response(DATA_ENDPOINT, MockResponse::json(200, body))
    }

    pub fn with_health(self, response: MockResponse) -> Self {
        self.with_response(HEALTH_ENDPOINT, response)
    }

    pub fn with_response(mut self, endpoint: &str, response: MockResponse) -> Self {
        self.responses.insert(endpoint.to_string(), response);
        self
    }

    /// Answer `endpoint` differently when it is called with exactly this query string.
    pub fn with_query_response(
        mut self,
        endpoint: &str,
        query: &str,
        response: MockResponse,
    ) -> Self {
        self.responses.insert(format!("{endpoint}?{query}"), response);
        self
    }

    /// Start serving. Must be called from within a Tokio runtime.
    pub fn spawn(self) -> RunningMockGraphApi {
        let listener = TcpListener::bind("127.0.0.1:0").expect("unable to bind mock graph API");
        let address = listener.local_addr().expect("mock graph API has no address");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            responses: Arc::new(self.responses),
            requests: Arc::clone(&requests),
        };
        let router = Router::new().fallback(respond).with_state(state);

        let server = axum::Server::from_tcp(listener)
            .expect("unable to serve mock graph API")
            .serve(router.into_make_service());
        let handle = tokio::spawn(async move {
            if let Err(error) = server.await {
                tracing::error!(%error, "mock graph API stopped");
            }
        });

        RunningMockGraphApi {
            address,
            requests,
            handle,
        }
    }
}

#[derive(Clone)]
struct MockState {
    responses: Arc<HashMap<String, MockResponse>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn respond(State(state): State<MockState>, uri: Uri) -> Response {
    let endpoint = uri
        .path()
        .strip_prefix(ROUTE_PATH)
        .unwrap_or(uri.path())
        .to_string();

    let query = uri.query().map(ToString::to_string);
    state.requests.lock().unwrap().push(RecordedRequest {
        endpoint: endpoint.clone(),
        query: query.clone(),
    });

    let response = query
        .and_then(|query| state.responses.get(&format!("{endpoint}?{query}")))
        .or_else(|| state.responses.get(&endpoint));

    match response {
        Some(response) => (
            response.status,
            [(header::CONTENT_TYPE, "application/json")],
            response.body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A running mock. The server stops when this is dropped.
pub struct RunningMockGraphApi {
    address: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl RunningMockGraphApi {
    /// The base URL, without the route prefix.
    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.endpoint == endpoint)
            .collect()
    }
}

impl Drop for RunningMockGraphApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A URL on which nothing is listening.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("unable to bind");
    let address = listener.local_addr().expect("listener has no address");
    drop(listener);
    format!("http://{address}")
}
