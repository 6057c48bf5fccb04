//! HTTP access to the graph API.
//!
//! Every call is a `GET` on `{base_url}{endpoint}`, optionally followed by `?` and the raw query
//! text. The base URL already contains the proxy route prefix, when there is one.

use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{info_span, Instrument};

use crate::error::RequestError;

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl BackendResponse {
    /// Exactly 200, not merely successful.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn status_text(&self) -> Option<&'static str> {
        self.status.canonical_reason()
    }
}

/// Client for the graph API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(BackendClient {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The full URL of an endpoint. The query text is appended as is.
    pub fn endpoint_url(&self, endpoint: &str, params: &str) -> String {
        if params.is_empty() {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}{endpoint}?{params}", self.base_url)
        }
    }

    /// Issue a `GET`, turning any non-2xx status into an error.
    pub async fn get(&self, endpoint: &str, params: &str) -> Result<BackendResponse, RequestError> {
        let url = self.endpoint_url(endpoint, params);

        async {
            let response = self
                .client
                .get(url.as_str())
                .send()
                .await
                .map_err(RequestError::from_client)?;

            let status = response.status();
            let body = response.bytes().await.map_err(RequestError::from_client)?;

            if status.is_success() {
                Ok(BackendResponse { status, body })
            } else {
                tracing::debug!(%status, "graph API returned an error status");
                Err(RequestError::from_response(status, &body))
            }
        }
        .instrument(info_span!("Backend request", endpoint, url = %url))
        .await
    }

    /// Issue a `GET` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &str,
    ) -> Result<T, RequestError> {
        let response = self.get(endpoint, params).await?;

        serde_json::from_slice(&response.body).map_err(|source| RequestError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}
