//! Health check endpoint for the connector.

use query_engine_execution::error::RequestError;
use query_engine_execution::query;

use crate::models::TestDataSourceResponse;
use crate::state::State;

pub const SUCCESS_MESSAGE: &str = "Success";
pub const DEFAULT_ERROR_MESSAGE: &str = "Cannot connect to API";

/// Check that the graph API can be reached.
///
/// Only a 200 counts as healthy. Failures are reported in the response, never returned.
pub async fn health_check(state: &State) -> TestDataSourceResponse {
    let response = match query::fetch_health(&state.backend, &state.metrics).await {
        Ok(response) if response.is_ok() => TestDataSourceResponse::success(SUCCESS_MESSAGE),
        Ok(response) => TestDataSourceResponse::error(
            response.status_text().unwrap_or(DEFAULT_ERROR_MESSAGE),
        ),
        Err(error) => {
            tracing::warn!(error = %error, status = ?error.status(), "health check failed");
            TestDataSourceResponse::error(error_message(&error))
        }
    };

    state.metrics.record_health_check(response.is_success());
    response
}

/// The message shown to the user for a failed health check.
pub fn error_message(error: &RequestError) -> String {
    match error {
        RequestError::Structured {
            status_text,
            code,
            message,
            ..
        } => format!(
            "{}: {code}. {message}",
            status_text.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE)
        ),
        RequestError::HttpStatus { status_text, .. } => status_text
            .clone()
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
        RequestError::Unknown(message) => message.clone(),
        RequestError::Transport(_) | RequestError::Decode { .. } => {
            DEFAULT_ERROR_MESSAGE.to_string()
        }
    }
}
