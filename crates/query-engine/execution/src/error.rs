//! Errors for calls to the graph API.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// The ways a call to the graph API can fail.
///
/// The kind is decided where the call is made, so callers can react to it without inspecting
/// the underlying transport error.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The request never produced a response: connection refused, DNS failure, timeout.
    #[error("unable to reach the graph API: {0}")]
    Transport(#[source] reqwest::Error),
    /// A non-2xx response without a structured error body.
    #[error("graph API responded with {status}")]
    HttpStatus {
        status: StatusCode,
        status_text: Option<String>,
    },
    /// A non-2xx response with an `{"error": {"code", "message"}}` body.
    #[error("graph API responded with {status}: {code}. {message}")]
    Structured {
        status: StatusCode,
        status_text: Option<String>,
        code: String,
        message: String,
    },
    /// A successful response whose body does not have the expected shape.
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// A failure only known by its description.
    #[error("{0}")]
    Unknown(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    message: Value,
}

impl RequestError {
    /// Classify an error returned by the HTTP client.
    pub fn from_client(error: reqwest::Error) -> Self {
        if error.is_builder() {
            RequestError::Unknown(error.to_string())
        } else {
            RequestError::Transport(error)
        }
    }

    /// Classify a non-2xx response from its status and body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let status_text = status.canonical_reason().map(ToString::to_string);

        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .filter(|detail| is_set(&detail.code) && is_set(&detail.message));

        match detail {
            Some(ErrorDetail { code, message }) => RequestError::Structured {
                status,
                status_text,
                code: display(code),
                message: display(message),
            },
            None => RequestError::HttpStatus {
                status,
                status_text,
            },
        }
    }

    /// The HTTP reason phrase of the failed response, if there was one.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            RequestError::HttpStatus { status_text, .. }
            | RequestError::Structured { status_text, .. } => status_text.as_deref(),
            RequestError::Transport(_)
            | RequestError::Decode { .. }
            | RequestError::Unknown(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::HttpStatus { status, .. } | RequestError::Structured { status, .. } => {
                Some(*status)
            }
            RequestError::Transport(error) => error.status(),
            RequestError::Decode { .. } | RequestError::Unknown(_) => None,
        }
    }
}

/// Whether a JSON value counts as present: empty strings, zero, `false` and `null` do not.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_is_recognised() {
        let error = RequestError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"error": {"code": 500, "message": "Internal error"}}"#,
        );

        match error {
            RequestError::Structured {
                status_text,
                code,
                message,
                ..
            } => {
                assert_eq!(status_text.as_deref(), Some("Internal Server Error"));
                assert_eq!(code, "500");
                assert_eq!(message, "Internal error");
            }
            other => panic!("expected a structured error, got {other:?}"),
        }
    }

    #[test]
    fn string_codes_are_kept_as_written() {
        let error = RequestError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"error": {"code": "E_QUERY", "message": "bad query"}}"#,
        );

        assert_eq!(
            error.to_string(),
            "graph API responded with 400 Bad Request: E_QUERY. bad query"
        );
    }

    #[test]
    fn incomplete_bodies_fall_back_to_the_status() {
        let bodies: [&[u8]; 6] = [
            b"not json",
            br#"{"message": "no error key"}"#,
            br#"{"error": {"code": 0, "message": "zero code"}}"#,
            br#"{"error": {"code": 503, "message": ""}}"#,
            br#"{"error": {"code": 503}}"#,
            b"",
        ];
        for body in bodies {
            let error = RequestError::from_response(StatusCode::SERVICE_UNAVAILABLE, body);
            assert!(
                matches!(error, RequestError::HttpStatus { .. }),
                "body {:?} gave {error:?}",
                String::from_utf8_lossy(body)
            );
            assert_eq!(error.status_text(), Some("Service Unavailable"));
            assert_eq!(error.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        }
    }

    #[test]
    fn unknown_errors_have_no_status_text() {
        let error = RequestError::Unknown("relative URL without a base".to_string());

        assert_eq!(error.status_text(), None);
        assert_eq!(error.to_string(), "relative URL without a base");
    }
}
