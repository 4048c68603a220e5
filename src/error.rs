// Normalized API error
use serde_json::{json, Value};

/// Message used when a failure carries no recognizable error body
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error has occured";

/// The single error shape that crosses the HTTP client boundary.
///
/// `message` is always derived from the response body by [`normalize`]; the
/// status is kept for callers that want to react to it (e.g. a 401) but never
/// influences the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_ERROR_MESSAGE)
    }

    /// Build from a raw failure object (`{response: {status, data}}`)
    pub fn from_raw(raw: &Value) -> Self {
        let status = raw
            .pointer("/response/status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok());
        Self {
            message: normalize(raw),
            status,
        }
    }

    /// Build from an HTTP status and whatever body the server sent back
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        Self::from_raw(&raw_failure(Some(status), body))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

/// Assemble the raw failure object the normalizer probes.
pub fn raw_failure(status: Option<u16>, body: Option<Value>) -> Value {
    match (status, body) {
        (None, None) => json!({}),
        (status, body) => json!({
            "response": {
                "status": status,
                "data": body.unwrap_or(Value::Null),
            }
        }),
    }
}

type Extractor = fn(&Value) -> Option<&str>;

// Precedence order: first match wins
const EXTRACTORS: [Extractor; 3] = [error_message, nested_error_message, plain_message];

fn error_message(raw: &Value) -> Option<&str> {
    string_at(raw, "/response/data/errorMessage")
}

fn nested_error_message(raw: &Value) -> Option<&str> {
    string_at(raw, "/response/data/error/message")
}

fn plain_message(raw: &Value) -> Option<&str> {
    string_at(raw, "/response/data/message")
}

fn string_at<'a>(raw: &'a Value, pointer: &str) -> Option<&'a str> {
    raw.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Reduce a raw failure object to one human-readable message.
pub fn normalize(raw: &Value) -> String {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(raw))
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        tracing::warn!("transport error: {}", err);
        let mut error = ApiError::unknown();
        error.status = err.status().map(|s| s.as_u16());
        error
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::warn!("response decoding error: {}", err);
        ApiError::unknown()
    }
}
