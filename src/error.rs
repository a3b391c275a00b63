//! Failure classification for search submissions.
//!
//! The `Display` of every variant is the message shown to the user.
//! Transport details are kept for the log only.

use serde_json::Value;

/// Shown for any non-2xx response that carries no usable `error` field.
pub const HTTP_FALLBACK_MESSAGE: &str = "Error searching";

/// Shown whenever the request itself failed.
pub const TRANSPORT_MESSAGE: &str =
    "Network error: the search backend may be unreachable. Check that it is running and try again.";

/// Shown when a search succeeded but returned nothing.
pub const EMPTY_RESULT_MESSAGE: &str = "No matching results found. Try a different query.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The backend answered with a non-2xx status.
    #[error("{0}")]
    Application(String),

    /// The request never produced a usable response: connection refused,
    /// network unreachable, or a body that is not JSON.
    #[error("{}", TRANSPORT_MESSAGE)]
    Transport { reason: String },
}

impl SearchError {
    /// Classify a non-2xx response from its parsed body.
    pub fn from_http_failure(body: &Value) -> SearchError {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .unwrap_or(HTTP_FALLBACK_MESSAGE);
        SearchError::Application(message.to_string())
    }

    pub fn from_transport(err: &anyhow::Error) -> SearchError {
        SearchError::Transport {
            reason: format!("{:#}", err),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, SearchError::Transport { .. })
    }
}
