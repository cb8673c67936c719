//! REST error type shared by the raw and typed API ports

use thiserror::Error;

/// Errors produced by REST calls against the game backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused, timeout).
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Failed to serialize request: {0}")]
    SerializeError(String),
}

impl ApiError {
    /// Raw response body of a non-success answer.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::HttpError { body, .. } => Some(body),
            _ => None,
        }
    }
}
