//! Protocol errors

use thiserror::Error;

/// Errors raised while decoding wire data.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message is not a JSON object")]
    NotAnObject,

    #[error("unrecognized message shape")]
    UnrecognizedShape,

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}
