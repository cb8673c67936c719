//! WebSocket message types for the per-room event stream
//!
//! The client sends [`ClientMessage`] and receives [`ServerMessage`]. Inbound
//! frames are decoded leniently: the backend is the only producer, so the
//! decoder recognizes exactly two shapes and reports everything else as a
//! [`ProtocolError`] for the caller to discard.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProtocolError;
use crate::types::SnapshotPatch;

// =============================================================================
// Client Messages (Player → Server)
// =============================================================================

/// Messages from the player client to the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Place the acting player's mark at `(row, col)`.
    Move {
        row: usize,
        col: usize,
        player: String,
    },
}

impl ClientMessage {
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

// =============================================================================
// Server Messages (Server → Player)
// =============================================================================

/// Messages pushed by the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `{"type": "game_state", "state": {...}}`. `skipped` names the state
    /// fields that did not decode and were left out of `patch`.
    GameState {
        patch: SnapshotPatch,
        skipped: Vec<String>,
    },
    /// `{"error": "..."}`
    Error(String),
}

impl ServerMessage {
    /// Decode one inbound text frame.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(mut obj) = value else {
            return Err(ProtocolError::NotAnObject);
        };

        let is_game_state = obj.get("type").and_then(Value::as_str) == Some("game_state");
        if is_game_state {
            if let Some(Value::Object(state)) = obj.remove("state") {
                let (patch, skipped) = SnapshotPatch::from_state(state);
                return Ok(ServerMessage::GameState { patch, skipped });
            }
        }

        match obj.get("error").and_then(Value::as_str) {
            Some(error) if !error.is_empty() => Ok(ServerMessage::Error(error.to_string())),
            _ => Err(ProtocolError::UnrecognizedShape),
        }
    }
}
