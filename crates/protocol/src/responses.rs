//! REST response bodies

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// One finished game from `GET /game/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub room_id: String,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub finished: bool,
}

/// Per-player aggregate from `GET /scoreboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    pub username: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub games_played: u32,
}

/// Validation failure body, `{"detail": [{"msg": "..."}]}` or
/// `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    /// First human-readable message, if the body carries one.
    pub fn first_message(&self) -> Option<&str> {
        match &self.detail {
            Value::String(msg) if !msg.is_empty() => Some(msg),
            Value::Array(items) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_reads_first_validation_message() {
        let body: ErrorBody = serde_json::from_value(json!({
            "detail": [{"loc": ["body", "password"], "msg": "too short"}, {"msg": "other"}]
        }))
        .expect("valid body");

        assert_eq!(body.first_message(), Some("too short"));
    }

    #[test]
    fn error_body_reads_plain_detail() {
        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "Username already registered"}))
                .expect("valid body");

        assert_eq!(body.first_message(), Some("Username already registered"));
    }

    #[test]
    fn error_body_without_detail_has_no_message() {
        let body: ErrorBody = serde_json::from_value(json!({})).expect("valid body");
        assert_eq!(body.first_message(), None);
    }

    #[test]
    fn history_record_accepts_null_winner() {
        let record: HistoryRecord = serde_json::from_value(json!({
            "room_id": "r9",
            "players": ["a", "b"],
            "winner": null,
            "finished": true
        }))
        .expect("valid record");

        assert_eq!(record.winner, None);
        assert!(record.finished);
    }
}
