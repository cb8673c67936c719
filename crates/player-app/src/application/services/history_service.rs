//! Match history of the signed-in player

use tictac_protocol::HistoryRecord;

use super::Session;
use crate::application::{Api, ServiceError};

pub const NO_HISTORY_TEXT: &str = "No finished games yet.";

#[derive(Clone)]
pub struct HistoryService {
    api: Api,
}

impl HistoryService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn history(&self, session: &Session) -> Result<Vec<HistoryRecord>, ServiceError> {
        self.api
            .get("/game/history", session.bearer())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to load history");
                ServiceError::HistoryUnavailable(e.to_string())
            })
    }
}

/// Table cells for one record: room, players, winner, finished.
pub fn history_row(record: &HistoryRecord) -> [String; 4] {
    [
        record.room_id.clone(),
        record.players.join(", "),
        record
            .winner
            .clone()
            .unwrap_or_else(|| "Draw".to_string()),
        if record.finished { "Yes" } else { "No" }.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tictac_player_adapters::infrastructure::testing::MockApiPort;
    use tictac_player_ports::outbound::ApiError;

    #[test]
    fn rows_spell_out_draws() {
        let record = HistoryRecord {
            room_id: "abc".into(),
            players: vec!["alice".into(), "bob".into()],
            winner: None,
            finished: true,
        };

        assert_eq!(history_row(&record), ["abc", "alice, bob", "Draw", "Yes"]);
    }

    #[tokio::test]
    async fn history_uses_bearer_token() {
        let mock = MockApiPort::new();
        mock.respond(
            "GET",
            "/game/history",
            Ok(json!([{"room_id": "abc", "players": ["alice", "bob"], "winner": "bob", "finished": true}])),
        );
        let service = HistoryService::new(Api::new(Arc::new(mock.clone())));

        let records = service
            .history(&Session::new("tok", "alice"))
            .await
            .expect("history");

        assert_eq!(records[0].winner.as_deref(), Some("bob"));
        assert_eq!(mock.calls()[0].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn expired_token_surfaces_as_error() {
        let mock = MockApiPort::new();
        mock.respond(
            "GET",
            "/game/history",
            Err(ApiError::HttpError {
                status: 401,
                body: "Unauthorized".into(),
            }),
        );
        let service = HistoryService::new(Api::new(Arc::new(mock)));

        let result = service.history(&Session::new("old", "alice")).await;

        assert!(matches!(result, Err(ServiceError::HistoryUnavailable(_))));
    }
}
