//! Leaderboard - Per-player aggregates

use tictac_protocol::ScoreboardEntry;

use super::Session;
use crate::application::{Api, ServiceError};

pub const NO_STATS_TEXT: &str = "No stats yet.";

#[derive(Clone)]
pub struct LeaderboardService {
    api: Api,
}

impl LeaderboardService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Entries in the order the backend ranks them.
    pub async fn leaderboard(
        &self,
        session: &Session,
    ) -> Result<Vec<ScoreboardEntry>, ServiceError> {
        self.api
            .get("/scoreboard", session.bearer())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to load leaderboard");
                ServiceError::LeaderboardUnavailable(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tictac_player_adapters::infrastructure::testing::MockApiPort;

    #[tokio::test]
    async fn keeps_backend_order() {
        let mock = MockApiPort::new();
        mock.respond(
            "GET",
            "/scoreboard",
            Ok(json!([
                {"username": "bob", "wins": 3, "losses": 0, "draws": 1, "games_played": 4},
                {"username": "alice", "wins": 1, "losses": 2, "draws": 1, "games_played": 4}
            ])),
        );
        let service = LeaderboardService::new(Api::new(Arc::new(mock.clone())));

        let entries = service
            .leaderboard(&Session::new("tok", "alice"))
            .await
            .expect("leaderboard");

        let names: Vec<_> = entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["bob", "alice"]);
        assert_eq!(entries[0].games_played, 4);
        assert_eq!(mock.calls()[0].path, "/scoreboard");
    }

    #[tokio::test]
    async fn unparsable_body_is_an_error() {
        let mock = MockApiPort::new();
        mock.respond("GET", "/scoreboard", Ok(json!({"oops": true})));
        let service = LeaderboardService::new(Api::new(Arc::new(mock)));

        let result = service.leaderboard(&Session::new("tok", "alice")).await;

        assert!(matches!(result, Err(ServiceError::LeaderboardUnavailable(_))));
    }
}
