//! Application services
//!
//! REST-backed use cases. Each service wraps the typed [`Api`](super::Api)
//! and maps transport failures to player-facing [`ServiceError`](super::ServiceError)s.

pub mod auth_service;
pub mod history_service;
pub mod leaderboard_service;
pub mod lobby_service;
pub mod session_service;

pub use auth_service::{validate_credentials, AuthService};
pub use history_service::{history_row, HistoryService, NO_HISTORY_TEXT};
pub use leaderboard_service::{LeaderboardService, NO_STATS_TEXT};
pub use lobby_service::{is_joinable, LobbyService, RoomStatus};
pub use session_service::{Session, SessionService};
