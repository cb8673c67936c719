//! Service layer error types
//!
//! Every variant renders as the text shown to the player. The underlying
//! transport error is logged where it happens and not carried further.

use thiserror::Error;

/// Errors that can occur in service operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Client-side input check failed; nothing was sent.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    /// Backend rejected registration, with its first detail message if any.
    #[error("{}", registration_text(.0))]
    RegistrationFailed(Option<String>),

    #[error("Unable to fetch rooms")]
    RoomsUnavailable,

    #[error("Failed to create room")]
    CreateRoomFailed,

    #[error("Join failed (room may be full)")]
    JoinRoomFailed,

    #[error("Unable to load match history: {0}")]
    HistoryUnavailable(String),

    #[error("Unable to load leaderboard: {0}")]
    LeaderboardUnavailable(String),
}

fn registration_text(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("Registration failed: {detail}"),
        None => "Registration failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_player_facing() {
        assert_eq!(
            ServiceError::LoginFailed("Invalid credentials".into()).to_string(),
            "Login failed: Invalid credentials"
        );
        assert_eq!(
            ServiceError::JoinRoomFailed.to_string(),
            "Join failed (room may be full)"
        );
    }

    #[test]
    fn registration_text_uses_detail_when_present() {
        assert_eq!(
            ServiceError::RegistrationFailed(Some("Username already registered".into()))
                .to_string(),
            "Registration failed: Username already registered"
        );
        assert_eq!(
            ServiceError::RegistrationFailed(None).to_string(),
            "Registration failed"
        );
    }
}
