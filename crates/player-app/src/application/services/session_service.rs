//! Persisted login session
//!
//! A session is the pair (access token, username). Both halves are stored
//! under their own key; a half-present pair is treated as corrupt and wiped.

use std::fmt;

use tictac_player_ports::outbound::{storage_keys, StorageProvider};

/// Authenticated identity for REST calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }

    pub fn bearer(&self) -> Option<&str> {
        Some(&self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// Loads and stores the session through a [`StorageProvider`].
pub struct SessionService<S: StorageProvider> {
    storage: S,
}

impl<S: StorageProvider> SessionService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Session persisted by a previous run.
    ///
    /// Requires both keys; if only one is present both are cleared.
    pub fn restore(&self) -> Option<Session> {
        let token = self.storage.load(storage_keys::ACCESS_TOKEN);
        let username = self.storage.load(storage_keys::USERNAME);

        match (token, username) {
            (Some(token), Some(username)) if !token.is_empty() && !username.is_empty() => {
                tracing::info!(%username, "Restored saved session");
                Some(Session { token, username })
            }
            (None, None) => None,
            _ => {
                tracing::warn!("Discarding incomplete saved session");
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &Session) {
        self.storage.save(storage_keys::ACCESS_TOKEN, &session.token);
        self.storage.save(storage_keys::USERNAME, &session.username);
    }

    pub fn clear(&self) {
        self.storage.remove(storage_keys::ACCESS_TOKEN);
        self.storage.remove(storage_keys::USERNAME);
    }
}
