//! Client configuration.
//!
//! Values come from environment variables (the runner loads `.env` files
//! first). Everything has a default so the client starts without any setup.

use std::path::PathBuf;

use url::Url;

/// Default REST base URL of the game backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default HTTP request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub const ENV_BACKEND_URL: &str = "TICTAC_BACKEND_URL";
pub const ENV_WS_URL: &str = "TICTAC_WS_URL";
pub const ENV_STORAGE_PATH: &str = "TICTAC_STORAGE_PATH";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "TICTAC_REQUEST_TIMEOUT_MS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base, e.g. `http://localhost:8000`
    pub api_base: String,
    /// WebSocket base, e.g. `ws://localhost:8000`
    pub ws_base: String,
    /// Session file override; `None` uses the platform config dir.
    pub storage_path: Option<PathBuf>,
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl ClientConfig {
    /// Config for `api_base`, deriving the WebSocket base from it.
    pub fn new(api_base: &str) -> Self {
        let api_base = api_base.trim().trim_end_matches('/').to_string();
        Self {
            ws_base: http_to_ws(&api_base),
            api_base,
            storage_path: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (testable).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = non_empty(ENV_BACKEND_URL)
            .map(|url| Self::new(&url))
            .unwrap_or_default();

        if let Some(ws) = non_empty(ENV_WS_URL) {
            config.ws_base = ws.trim().trim_end_matches('/').to_string();
        }
        config.storage_path = non_empty(ENV_STORAGE_PATH).map(PathBuf::from);
        config.request_timeout_ms = non_empty(ENV_REQUEST_TIMEOUT_MS)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);

        config
    }

    /// Absolute REST URL for `path` (which starts with `/`).
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Event-stream URL of a room: `{ws_base}/ws/game/{room_id}`.
    pub fn room_socket_url(&self, room_id: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.ws_base)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["ws", "game", room_id]);
        Ok(url)
    }
}

/// Convert an HTTP(S) URL to its WebSocket counterpart.
pub fn http_to_ws(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        format!("ws://{url}")
    }
}
