//! Room event stream over WebSocket (tokio-tungstenite)

mod client;
mod protocol;

pub use client::DesktopGameConnection;
pub use protocol::{state_to_u8, u8_to_state};
