//! TicTac Player Adapters - Concrete implementations of the player ports
//!
//! - HTTP: `reqwest` client behind [`RawApiPort`](tictac_player_ports::outbound::RawApiPort)
//! - Room event stream: `tokio-tungstenite` behind
//!   [`ConnectionFactoryPort`](tictac_player_ports::outbound::ConnectionFactoryPort)
//! - Storage: JSON file in the platform config dir

pub mod infrastructure;
