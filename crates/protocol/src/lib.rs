//! TicTac Protocol - Shared wire types for the game backend and the player client
//!
//! This crate contains the types exchanged with the backend:
//! - REST request/response bodies (`/auth`, `/game`, `/scoreboard`)
//! - WebSocket message types (ClientMessage, ServerMessage)
//! - Board, player and room value types
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Lenient inbound decoding** - unknown fields are ignored

pub mod errors;
pub mod messages;
pub mod requests;
pub mod responses;
pub mod types;

pub use errors::ProtocolError;
pub use messages::{ClientMessage, ServerMessage};
pub use requests::{CreateRoomRequest, Credentials, JoinRoomRequest};
pub use responses::{ErrorBody, HistoryRecord, ScoreboardEntry, TokenResponse};
pub use types::{Board, GameSnapshot, Mark, PlayerInfo, RoomSummary, SnapshotPatch, BOARD_SIZE};
