//! Game-room sync client
//!
//! Keeps one live event-stream connection per displayed room, reconciles the
//! local snapshot with what the server pushes, and gates move input so that
//! at most one move is in flight.
//!
//! - [`GameRoom`] is the owned handle for one room connection.
//! - [`RoomController`] guarantees a single active room.
//! - [`view`] holds the pure derivations the shell renders from.

mod controller;
mod room;
pub mod view;

pub use controller::RoomController;
pub use room::{merge_patch, GameRoom, MoveRejection, CONNECTION_CLOSED, CONNECTION_FAILED};
pub use view::{derive_status_text, derive_symbol, PlayerSymbol};
