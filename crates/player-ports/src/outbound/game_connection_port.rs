//! Game Connection Port - Outbound port for the per-room WebSocket
//!
//! This port abstracts the event stream of a single game room, allowing the
//! room sync client to run without depending on a concrete WebSocket client.
//!
//! A connection is opened through [`ConnectionFactoryPort::open_room`], which
//! returns the send/close handle together with the stream of transport events.
//! Connections are single-use: once closed they are never reopened.

use std::sync::Arc;

use futures_channel::mpsc::UnboundedReceiver;
use thiserror::Error;
use tictac_protocol::ClientMessage;

/// Lifecycle of one room connection.
///
/// `Connecting → Open → Closed`. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in progress
    Connecting,
    /// Handshake completed; messages may flow
    Open,
    /// Closed locally or by the peer
    Closed,
}

/// Events emitted by the transport for one room connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake completed.
    Opened,
    /// One inbound text frame, undecoded.
    Message(String),
    /// Transport-level failure (handshake or I/O).
    Failed(String),
    /// The socket is closed. Always the last event.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("connection is closed")]
    Closed,
    #[error("failed to encode message: {0}")]
    Encode(String),
}

/// Send/close handle of one room connection.
///
/// NOTE: This trait is intentionally **object-safe** so the application layer
/// can store an `Arc<dyn GameConnectionPort>`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait GameConnectionPort: Send + Sync {
    /// Current transport state.
    fn state(&self) -> ConnectionState;

    /// Queue one outbound message.
    fn send(&self, message: ClientMessage) -> Result<(), ConnectionError>;

    /// Close the connection. Idempotent.
    fn close(&self);
}

/// A freshly opened room connection.
pub struct RoomConnection {
    pub connection: Arc<dyn GameConnectionPort>,
    pub events: UnboundedReceiver<TransportEvent>,
}

/// Opens room connections.
pub trait ConnectionFactoryPort: Send + Sync {
    /// Begin connecting to the event stream of `room_id`.
    ///
    /// Returns immediately; progress is reported through `events`.
    fn open_room(&self, room_id: &str) -> RoomConnection;
}
