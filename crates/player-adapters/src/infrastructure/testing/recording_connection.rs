//! Fake room connections that record what happens to them.
//!
//! The factory numbers connections in opening order and keeps one shared
//! log (`"open <room> #<n>"`, `"close #<n>"`), so tests can check ordering
//! across connections.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_channel::mpsc::{unbounded, UnboundedSender};

use tictac_player_ports::outbound::{
    ConnectionError, ConnectionFactoryPort, ConnectionState, GameConnectionPort, RoomConnection,
    TransportEvent,
};
use tictac_protocol::ClientMessage;

use super::lock;
use crate::infrastructure::websocket::{state_to_u8, u8_to_state};

type Log = Arc<Mutex<Vec<String>>>;

pub struct RecordingConnection {
    id: usize,
    state: AtomicU8,
    sent: Mutex<Vec<ClientMessage>>,
    closes: AtomicUsize,
    log: Log,
}

impl RecordingConnection {
    pub fn sent(&self) -> Vec<ClientMessage> {
        lock(&self.sent).clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn set_state(&self, state: ConnectionState) {
        self.state.store(state_to_u8(state), Ordering::SeqCst);
    }
}

impl GameConnectionPort for RecordingConnection {
    fn state(&self) -> ConnectionState {
        u8_to_state(self.state.load(Ordering::SeqCst))
    }

    fn send(&self, message: ClientMessage) -> Result<(), ConnectionError> {
        if self.state() == ConnectionState::Closed {
            return Err(ConnectionError::Closed);
        }
        lock(&self.sent).push(message);
        Ok(())
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.set_state(ConnectionState::Closed);
        lock(&self.log).push(format!("close #{}", self.id));
    }
}

/// Hands out [`RecordingConnection`]s and lets tests push transport events.
#[derive(Default)]
pub struct RecordingConnectionFactory {
    log: Log,
    opened: Mutex<Vec<(Arc<RecordingConnection>, UnboundedSender<TransportEvent>)>>,
}

impl RecordingConnectionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<String> {
        lock(&self.log).clone()
    }

    pub fn connections(&self) -> Vec<Arc<RecordingConnection>> {
        lock(&self.opened).iter().map(|(c, _)| Arc::clone(c)).collect()
    }

    /// Deliver `event` to connection `id`, mirroring it in the fake state.
    pub fn emit(&self, id: usize, event: TransportEvent) {
        let opened = lock(&self.opened);
        let Some((connection, tx)) = opened.get(id) else {
            return;
        };
        match event {
            TransportEvent::Opened => connection.set_state(ConnectionState::Open),
            TransportEvent::Closed => connection.set_state(ConnectionState::Closed),
            _ => {}
        }
        let _ = tx.unbounded_send(event);
    }
}

impl ConnectionFactoryPort for RecordingConnectionFactory {
    fn open_room(&self, room_id: &str) -> RoomConnection {
        let mut opened = lock(&self.opened);
        let id = opened.len();
        let (tx, events) = unbounded();
        let connection = Arc::new(RecordingConnection {
            id,
            state: AtomicU8::new(state_to_u8(ConnectionState::Connecting)),
            sent: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
            log: Arc::clone(&self.log),
        });
        lock(&self.log).push(format!("open {room_id} #{id}"));
        opened.push((Arc::clone(&connection), tx));

        RoomConnection { connection, events }
    }
}
