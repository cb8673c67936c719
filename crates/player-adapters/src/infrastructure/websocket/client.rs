//! Desktop room connection using tokio-tungstenite
//!
//! Each connection owns one spawned task that drives the socket. The handle
//! talks to it over channels: outbound text through an unbounded mpsc,
//! closure through a oneshot. Transport events flow back over a
//! `futures_channel` stream so the application layer stays runtime-agnostic.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use futures_channel::mpsc::{unbounded, UnboundedSender};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use tictac_player_ports::outbound::{
    ConnectionError, ConnectionState, GameConnectionPort, RoomConnection, TransportEvent,
};
use tictac_protocol::ClientMessage;

use super::protocol::{state_to_u8, u8_to_state};

/// Send/close handle for one room socket.
pub struct DesktopGameConnection {
    url: String,
    state: Arc<AtomicU8>,
    outbound: mpsc::UnboundedSender<String>,
    close_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl DesktopGameConnection {
    /// Spawn the socket task for `url` on the current tokio runtime.
    pub fn connect(url: Url) -> RoomConnection {
        let (event_tx, events) = unbounded();
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let (close_tx, close_rx) = oneshot::channel();
        let state = Arc::new(AtomicU8::new(state_to_u8(ConnectionState::Connecting)));

        let connection = Self {
            url: url.to_string(),
            state: Arc::clone(&state),
            outbound,
            close_tx: Mutex::new(Some(close_tx)),
        };

        tokio::spawn(socket_task(
            url.to_string(),
            outbound_rx,
            close_rx,
            event_tx,
            state,
        ));

        RoomConnection {
            connection: Arc::new(connection),
            events,
        }
    }

    /// A connection that never got off the ground.
    ///
    /// Reports `reason` as a failure and then closure, like a refused
    /// handshake would.
    pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> RoomConnection {
        let (event_tx, events) = unbounded();
        let (outbound, _) = mpsc::unbounded_channel();
        let _ = event_tx.unbounded_send(TransportEvent::Failed(reason.into()));
        let _ = event_tx.unbounded_send(TransportEvent::Closed);

        let connection = Self {
            url: url.into(),
            state: Arc::new(AtomicU8::new(state_to_u8(ConnectionState::Closed))),
            outbound,
            close_tx: Mutex::new(None),
        };

        RoomConnection {
            connection: Arc::new(connection),
            events,
        }
    }
}

impl GameConnectionPort for DesktopGameConnection {
    fn state(&self) -> ConnectionState {
        u8_to_state(self.state.load(Ordering::SeqCst))
    }

    fn send(&self, message: ClientMessage) -> Result<(), ConnectionError> {
        if self.state() == ConnectionState::Closed {
            return Err(ConnectionError::Closed);
        }
        let text = message
            .to_json()
            .map_err(|e| ConnectionError::Encode(e.to_string()))?;
        self.outbound
            .send(text)
            .map_err(|_| ConnectionError::Closed)
    }

    fn close(&self) {
        let close_tx = match self.close_tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        self.state
            .store(state_to_u8(ConnectionState::Closed), Ordering::SeqCst);
        if let Some(tx) = close_tx {
            tracing::debug!(url = %self.url, "Close requested");
            let _ = tx.send(());
        }
    }
}

impl Drop for DesktopGameConnection {
    fn drop(&mut self) {
        self.close();
    }
}

async fn socket_task(
    url: String,
    mut outbound: mpsc::UnboundedReceiver<String>,
    mut close_rx: oneshot::Receiver<()>,
    events: UnboundedSender<TransportEvent>,
    state: Arc<AtomicU8>,
) {
    let emit = |event: TransportEvent| {
        let _ = events.unbounded_send(event);
    };
    let set_state = |s: ConnectionState| state.store(state_to_u8(s), Ordering::SeqCst);

    let ws_stream = tokio::select! {
        _ = &mut close_rx => {
            tracing::debug!(%url, "Closed before handshake completed");
            set_state(ConnectionState::Closed);
            emit(TransportEvent::Closed);
            return;
        }
        result = connect_async(url.as_str()) => match result {
            Ok((ws_stream, _)) => ws_stream,
            Err(e) => {
                tracing::error!(%url, error = %e, "Failed to connect to room");
                set_state(ConnectionState::Closed);
                emit(TransportEvent::Failed(e.to_string()));
                emit(TransportEvent::Closed);
                return;
            }
        }
    };

    tracing::info!(%url, "Connected to room");
    set_state(ConnectionState::Open);
    emit(TransportEvent::Opened);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            _ = &mut close_rx => {
                tracing::info!(%url, "Closing room connection");
                if let Err(e) = write.send(Message::Close(None)).await {
                    tracing::debug!(error = %e, "Close frame not delivered");
                }
                break;
            }

            Some(text) = outbound.recv() => {
                if let Err(e) = write.send(Message::Text(text)).await {
                    tracing::error!(error = %e, "Failed to send message");
                    emit(TransportEvent::Failed(e.to_string()));
                    break;
                }
            }

            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => emit(TransportEvent::Message(text)),
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!(%url, "Server closed room connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!(error = %e, "WebSocket error");
                    emit(TransportEvent::Failed(e.to_string()));
                    break;
                }
            }
        }
    }

    set_state(ConnectionState::Closed);
    emit(TransportEvent::Closed);
}
