//! Connection factory for room event streams

use tictac_player_ports::outbound::{ConnectionFactoryPort, RoomConnection};
use tictac_player_ports::ClientConfig;

use super::websocket::DesktopGameConnection;

/// Opens one WebSocket per room under the configured `ws_base`.
#[derive(Clone)]
pub struct ConnectionFactory {
    config: ClientConfig,
}

impl ConnectionFactory {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl ConnectionFactoryPort for ConnectionFactory {
    fn open_room(&self, room_id: &str) -> RoomConnection {
        match self.config.room_socket_url(room_id) {
            Ok(url) => {
                tracing::debug!(%url, "Opening room connection");
                DesktopGameConnection::connect(url)
            }
            Err(e) => {
                tracing::error!(ws_base = %self.config.ws_base, error = %e, "Invalid room URL");
                DesktopGameConnection::failed(
                    self.config.ws_base.clone(),
                    format!("invalid room url: {e}"),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tictac_player_ports::outbound::{ConnectionState, TransportEvent};

    #[tokio::test]
    async fn bad_base_url_fails_without_spawning() {
        let mut config = ClientConfig::default();
        config.ws_base = "not a url".to_string();
        let factory = ConnectionFactory::new(config);

        let RoomConnection {
            connection,
            mut events,
        } = factory.open_room("abc");

        assert_eq!(connection.state(), ConnectionState::Closed);
        assert!(matches!(events.next().await, Some(TransportEvent::Failed(_))));
        assert_eq!(events.next().await, Some(TransportEvent::Closed));
    }
}
