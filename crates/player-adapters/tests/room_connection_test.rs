//! Room connection against a loopback WebSocket server.

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, accept_hdr_async};

use tictac_player_adapters::infrastructure::testing::fixtures::game_state_frame;
use tictac_player_adapters::infrastructure::ConnectionFactory;
use tictac_player_ports::outbound::{
    ConnectionFactoryPort, ConnectionState, RoomConnection, TransportEvent,
};
use tictac_player_ports::ClientConfig;
use tictac_protocol::ClientMessage;

async fn listener() -> (TcpListener, ClientConfig) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    (listener, ClientConfig::new(&format!("http://{addr}")))
}

#[tokio::test]
async fn exchanges_frames_and_closes_on_request() {
    let (listener, config) = listener().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut path = String::new();
        let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            path = req.uri().path().to_string();
            Ok(resp)
        };
        let mut ws = accept_hdr_async(stream, callback).await.expect("handshake");

        ws.send(Message::Text(game_state_frame(json!({"next_turn": "A"}))))
            .await
            .expect("push state");

        let intent = match ws.next().await {
            Some(Ok(Message::Text(text))) => text,
            other => panic!("expected intent, got {other:?}"),
        };
        ws.send(Message::Text(r#"{"error":"cell occupied"}"#.to_string()))
            .await
            .expect("push error");

        let mut saw_close = false;
        while let Some(Ok(frame)) = ws.next().await {
            if frame.is_close() {
                saw_close = true;
                break;
            }
        }
        (path, intent, saw_close)
    });

    let RoomConnection {
        connection,
        mut events,
    } = ConnectionFactory::new(config).open_room("abc");

    assert_eq!(events.next().await, Some(TransportEvent::Opened));
    assert_eq!(connection.state(), ConnectionState::Open);

    match events.next().await {
        Some(TransportEvent::Message(text)) => assert!(text.contains("game_state")),
        other => panic!("expected game_state, got {other:?}"),
    }

    connection
        .send(ClientMessage::Move {
            row: 0,
            col: 0,
            player: "A".into(),
        })
        .expect("send");

    assert_eq!(
        events.next().await,
        Some(TransportEvent::Message(
            r#"{"error":"cell occupied"}"#.to_string()
        ))
    );

    connection.close();
    assert_eq!(connection.state(), ConnectionState::Closed);
    assert_eq!(events.next().await, Some(TransportEvent::Closed));
    assert!(connection
        .send(ClientMessage::Move {
            row: 1,
            col: 1,
            player: "A".into(),
        })
        .is_err());

    let (path, intent, saw_close) = server.await.expect("server task");
    assert_eq!(path, "/ws/game/abc");
    assert_eq!(
        serde_json::from_str::<Value>(&intent).expect("json intent"),
        json!({"action": "move", "row": 0, "col": 0, "player": "A"})
    );
    assert!(saw_close);
}

#[tokio::test]
async fn server_hangup_ends_the_stream() {
    let (listener, config) = listener().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");
        ws.close(None).await.expect("close");
    });

    let RoomConnection {
        connection,
        mut events,
    } = ConnectionFactory::new(config).open_room("abc");

    assert_eq!(events.next().await, Some(TransportEvent::Opened));
    assert_eq!(events.next().await, Some(TransportEvent::Closed));
    assert_eq!(connection.state(), ConnectionState::Closed);
}

#[tokio::test]
async fn refused_handshake_reports_failure_then_closure() {
    let (listener, config) = listener().await;
    drop(listener);

    let RoomConnection {
        connection,
        mut events,
    } = ConnectionFactory::new(config).open_room("abc");

    assert!(matches!(events.next().await, Some(TransportEvent::Failed(_))));
    assert_eq!(events.next().await, Some(TransportEvent::Closed));
    assert_eq!(connection.state(), ConnectionState::Closed);
}

#[tokio::test]
async fn secure_backend_attempts_a_tls_handshake() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        // Accept and hang up so the TLS handshake fails fast.
        let (stream, _) = listener.accept().await.expect("accept");
        drop(stream);
    });

    let config = ClientConfig::new(&format!("https://{addr}"));
    assert!(config.ws_base.starts_with("wss://"));

    let RoomConnection {
        connection,
        mut events,
    } = ConnectionFactory::new(config).open_room("abc");

    match events.next().await {
        Some(TransportEvent::Failed(reason)) => {
            assert!(
                !reason.contains("TLS support not compiled in"),
                "wss must be supported, got: {reason}"
            );
        }
        other => panic!("expected handshake failure, got {other:?}"),
    }
    assert_eq!(events.next().await, Some(TransportEvent::Closed));
    assert_eq!(connection.state(), ConnectionState::Closed);
}
