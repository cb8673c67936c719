//! The owned handle for one room connection.

use std::sync::Arc;

use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use thiserror::Error;

use tictac_player_ports::outbound::{
    ConnectionError, ConnectionFactoryPort, ConnectionState, GameConnectionPort, RoomConnection,
    TransportEvent,
};
use tictac_protocol::{ClientMessage, GameSnapshot, ServerMessage, SnapshotPatch};

/// Error text shown after a transport failure.
pub const CONNECTION_FAILED: &str = "connection failed";

/// Error text shown when the server drops an unfinished game.
pub const CONNECTION_CLOSED: &str = "connection closed";

/// Why a move request was not transmitted.
///
/// Variants are ordered as the checks run; the first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("connection is not open")]
    NotOpen,
    #[error("a move is already awaiting the server")]
    MovePending,
    #[error("game is finished")]
    GameFinished,
    #[error("it is not {0}'s turn")]
    NotYourTurn(String),
    #[error("cell ({row}, {col}) is not available")]
    CellUnavailable { row: usize, col: usize },
    /// Admitted, but the transport refused the message.
    #[error("send failed: {0}")]
    SendFailed(ConnectionError),
}

/// Live view of one room.
///
/// Created by [`GameRoom::enter`]; owns its connection for its whole life.
/// All mutation happens through `&mut self`, so the handle is driven from a
/// single task. Dropping the handle closes the connection.
pub struct GameRoom {
    snapshot: GameSnapshot,
    connection: Arc<dyn GameConnectionPort>,
    events: UnboundedReceiver<TransportEvent>,
    phase: ConnectionState,
    move_pending: bool,
    error: Option<String>,
    released: bool,
}

impl GameRoom {
    /// Open the event stream of `snapshot.room_id` and show `snapshot`
    /// until the server pushes its own state.
    pub fn enter(factory: &dyn ConnectionFactoryPort, snapshot: GameSnapshot) -> Self {
        let connection = factory.open_room(&snapshot.room_id);
        Self::with_connection(snapshot, connection)
    }

    /// Build a handle around an already opened connection.
    pub fn with_connection(snapshot: GameSnapshot, connection: RoomConnection) -> Self {
        tracing::info!(room_id = %snapshot.room_id, "Entering game room");
        let RoomConnection { connection, events } = connection;
        Self {
            snapshot,
            connection,
            events,
            phase: ConnectionState::Connecting,
            move_pending: false,
            error: None,
            released: false,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.snapshot.room_id
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> ConnectionState {
        self.phase
    }

    pub fn is_move_pending(&self) -> bool {
        self.move_pending
    }

    /// Error text to display, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Wait for the next transport event. `None` once the adapter is gone.
    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.next().await
    }

    /// Apply one transport event to the room state.
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        if self.phase == ConnectionState::Closed {
            tracing::debug!(room_id = %self.room_id(), ?event, "Ignoring event on closed room");
            return;
        }

        match event {
            TransportEvent::Opened => {
                tracing::info!(room_id = %self.room_id(), "Room connection open");
                self.phase = ConnectionState::Open;
                self.error = None;
            }
            TransportEvent::Message(text) => {
                self.on_server_event(&text);
            }
            TransportEvent::Failed(reason) => {
                tracing::warn!(room_id = %self.room_id(), %reason, "Room connection failed");
                self.error = Some(CONNECTION_FAILED.to_string());
                self.phase = ConnectionState::Open;
            }
            TransportEvent::Closed => {
                tracing::info!(room_id = %self.room_id(), "Room connection closed");
                self.phase = ConnectionState::Closed;
                if !self.snapshot.finished && self.error.is_none() {
                    self.error = Some(CONNECTION_CLOSED.to_string());
                }
            }
        }
    }

    /// Apply one inbound text message. Returns whether it was recognized.
    ///
    /// Unrecognized input is dropped and leaves every piece of state as is.
    pub fn on_server_event(&mut self, raw: &str) -> bool {
        match ServerMessage::parse(raw) {
            Ok(ServerMessage::GameState { patch, skipped }) => {
                if !skipped.is_empty() {
                    tracing::debug!(room_id = %self.room_id(), ?skipped, "Ignoring undecodable state fields");
                }
                merge_patch(&mut self.snapshot, patch);
                if !self.snapshot.board.is_consistent() {
                    tracing::debug!(room_id = %self.room_id(), "Server board has unusual mark counts");
                }
                self.move_pending = false;
                self.error = None;
                true
            }
            Ok(ServerMessage::Error(message)) => {
                tracing::debug!(room_id = %self.room_id(), %message, "Server reported an error");
                self.error = Some(message);
                self.move_pending = false;
                true
            }
            Err(e) => {
                tracing::debug!(room_id = %self.room_id(), error = %e, "Discarding server message");
                false
            }
        }
    }

    /// Ask the server to place `acting_player`'s mark at `(row, col)`.
    ///
    /// Nothing changes unless every admission check passes. On admission
    /// the pending flag is raised before the intent is handed to the
    /// transport and stays up until the next `game_state` or `error`.
    pub fn request_move(
        &mut self,
        row: usize,
        col: usize,
        acting_player: &str,
    ) -> Result<(), MoveRejection> {
        if let Err(rejection) = self.admit(row, col, acting_player) {
            tracing::debug!(room_id = %self.room_id(), %rejection, "Move not sent");
            return Err(rejection);
        }

        self.move_pending = true;
        let intent = ClientMessage::Move {
            row,
            col,
            player: acting_player.to_string(),
        };
        if let Err(e) = self.connection.send(intent) {
            tracing::warn!(room_id = %self.room_id(), error = %e, "Failed to send move");
            self.move_pending = false;
            self.error = Some(CONNECTION_FAILED.to_string());
            return Err(MoveRejection::SendFailed(e));
        }

        tracing::debug!(room_id = %self.room_id(), row, col, player = %acting_player, "Move sent");
        Ok(())
    }

    fn admit(&self, row: usize, col: usize, acting_player: &str) -> Result<(), MoveRejection> {
        if self.phase != ConnectionState::Open
            || self.connection.state() != ConnectionState::Open
        {
            return Err(MoveRejection::NotOpen);
        }
        if self.move_pending {
            return Err(MoveRejection::MovePending);
        }
        if self.snapshot.finished {
            return Err(MoveRejection::GameFinished);
        }
        if self.snapshot.next_turn.as_deref() != Some(acting_player) {
            return Err(MoveRejection::NotYourTurn(acting_player.to_string()));
        }
        if !self.snapshot.board.is_cell_empty(row, col) {
            return Err(MoveRejection::CellUnavailable { row, col });
        }
        Ok(())
    }

    /// Close the connection and release the room.
    pub fn leave(mut self) {
        tracing::info!(room_id = %self.room_id(), "Leaving game room");
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.connection.close();
        }
        self.phase = ConnectionState::Closed;
    }
}

impl Drop for GameRoom {
    fn drop(&mut self) {
        self.release();
    }
}

/// Shallow-merge the fields present in `patch` into `snapshot`.
pub fn merge_patch(snapshot: &mut GameSnapshot, patch: SnapshotPatch) {
    if let Some(board) = patch.board {
        snapshot.board = board;
    }
    if let Some(players) = patch.players {
        snapshot.players = players;
    }
    if let Some(next_turn) = patch.next_turn {
        snapshot.next_turn = next_turn;
    }
    if let Some(finished) = patch.finished {
        snapshot.finished = finished;
    }
    if let Some(winner) = patch.winner {
        snapshot.winner = winner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_channel::mpsc::{self, UnboundedSender};
    use tictac_player_ports::outbound::MockGameConnectionPort;
    use tictac_protocol::{Board, Mark, PlayerInfo};

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            room_id: "room-1".into(),
            board: Board::empty(),
            players: vec![PlayerInfo::new("A"), PlayerInfo::new("B")],
            next_turn: Some("A".into()),
            finished: false,
            winner: None,
        }
    }

    /// Mock that reports an open socket and tolerates the close on drop.
    fn open_mock() -> MockGameConnectionPort {
        let mut mock = MockGameConnectionPort::new();
        mock.expect_state().return_const(ConnectionState::Open);
        mock.expect_close().return_const(());
        mock
    }

    fn room_with(
        mock: MockGameConnectionPort,
        snapshot: GameSnapshot,
    ) -> (GameRoom, UnboundedSender<TransportEvent>) {
        let (tx, rx) = mpsc::unbounded();
        let room = GameRoom::with_connection(
            snapshot,
            RoomConnection {
                connection: Arc::new(mock),
                events: rx,
            },
        );
        (room, tx)
    }

    fn open_room(mock: MockGameConnectionPort) -> GameRoom {
        let (mut room, _tx) = room_with(mock, snapshot());
        room.handle_transport_event(TransportEvent::Opened);
        room
    }

    #[test]
    fn accepted_move_sends_intent_and_blocks_the_next_one() {
        let mut mock = open_mock();
        mock.expect_send()
            .times(1)
            .withf(|msg| {
                *msg == ClientMessage::Move {
                    row: 0,
                    col: 0,
                    player: "A".into(),
                }
            })
            .returning(|_| Ok(()));
        let mut room = open_room(mock);

        assert_eq!(room.request_move(0, 0, "A"), Ok(()));
        assert!(room.is_move_pending());

        assert_eq!(room.request_move(1, 1, "A"), Err(MoveRejection::MovePending));
        assert!(room.is_move_pending());
    }

    #[test]
    fn move_out_of_turn_is_not_sent() {
        let mut mock = open_mock();
        mock.expect_send().never();
        let mut room = open_room(mock);

        assert_eq!(
            room.request_move(0, 0, "B"),
            Err(MoveRejection::NotYourTurn("B".into()))
        );
        assert!(!room.is_move_pending());
        assert_eq!(room.error(), None);
    }

    #[test]
    fn move_on_occupied_or_missing_cell_is_not_sent() {
        let mut mock = open_mock();
        mock.expect_send().never();
        let mut state = snapshot();
        state.board.set(1, 1, Some(Mark::O));
        let (mut room, _tx) = room_with(mock, state);
        room.handle_transport_event(TransportEvent::Opened);

        assert_eq!(
            room.request_move(1, 1, "A"),
            Err(MoveRejection::CellUnavailable { row: 1, col: 1 })
        );
        assert_eq!(
            room.request_move(3, 0, "A"),
            Err(MoveRejection::CellUnavailable { row: 3, col: 0 })
        );
        assert!(!room.is_move_pending());
    }

    #[test]
    fn move_on_finished_game_is_not_sent() {
        let mut mock = open_mock();
        mock.expect_send().never();
        let mut state = snapshot();
        state.finished = true;
        state.winner = Some("B".into());
        let (mut room, _tx) = room_with(mock, state);
        room.handle_transport_event(TransportEvent::Opened);

        assert_eq!(room.request_move(0, 0, "A"), Err(MoveRejection::GameFinished));
    }

    #[test]
    fn move_before_handshake_is_not_sent() {
        let mut mock = MockGameConnectionPort::new();
        mock.expect_state().return_const(ConnectionState::Connecting);
        mock.expect_close().return_const(());
        mock.expect_send().never();
        let (mut room, _tx) = room_with(mock, snapshot());

        assert_eq!(room.phase(), ConnectionState::Connecting);
        assert_eq!(room.request_move(0, 0, "A"), Err(MoveRejection::NotOpen));
    }

    #[test]
    fn game_state_merges_present_fields_and_clears_pending() {
        let mut mock = open_mock();
        mock.expect_send().times(1).returning(|_| Ok(()));
        let mut room = open_room(mock);
        room.request_move(0, 0, "A").expect("admitted");

        let applied = room.on_server_event(
            r#"{"type":"game_state","state":{"board":[["X",null,null],[null,null,null],[null,null,null]],"next_turn":"B"}}"#,
        );

        assert!(applied);
        let state = room.snapshot();
        assert_eq!(state.board.get(0, 0), Some(Some(Mark::X)));
        assert_eq!(state.next_turn.as_deref(), Some("B"));
        assert_eq!(state.players, snapshot().players);
        assert!(!state.finished);
        assert!(!room.is_move_pending());
    }

    #[test]
    fn server_error_sets_text_and_keeps_board() {
        let mut mock = open_mock();
        mock.expect_send().times(1).returning(|_| Ok(()));
        let mut room = open_room(mock);
        room.request_move(0, 0, "A").expect("admitted");

        assert!(room.on_server_event(r#"{"error":"cell occupied"}"#));

        assert_eq!(room.error(), Some("cell occupied"));
        assert!(!room.is_move_pending());
        assert_eq!(room.snapshot().board, Board::empty());
    }

    #[test]
    fn game_state_clears_previous_error() {
        let mut room = open_room(open_mock());
        room.on_server_event(r#"{"error":"not your turn"}"#);

        room.on_server_event(r#"{"type":"game_state","state":{"next_turn":"A"}}"#);

        assert_eq!(room.error(), None);
    }

    #[test]
    fn malformed_input_changes_nothing() {
        let mut mock = open_mock();
        mock.expect_send().times(1).returning(|_| Ok(()));
        let mut room = open_room(mock);
        room.request_move(2, 2, "A").expect("admitted");
        let before = room.snapshot().clone();

        for raw in [
            "not json",
            "[1,2,3]",
            r#"{"type":"game_state","state":"oops"}"#,
            r#"{"type":"chat","text":"hi"}"#,
            r#"{"error":""}"#,
        ] {
            assert!(!room.on_server_event(raw), "accepted {raw}");
        }

        assert_eq!(room.snapshot(), &before);
        assert!(room.is_move_pending());
        assert_eq!(room.error(), None);
        assert_eq!(room.phase(), ConnectionState::Open);
    }

    #[test]
    fn game_state_with_bad_board_still_merges_and_clears_pending() {
        let mut mock = open_mock();
        mock.expect_send().times(1).returning(|_| Ok(()));
        let mut room = open_room(mock);
        room.request_move(0, 0, "A").expect("admitted");
        let board_before = room.snapshot().board.clone();

        let accepted = room.on_server_event(
            r#"{"type":"game_state","state":{"board":[["X","?",null],[null,null,null],[null,null,null]],"next_turn":"B"}}"#,
        );

        assert!(accepted);
        assert!(!room.is_move_pending());
        assert_eq!(room.snapshot().board, board_before);
        assert_eq!(room.snapshot().next_turn.as_deref(), Some("B"));
        assert_eq!(room.error(), None);
    }

    #[test]
    fn explicit_null_clears_next_turn_and_winner() {
        let mut state = snapshot();
        state.winner = Some("A".into());
        let patch: SnapshotPatch =
            serde_json::from_str(r#"{"next_turn":null,"winner":null,"finished":true}"#)
                .expect("valid patch");

        merge_patch(&mut state, patch);

        assert_eq!(state.next_turn, None);
        assert_eq!(state.winner, None);
        assert!(state.finished);
        assert_eq!(state.players.len(), 2);
    }

    #[test]
    fn transport_failure_shows_error_and_stays_open() {
        let mut room = open_room(open_mock());

        room.handle_transport_event(TransportEvent::Failed("reset by peer".into()));

        assert_eq!(room.phase(), ConnectionState::Open);
        assert_eq!(room.error(), Some(CONNECTION_FAILED));
    }

    #[test]
    fn failed_handshake_moves_to_open_with_error() {
        let mut mock = MockGameConnectionPort::new();
        mock.expect_state().return_const(ConnectionState::Closed);
        mock.expect_close().return_const(());
        mock.expect_send().never();
        let (mut room, _tx) = room_with(mock, snapshot());

        room.handle_transport_event(TransportEvent::Failed("refused".into()));

        assert_eq!(room.phase(), ConnectionState::Open);
        assert_eq!(room.error(), Some(CONNECTION_FAILED));
        assert_eq!(room.request_move(0, 0, "A"), Err(MoveRejection::NotOpen));
    }

    #[test]
    fn remote_close_is_terminal() {
        let mut room = open_room(open_mock());

        room.handle_transport_event(TransportEvent::Closed);
        room.handle_transport_event(TransportEvent::Opened);
        room.handle_transport_event(TransportEvent::Message(
            r#"{"type":"game_state","state":{"finished":true}}"#.into(),
        ));

        assert_eq!(room.phase(), ConnectionState::Closed);
        assert_eq!(room.error(), Some(CONNECTION_CLOSED));
        assert!(!room.snapshot().finished);
    }

    #[test]
    fn close_after_finished_game_shows_no_error() {
        let mut room = open_room(open_mock());
        room.on_server_event(r#"{"type":"game_state","state":{"finished":true,"winner":"A"}}"#);

        room.handle_transport_event(TransportEvent::Closed);

        assert_eq!(room.error(), None);
    }

    #[test]
    fn send_failure_clears_pending_and_reports() {
        let mut mock = open_mock();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(ConnectionError::Closed));
        let mut room = open_room(mock);

        assert_eq!(
            room.request_move(0, 0, "A"),
            Err(MoveRejection::SendFailed(ConnectionError::Closed))
        );
        assert!(!room.is_move_pending());
        assert_eq!(room.error(), Some(CONNECTION_FAILED));
    }

    #[test]
    fn leave_closes_exactly_once() {
        let mut mock = MockGameConnectionPort::new();
        mock.expect_state().return_const(ConnectionState::Open);
        mock.expect_close().times(1).return_const(());
        let room = open_room(mock);

        room.leave();
    }

    #[test]
    fn dropping_the_handle_closes_the_connection() {
        let mut mock = MockGameConnectionPort::new();
        mock.expect_close().times(1).return_const(());
        let (room, _tx) = room_with(mock, snapshot());

        drop(room);
    }

    #[tokio::test]
    async fn next_event_yields_transport_events_in_order() {
        let (mut room, tx) = room_with(open_mock(), snapshot());
        tx.unbounded_send(TransportEvent::Opened).expect("send");
        tx.unbounded_send(TransportEvent::Message("{}".into()))
            .expect("send");
        drop(tx);

        assert_eq!(room.next_event().await, Some(TransportEvent::Opened));
        assert_eq!(
            room.next_event().await,
            Some(TransportEvent::Message("{}".into()))
        );
        assert_eq!(room.next_event().await, None);
    }
}
