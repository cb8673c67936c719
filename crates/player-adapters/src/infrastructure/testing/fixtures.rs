//! Simple test fixtures used across unit tests.

use tictac_protocol::{Board, GameSnapshot, PlayerInfo};

/// Fresh game in `room_id` with `players` seated and the first to move.
pub fn new_game(room_id: &str, players: &[&str]) -> GameSnapshot {
    GameSnapshot {
        room_id: room_id.to_string(),
        board: Board::empty(),
        players: players.iter().map(|p| PlayerInfo::new(*p)).collect(),
        next_turn: players.first().map(|p| p.to_string()),
        finished: false,
        winner: None,
    }
}

/// `game_state` frame carrying `state` verbatim.
pub fn game_state_frame(state: serde_json::Value) -> String {
    serde_json::json!({ "type": "game_state", "state": state }).to_string()
}
