//! Shared type definitions
//!
//! Board, player and room types exchanged with the game backend over both
//! REST and the per-room WebSocket.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::ProtocolError;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 3;

// =============================================================================
// Board
// =============================================================================

/// A player's mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire shape of a board: rows of nullable cell strings.
type RawBoard = Vec<Vec<Option<String>>>;

/// 3x3 board, row-major. `None` is an empty cell.
///
/// On the wire a board is a nested array of `"X"`, `"O"` or `null`. Empty
/// strings are accepted as empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard", into = "RawBoard")]
pub struct Board([[Option<Mark>; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cell at `(row, col)`. Returns `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Option<Mark>> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True only for an in-bounds cell that holds no mark.
    pub fn is_cell_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Place a mark. Out-of-bounds coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, mark: Option<Mark>) {
        if let Some(cell) = self.0.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = mark;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Mark>; BOARD_SIZE]> {
        self.0.iter()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.0
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(mark))
            .count()
    }

    /// X moves first, so X may lead O by at most one mark.
    pub fn is_consistent(&self) -> bool {
        let x = self.count(Mark::X);
        let o = self.count(Mark::O);
        x == o || x == o + 1
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = ProtocolError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.len() != BOARD_SIZE || raw.iter().any(|row| row.len() != BOARD_SIZE) {
            return Err(ProtocolError::InvalidBoard(format!(
                "expected {BOARD_SIZE}x{BOARD_SIZE} cells"
            )));
        }

        let mut board = Board::empty();
        for (r, row) in raw.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                let mark = match cell.as_deref() {
                    None | Some("") => None,
                    Some("X") => Some(Mark::X),
                    Some("O") => Some(Mark::O),
                    Some(other) => {
                        return Err(ProtocolError::InvalidBoard(format!(
                            "unknown cell value {other:?}"
                        )))
                    }
                };
                board.set(r, c, mark);
            }
        }
        Ok(board)
    }
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> Self {
        board
            .0
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|m| m.as_str().to_string()))
                    .collect()
            })
            .collect()
    }
}

// =============================================================================
// Players & Rooms
// =============================================================================

/// A seated player. `username` is the display name used for turn tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub username: String,
}

impl PlayerInfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Room entry returned by the lobby listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: String,
    #[serde(default)]
    pub players: Vec<PlayerInfo>,
    #[serde(default)]
    pub finished: bool,
}

/// Full match state as returned by create/join and pushed by the server.
///
/// `players[0]` plays X, `players[1]` plays O. `next_turn` is meaningless
/// once `finished` is set; `winner` is meaningless until then, and `None`
/// on a finished game means a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub room_id: String,
    #[serde(default)]
    pub board: Board,
    #[serde(default)]
    pub players: Vec<PlayerInfo>,
    #[serde(default)]
    pub next_turn: Option<String>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub winner: Option<String>,
}

/// Partial snapshot carried by a `game_state` event.
///
/// Absent fields leave the local value untouched. For `next_turn` and
/// `winner` an explicit `null` is distinct from absence: `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Board>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerInfo>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_turn: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub winner: Option<Option<String>>,
}

impl SnapshotPatch {
    /// Decode a `game_state` payload one field at a time.
    ///
    /// A field whose value does not decode is left out of the patch and its
    /// name returned, so one bad value never drops the rest of the update.
    pub fn from_state(state: Map<String, Value>) -> (Self, Vec<String>) {
        let mut patch = Self::default();
        let mut skipped = Vec::new();

        for (key, value) in state {
            let decoded = match key.as_str() {
                "board" => decode(value).map(|v| patch.board = Some(v)),
                "players" => decode(value).map(|v| patch.players = Some(v)),
                "next_turn" => decode(value).map(|v| patch.next_turn = Some(v)),
                "finished" => decode(value).map(|v| patch.finished = Some(v)),
                "winner" => decode(value).map(|v| patch.winner = Some(v)),
                _ => continue,
            };
            if decoded.is_none() {
                skipped.push(key);
            }
        }

        (patch, skipped)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn board_accepts_null_and_empty_string_cells() {
        let board: Board =
            serde_json::from_value(json!([["X", null, ""], [null, "O", null], [null, null, null]]))
                .expect("valid board");

        assert_eq!(board.get(0, 0), Some(Some(Mark::X)));
        assert!(board.is_cell_empty(0, 1));
        assert!(board.is_cell_empty(0, 2));
        assert_eq!(board.get(1, 1), Some(Some(Mark::O)));
        assert!(board.is_consistent());
    }

    #[test]
    fn board_rejects_wrong_shape() {
        let result = serde_json::from_value::<Board>(json!([["X", null], [null, null]]));
        assert!(result.is_err());
    }

    #[test]
    fn board_rejects_unknown_marks() {
        let result = serde_json::from_value::<Board>(json!([
            ["Z", null, null],
            [null, null, null],
            [null, null, null]
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn board_out_of_bounds_is_never_empty() {
        let board = Board::empty();
        assert_eq!(board.get(3, 0), None);
        assert!(!board.is_cell_empty(0, 3));
    }

    #[test]
    fn board_consistency_tracks_mark_counts() {
        let mut board = Board::empty();
        board.set(0, 0, Some(Mark::O));
        assert!(!board.is_consistent());

        board.set(1, 1, Some(Mark::X));
        assert!(board.is_consistent());

        board.set(2, 2, Some(Mark::X));
        board.set(2, 1, Some(Mark::X));
        assert!(!board.is_consistent());
    }

    #[test]
    fn board_serializes_as_nested_nullable_strings() {
        let mut board = Board::empty();
        board.set(0, 0, Some(Mark::X));

        let value = serde_json::to_value(&board).expect("serializable");
        assert_eq!(
            value,
            json!([["X", null, null], [null, null, null], [null, null, null]])
        );
    }

    #[test]
    fn snapshot_defaults_missing_fields() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "room_id": "r1",
            "players": [{"username": "alice"}]
        }))
        .expect("valid snapshot");

        assert_eq!(snapshot.board, Board::empty());
        assert_eq!(snapshot.next_turn, None);
        assert!(!snapshot.finished);
        assert_eq!(snapshot.winner, None);
    }

    #[test]
    fn state_decoding_skips_only_bad_fields() {
        let state = json!({
            "board": [["Z", null, null], [null, null, null], [null, null, null]],
            "next_turn": null,
            "finished": "soon",
            "players": [{"username": "a"}],
            "room_id": "ignored"
        });
        let Value::Object(state) = state else {
            panic!("object literal");
        };

        let (patch, mut skipped) = SnapshotPatch::from_state(state);
        skipped.sort();

        assert_eq!(skipped, vec!["board".to_string(), "finished".to_string()]);
        assert_eq!(patch.board, None);
        assert_eq!(patch.finished, None);
        assert_eq!(patch.next_turn, Some(None));
        assert_eq!(patch.players, Some(vec![PlayerInfo::new("a")]));
        assert_eq!(patch.winner, None);
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch: SnapshotPatch =
            serde_json::from_value(json!({"winner": null, "finished": true}))
                .expect("valid patch");

        assert_eq!(patch.winner, Some(None));
        assert_eq!(patch.next_turn, None);
        assert_eq!(patch.finished, Some(true));
        assert_eq!(patch.board, None);
    }
}
