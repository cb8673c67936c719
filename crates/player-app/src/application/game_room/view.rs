//! Pure derivations over a room snapshot, from one viewer's perspective.

use std::fmt;

use tictac_protocol::GameSnapshot;

/// The mark a viewer plays with, by seat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSymbol {
    X,
    O,
    /// Spectator, or a name not (yet) seated.
    Unknown,
}

impl PlayerSymbol {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerSymbol::X => "X",
            PlayerSymbol::O => "O",
            PlayerSymbol::Unknown => "?",
        }
    }
}

impl fmt::Display for PlayerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seat 0 plays X, seat 1 plays O.
pub fn derive_symbol(snapshot: &GameSnapshot, name: &str) -> PlayerSymbol {
    match snapshot.players.iter().position(|p| p.username == name) {
        Some(0) => PlayerSymbol::X,
        Some(1) => PlayerSymbol::O,
        _ => PlayerSymbol::Unknown,
    }
}

pub fn derive_status_text(snapshot: &GameSnapshot, name: &str) -> String {
    if snapshot.finished {
        return match snapshot.winner.as_deref() {
            Some(winner) if winner == name => "You Win!".to_string(),
            Some(winner) => format!("{winner} Wins!"),
            None => "Draw".to_string(),
        };
    }

    match snapshot.next_turn.as_deref() {
        Some(turn) if turn == name => "Your turn!".to_string(),
        Some(turn) => format!("Waiting for {turn}'s move..."),
        None => "Waiting for opponent...".to_string(),
    }
}

pub fn is_viewer_turn(snapshot: &GameSnapshot, name: &str) -> bool {
    !snapshot.finished && snapshot.next_turn.as_deref() == Some(name)
}

/// Whether the viewer may click `(row, col)`.
pub fn is_cell_playable(snapshot: &GameSnapshot, name: &str, row: usize, col: usize) -> bool {
    is_viewer_turn(snapshot, name) && snapshot.board.is_cell_empty(row, col)
}

/// `"X: alice | O: bob"`, with blanks for empty seats.
pub fn seat_line(snapshot: &GameSnapshot) -> String {
    let seat = |i: usize| {
        snapshot
            .players
            .get(i)
            .map(|p| p.username.as_str())
            .unwrap_or("")
    };
    format!("X: {} | O: {}", seat(0), seat(1))
}

pub fn leave_label(snapshot: &GameSnapshot) -> &'static str {
    if snapshot.finished {
        "Return to Lobby"
    } else {
        "Leave Game"
    }
}
