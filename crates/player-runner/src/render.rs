//! Plain-text rendering of the shell's views.
//!
//! Everything here is a pure function of state so it can be tested without
//! a terminal.

use tictac_player_app::application::game_room::view::{
    derive_status_text, derive_symbol, is_cell_playable, is_viewer_turn, leave_label, seat_line,
};
use tictac_player_app::application::game_room::GameRoom;
use tictac_player_app::application::navigation::View;
use tictac_player_app::application::services::{
    history_row, is_joinable, RoomStatus, NO_HISTORY_TEXT, NO_STATS_TEXT,
};
use tictac_player_ports::outbound::ConnectionState;
use tictac_protocol::{GameSnapshot, HistoryRecord, RoomSummary, ScoreboardEntry, BOARD_SIZE};

pub const APP_TITLE: &str = "Online Tic Tac Toe";

pub const NO_ROOMS_TEXT: &str = "No open rooms. Create one!";

pub fn header(username: Option<&str>, view: View) -> String {
    let mut line = APP_TITLE.to_string();
    if let Some(name) = username {
        line.push_str(&format!("  |  Welcome, {name}!"));
    }
    format!("{line}\n== {} ==", view.title())
}

pub fn login_form() -> String {
    [
        "Sign in with:  /login <username> <password>",
        "No account?    /register",
    ]
    .join("\n")
}

pub fn register_form() -> String {
    [
        "Create an account:  /register <username> <password>",
        "Username 3-32 characters, password 6-64 characters.",
        "Already registered? /login",
    ]
    .join("\n")
}

pub fn lobby(rooms: &[RoomSummary]) -> String {
    if rooms.is_empty() {
        return format!("{NO_ROOMS_TEXT}\n\n/create  /rooms  /history  /leaderboard");
    }

    let rows: Vec<Vec<String>> = rooms
        .iter()
        .map(|room| {
            vec![
                room.room_id.clone(),
                room.players
                    .iter()
                    .map(|p| p.username.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                RoomStatus::of(room).label().to_string(),
                if is_joinable(room) {
                    format!("/join {}", room.room_id)
                } else {
                    String::new()
                },
            ]
        })
        .collect();

    format!(
        "{}\n\n/create  /rooms  /history  /leaderboard",
        table(&["Room", "Players", "Status", ""], &rows)
    )
}

pub fn history(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return NO_HISTORY_TEXT.to_string();
    }
    let rows: Vec<Vec<String>> = records.iter().map(|r| history_row(r).to_vec()).collect();
    table(&["Room", "Players", "Winner", "Finished"], &rows)
}

pub fn leaderboard(entries: &[ScoreboardEntry]) -> String {
    if entries.is_empty() {
        return NO_STATS_TEXT.to_string();
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.username.clone(),
                e.wins.to_string(),
                e.losses.to_string(),
                e.draws.to_string(),
                e.games_played.to_string(),
            ]
        })
        .collect();
    table(&["Username", "Wins", "Losses", "Draws", "Games"], &rows)
}

pub fn room(room: &GameRoom, viewer: &str) -> String {
    let state = room.snapshot();
    let mut lines = vec![
        format!("Room {}", state.room_id),
        format!("You are {}.", derive_symbol(state, viewer)),
        seat_line(state),
        String::new(),
        board(state),
        String::new(),
        derive_status_text(state, viewer),
    ];

    if room.phase() == ConnectionState::Connecting {
        lines.push("Connecting...".to_string());
    }
    if room.is_move_pending() {
        lines.push("Waiting for server...".to_string());
    } else if is_viewer_turn(state, viewer) && room.phase() == ConnectionState::Open {
        let open: Vec<String> = cells()
            .filter(|&(r, c)| is_cell_playable(state, viewer, r, c))
            .map(|(r, c)| format!("{r} {c}"))
            .collect();
        lines.push(format!("Open cells: {}", open.join(", ")));
    }
    if let Some(error) = room.error() {
        lines.push(format!("Error: {error}"));
    }
    lines.push(format!("/leave  ({})", leave_label(state)));

    lines.join("\n")
}

/// Grid with row/column indices; empty cells stay blank.
pub fn board(state: &GameSnapshot) -> String {
    let mut out = String::from("    0   1   2\n");
    for (r, row) in state.board.rows().enumerate() {
        let cells: Vec<&str> = row
            .iter()
            .map(|cell| cell.map(|m| m.as_str()).unwrap_or(" "))
            .collect();
        out.push_str(&format!("{r}   {}\n", cells.join(" | ")));
        if r + 1 < BOARD_SIZE {
            out.push_str("   ---+---+---\n");
        }
    }
    out.trim_end().to_string()
}

fn cells() -> impl Iterator<Item = (usize, usize)> {
    (0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut lines = vec![format_row(headers, &widths)];
    lines.push(
        widths
            .iter()
            .filter(|w| **w > 0)
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_row(&cells, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
