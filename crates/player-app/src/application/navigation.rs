//! View navigation rules
//!
//! Which screen the shell shows is a function of the requested view, whether
//! a session exists, and whether a room is active.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    Lobby,
    Game,
    History,
    Leaderboard,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Login",
            View::Register => "Register",
            View::Lobby => "Lobby",
            View::Game => "Game",
            View::History => "Match History",
            View::Leaderboard => "Leaderboard",
        }
    }

    pub fn requires_session(self) -> bool {
        !matches!(self, View::Login | View::Register)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Tracks the requested view and resolves it against the current context.
#[derive(Debug, Clone)]
pub struct Navigator {
    requested: View,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            requested: View::Lobby,
        }
    }

    pub fn requested(&self) -> View {
        self.requested
    }

    pub fn go_to(&mut self, view: View) {
        self.requested = view;
    }

    /// The view actually shown.
    ///
    /// Without a session only the auth views are reachable. With one, the
    /// auth views fall through to the lobby, as does the game view when no
    /// room is active.
    pub fn resolve(&self, authenticated: bool, in_room: bool) -> View {
        match (authenticated, self.requested) {
            (false, View::Register) => View::Register,
            (false, _) => View::Login,
            (true, View::Login | View::Register) => View::Lobby,
            (true, View::Game) if !in_room => View::Lobby,
            (true, view) => view,
        }
    }

    pub fn on_authenticated(&mut self) {
        self.requested = View::Lobby;
    }

    pub fn on_logout(&mut self) {
        self.requested = View::Login;
    }

    pub fn on_room_entered(&mut self) {
        self.requested = View::Game;
    }

    pub fn on_room_left(&mut self) {
        self.requested = View::Lobby;
    }
}
