//! Command parsing for the terminal shell.
//!
//! Turns one input line into a structured [`Command`].

/// Parsed command from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/login` with no arguments opens the sign-in view.
    LoginForm,
    RegisterForm,
    Login { username: String, password: String },
    Register { username: String, password: String },
    Logout,

    /// Show the lobby and refresh its room list.
    Lobby,
    CreateRoom,
    JoinRoom { room_id: String },

    /// Place a mark in the active room.
    Move { row: usize, col: usize },
    /// Leave the active room.
    Leave,

    History,
    Leaderboard,

    Help,
    Quit,

    /// Blank line; redraws the current view.
    Redraw,

    Unknown { input: String },

    /// Known command with missing or invalid arguments.
    InvalidArgs { command: String, error: String },
}

/// Parse a user input line.
///
/// Commands start with `/`. Inside a room, two bare numbers are
/// shorthand for `/move`.
pub fn parse(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Redraw;
    }

    let Some(cmd_str) = input.strip_prefix('/') else {
        return match parse_cell(&input.split_whitespace().collect::<Vec<_>>()) {
            Some((row, col)) => Command::Move { row, col },
            None => Command::Unknown {
                input: input.to_string(),
            },
        };
    };

    let parts: Vec<&str> = cmd_str.split_whitespace().collect();
    let command = parts.first().copied().unwrap_or("");
    let args = parts.get(1..).unwrap_or(&[]);

    match command {
        "login" => match args {
            [] => Command::LoginForm,
            [username, password] => Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            },
            _ => invalid("login", "Usage: /login <username> <password>"),
        },

        "register" => match args {
            [] => Command::RegisterForm,
            [username, password] => Command::Register {
                username: username.to_string(),
                password: password.to_string(),
            },
            _ => invalid("register", "Usage: /register <username> <password>"),
        },

        "logout" => Command::Logout,

        "lobby" | "rooms" | "refresh" => Command::Lobby,

        "create" => Command::CreateRoom,

        "join" => match args {
            [room_id] => Command::JoinRoom {
                room_id: room_id.to_string(),
            },
            _ => invalid("join", "Usage: /join <room_id>"),
        },

        "move" | "m" => match parse_cell(args) {
            Some((row, col)) => Command::Move { row, col },
            None => invalid("move", "Usage: /move <row> <col> (0-2)"),
        },

        "leave" => Command::Leave,

        "history" => Command::History,

        "leaderboard" | "scores" => Command::Leaderboard,

        "help" | "h" | "?" => Command::Help,

        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown {
            input: input.to_string(),
        },
    }
}

fn parse_cell(args: &[&str]) -> Option<(usize, usize)> {
    match args {
        [row, col] => Some((row.parse().ok()?, col.parse().ok()?)),
        _ => None,
    }
}

fn invalid(command: &str, error: &str) -> Command {
    Command::InvalidArgs {
        command: command.to_string(),
        error: error.to_string(),
    }
}

pub const HELP: &str = "\
Commands:
  /login <username> <password>     sign in
  /register <username> <password>  create an account and sign in
  /login, /register                show the sign-in or sign-up form
  /lobby                           list open rooms (also /rooms)
  /create                          create a room and enter it
  /join <room_id>                  join a room
  /move <row> <col>                place your mark (or just: <row> <col>)
  /leave                           leave the current game
  /history                         your finished games
  /leaderboard                     player stats
  /logout                          sign out
  /quit                            exit";
