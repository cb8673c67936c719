//! Terminal shell state
//!
//! Owns the session, the navigator and the single active room. Every
//! mutation goes through `&mut self` from the runner's event loop.

use std::sync::Arc;

use tictac_player_app::application::game_room::{GameRoom, MoveRejection, RoomController};
use tictac_player_app::application::navigation::{Navigator, View};
use tictac_player_app::application::services::{
    AuthService, HistoryService, LeaderboardService, LobbyService, Session, SessionService,
};
use tictac_player_app::application::Api;
use tictac_player_ports::outbound::{ConnectionFactoryPort, StorageProvider, TransportEvent};
use tictac_protocol::{GameSnapshot, HistoryRecord, RoomSummary, ScoreboardEntry};

use crate::commands::{Command, HELP};
use crate::render;

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<S: StorageProvider> {
    auth: AuthService,
    lobby: LobbyService,
    history: HistoryService,
    leaderboard: LeaderboardService,
    sessions: SessionService<S>,
    rooms: RoomController,
    navigator: Navigator,
    session: Option<Session>,
    lobby_rooms: Vec<RoomSummary>,
    history_records: Vec<HistoryRecord>,
    scoreboard: Vec<ScoreboardEntry>,
    /// Message for the current view; cleared by the next command.
    notice: Option<String>,
}

impl<S: StorageProvider> Shell<S> {
    pub fn new(api: Api, storage: S, connections: Arc<dyn ConnectionFactoryPort>) -> Self {
        let sessions = SessionService::new(storage);
        let session = sessions.restore();

        Self {
            auth: AuthService::new(api.clone()),
            lobby: LobbyService::new(api.clone()),
            history: HistoryService::new(api.clone()),
            leaderboard: LeaderboardService::new(api),
            sessions,
            rooms: RoomController::new(connections),
            navigator: Navigator::new(),
            session,
            lobby_rooms: Vec::new(),
            history_records: Vec::new(),
            scoreboard: Vec::new(),
            notice: None,
        }
    }

    /// The view actually shown.
    pub fn view(&self) -> View {
        self.navigator
            .resolve(self.session.is_some(), self.rooms.active().is_some())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn active_room(&self) -> Option<&GameRoom> {
        self.rooms.active()
    }

    pub fn lobby_rooms(&self) -> &[RoomSummary] {
        &self.lobby_rooms
    }

    /// Load whatever the initial view needs.
    pub async fn start(&mut self) {
        self.load_view().await;
    }

    pub async fn handle_command(&mut self, command: Command) -> Flow {
        self.notice = None;

        match command {
            Command::Quit => return Flow::Quit,
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Redraw => {}
            Command::Unknown { input } => {
                self.notice = Some(format!("Unknown command: {input} (try /help)"));
            }
            Command::InvalidArgs { error, .. } => self.notice = Some(error),

            Command::LoginForm => self.navigate(View::Login).await,
            Command::RegisterForm => self.navigate(View::Register).await,
            Command::Login { username, password } => {
                if self.ensure_signed_out() {
                    let result = self.auth.login(&username, &password).await;
                    self.complete_auth(result).await;
                }
            }
            Command::Register { username, password } => {
                if self.ensure_signed_out() {
                    let result = self.auth.register(&username, &password).await;
                    self.complete_auth(result).await;
                }
            }
            Command::Logout => self.logout(),

            Command::Lobby => self.navigate(View::Lobby).await,
            Command::History => self.navigate(View::History).await,
            Command::Leaderboard => self.navigate(View::Leaderboard).await,

            Command::CreateRoom => self.create_room().await,
            Command::JoinRoom { room_id } => self.join_room(&room_id).await,
            Command::Move { row, col } => self.request_move(row, col),
            Command::Leave => self.leave_room().await,
        }

        Flow::Continue
    }

    /// Next transport event of the active room; pends while there is none.
    pub async fn next_room_event(&mut self) -> TransportEvent {
        self.rooms.next_event().await
    }

    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        if let Some(room) = self.rooms.active_mut() {
            room.handle_transport_event(event);
        }
    }

    /// Leave any active room before exit.
    pub fn shutdown(&mut self) {
        self.rooms.leave();
    }

    pub fn render(&self) -> String {
        let view = self.view();
        let username = self.session.as_ref().map(|s| s.username.as_str());

        let body = match view {
            View::Login => render::login_form(),
            View::Register => render::register_form(),
            View::Lobby => render::lobby(&self.lobby_rooms),
            View::History => render::history(&self.history_records),
            View::Leaderboard => render::leaderboard(&self.scoreboard),
            View::Game => match (self.rooms.active(), username) {
                (Some(room), Some(name)) => render::room(room, name),
                _ => String::new(),
            },
        };

        let mut out = format!("{}\n{}", render::header(username, view), body);
        if let Some(notice) = &self.notice {
            out.push_str(&format!("\n\n{notice}"));
        }
        out
    }

    fn ensure_signed_out(&mut self) -> bool {
        match &self.session {
            Some(session) => {
                self.notice = Some(format!(
                    "Already signed in as {}. Use /logout first.",
                    session.username
                ));
                false
            }
            None => true,
        }
    }

    async fn complete_auth(
        &mut self,
        result: Result<Session, tictac_player_app::application::ServiceError>,
    ) {
        match result {
            Ok(session) => {
                self.sessions.save(&session);
                self.session = Some(session);
                self.navigator.on_authenticated();
                self.load_view().await;
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn logout(&mut self) {
        self.rooms.leave();
        self.sessions.clear();
        self.session = None;
        self.history_records.clear();
        self.scoreboard.clear();
        self.navigator.on_logout();
        tracing::info!("Logged out");
    }

    /// Switch views. Navigating away from a game leaves it.
    async fn navigate(&mut self, target: View) {
        if target != View::Game && self.rooms.leave() {
            self.navigator.on_room_left();
        }
        self.navigator.go_to(target);

        if target.requires_session() && self.session.is_none() {
            self.notice = Some("Please log in first.".to_string());
        }
        self.load_view().await;
    }

    async fn load_view(&mut self) {
        match self.view() {
            View::Lobby => match self.lobby.list_rooms().await {
                Ok(rooms) => self.lobby_rooms = rooms,
                Err(e) => self.notice = Some(e.to_string()),
            },
            View::History => {
                if let Some(session) = &self.session {
                    match self.history.history(session).await {
                        Ok(records) => self.history_records = records,
                        Err(e) => self.notice = Some(e.to_string()),
                    }
                }
            }
            View::Leaderboard => {
                if let Some(session) = &self.session {
                    match self.leaderboard.leaderboard(session).await {
                        Ok(entries) => self.scoreboard = entries,
                        Err(e) => self.notice = Some(e.to_string()),
                    }
                }
            }
            View::Login | View::Register | View::Game => {}
        }
    }

    async fn create_room(&mut self) {
        let Some(session) = self.require_session() else {
            return;
        };
        match self.lobby.create_room(&session).await {
            Ok(snapshot) => self.enter_room(snapshot),
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    async fn join_room(&mut self, room_id: &str) {
        let Some(session) = self.require_session() else {
            return;
        };
        match self.lobby.join_room(&session, room_id).await {
            Ok(snapshot) => self.enter_room(snapshot),
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn enter_room(&mut self, snapshot: GameSnapshot) {
        self.rooms.enter(snapshot);
        self.navigator.on_room_entered();
    }

    fn request_move(&mut self, row: usize, col: usize) {
        let Some(session) = &self.session else {
            self.notice = Some("Please log in first.".to_string());
            return;
        };
        let Some(room) = self.rooms.active_mut() else {
            self.notice = Some("You are not in a game.".to_string());
            return;
        };

        match room.request_move(row, col, &session.username) {
            Ok(()) => {}
            // The room shows its own error text.
            Err(MoveRejection::SendFailed(_)) => {}
            Err(rejection) => self.notice = Some(format!("Move not sent: {rejection}")),
        }
    }

    async fn leave_room(&mut self) {
        if self.rooms.leave() {
            self.navigator.on_room_left();
            self.load_view().await;
        } else {
            self.notice = Some("You are not in a game.".to_string());
        }
    }

    fn require_session(&mut self) -> Option<Session> {
        if self.session.is_none() {
            self.notice = Some("Please log in first.".to_string());
        }
        self.session.clone()
    }
}
