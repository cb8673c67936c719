//! Lobby - Room listing, creation and joining
//!
//! Create and join are the only producers of the snapshot a game room
//! starts from.

use std::fmt;

use tictac_protocol::{CreateRoomRequest, GameSnapshot, JoinRoomRequest, RoomSummary};

use super::Session;
use crate::application::{Api, ServiceError};

/// Seats per room.
pub const ROOM_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Waiting,
    InProgress,
    Finished,
}

impl RoomStatus {
    pub fn of(room: &RoomSummary) -> Self {
        if room.finished {
            RoomStatus::Finished
        } else if room.players.len() >= ROOM_CAPACITY {
            RoomStatus::InProgress
        } else {
            RoomStatus::Waiting
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomStatus::Waiting => "Waiting",
            RoomStatus::InProgress => "In Progress",
            RoomStatus::Finished => "Finished",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn is_joinable(room: &RoomSummary) -> bool {
    RoomStatus::of(room) == RoomStatus::Waiting
}

#[derive(Clone)]
pub struct LobbyService {
    api: Api,
}

impl LobbyService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Open rooms. No session needed.
    pub async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ServiceError> {
        self.api.get("/game/list", None).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to list rooms");
            ServiceError::RoomsUnavailable
        })
    }

    /// Create a room with the session's user in seat 0.
    pub async fn create_room(&self, session: &Session) -> Result<GameSnapshot, ServiceError> {
        let body = CreateRoomRequest {
            nickname: session.username.clone(),
        };
        let snapshot: GameSnapshot = self
            .api
            .post("/game/create", &body, session.bearer())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to create room");
                ServiceError::CreateRoomFailed
            })?;

        tracing::info!(room_id = %snapshot.room_id, "Created room");
        Ok(snapshot)
    }

    pub async fn join_room(
        &self,
        session: &Session,
        room_id: &str,
    ) -> Result<GameSnapshot, ServiceError> {
        let body = JoinRoomRequest {
            room_id: room_id.to_string(),
            nickname: session.username.clone(),
        };
        let snapshot: GameSnapshot = self
            .api
            .post("/game/join", &body, session.bearer())
            .await
            .map_err(|e| {
                tracing::warn!(%room_id, error = %e, "Failed to join room");
                ServiceError::JoinRoomFailed
            })?;

        tracing::info!(room_id = %snapshot.room_id, "Joined room");
        Ok(snapshot)
    }
}
