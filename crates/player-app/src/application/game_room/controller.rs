//! Single-active-room ownership.

use std::sync::Arc;

use tictac_player_ports::outbound::{ConnectionFactoryPort, TransportEvent};
use tictac_protocol::GameSnapshot;

use super::GameRoom;

/// Owns at most one [`GameRoom`].
///
/// Entering a room leaves the current one first, so its connection is
/// closed before the next one is opened.
pub struct RoomController {
    factory: Arc<dyn ConnectionFactoryPort>,
    active: Option<GameRoom>,
}

impl RoomController {
    pub fn new(factory: Arc<dyn ConnectionFactoryPort>) -> Self {
        Self {
            factory,
            active: None,
        }
    }

    pub fn enter(&mut self, snapshot: GameSnapshot) -> &mut GameRoom {
        self.leave();
        self.active.insert(GameRoom::enter(self.factory.as_ref(), snapshot))
    }

    /// Leave the active room, if any. Returns whether one was active.
    pub fn leave(&mut self) -> bool {
        match self.active.take() {
            Some(room) => {
                room.leave();
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Option<&GameRoom> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut GameRoom> {
        self.active.as_mut()
    }

    /// Next transport event of the active room.
    ///
    /// Pends forever when no room is active or its stream has ended, so it
    /// can sit in a `select!` next to other sources.
    pub async fn next_event(&mut self) -> TransportEvent {
        if let Some(room) = self.active.as_mut() {
            if let Some(event) = room.next_event().await {
                return event;
            }
        }
        std::future::pending().await
    }
}
