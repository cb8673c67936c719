//! TicTac Player App - Application layer of the player client
//!
//! Services talk to the backend through the ports crate and never see a
//! concrete transport. The game-room sync core lives in
//! [`application::game_room`].

pub mod application;
