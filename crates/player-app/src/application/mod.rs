//! Application layer - Use cases and orchestration

pub mod api;
pub mod error;
pub mod game_room;
pub mod navigation;
pub mod services;

// Re-export common types
pub use api::Api;
pub use error::ServiceError;
