//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the backend and the local
//! machine without depending on concrete implementations.

pub mod api_port;
pub mod game_connection_port;
pub mod platform;
pub mod raw_api_port;

pub use api_port::ApiError;
pub use game_connection_port::{
    ConnectionError, ConnectionFactoryPort, ConnectionState, GameConnectionPort, RoomConnection,
    TransportEvent,
};
pub use platform::{storage_keys, StorageProvider};
pub use raw_api_port::RawApiPort;

#[cfg(any(test, feature = "testing"))]
pub use game_connection_port::MockGameConnectionPort;
