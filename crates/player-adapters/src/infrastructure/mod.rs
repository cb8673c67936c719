//! Infrastructure layer - External adapters

pub mod connection_factory;
pub mod http_client;
pub mod platform;
pub mod websocket;

// Re-export adapters for the composition root
pub use connection_factory::ConnectionFactory;
pub use http_client::ApiAdapter;
pub use platform::DesktopStorageProvider;

// Test-only infrastructure fakes (ports/adapters).
// Available for integration testing from other crates as well
pub mod testing;
