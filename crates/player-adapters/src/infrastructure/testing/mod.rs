//! Test-only infrastructure fakes.
//!
//! These helpers implement outbound ports for unit tests (services, room
//! sync, shell), allowing tests to run without real network or websocket
//! connections.

pub mod fixtures;
pub mod in_memory_storage;
pub mod mock_api_port;
pub mod recording_connection;

pub use in_memory_storage::InMemoryStorage;
pub use mock_api_port::{MockApiPort, RecordedCall};
pub use recording_connection::{RecordingConnection, RecordingConnectionFactory};

use std::sync::{Mutex, MutexGuard};

/// Lock that shrugs off poisoning from a panicked test thread.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
