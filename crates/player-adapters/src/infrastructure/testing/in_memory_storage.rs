//! In-memory [`StorageProvider`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tictac_player_ports::outbound::StorageProvider;

use super::lock;

/// Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.data).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageProvider for InMemoryStorage {
    fn save(&self, key: &str, value: &str) {
        lock(&self.data).insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        lock(&self.data).get(key).cloned()
    }

    fn remove(&self, key: &str) {
        lock(&self.data).remove(key);
    }
}
