//! Local persistence port
//!
//! The session survives restarts through this key/value store. Failures
//! are the adapter's to log; callers treat a missing value as "not stored".

/// Durable string key/value store.
pub trait StorageProvider: Clone + 'static {
    fn save(&self, key: &str, value: &str);

    /// `None` when the key was never saved or has been removed.
    fn load(&self, key: &str) -> Option<String>;

    fn remove(&self, key: &str);
}

/// Keys of the persisted session. Both present means signed in.
pub mod storage_keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const USERNAME: &str = "username";
}
