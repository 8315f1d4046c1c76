use std::time::Duration;

use async_trait::async_trait;

/// Key/value storage for session material - abstraction over whatever the
/// host platform persists (memory, a file, a cookie jar).
///
/// Values are opaque strings; nothing is validated at this layer.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value. Expired entries read as absent.
    async fn get(&self, key: &str) -> Option<String>;

    /// Write a value, optionally expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
