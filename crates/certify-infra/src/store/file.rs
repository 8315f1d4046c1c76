//! File-backed session store - the durable analog of browser local storage
//! for native and CLI clients.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use certify_core::ports::{SessionStore, StoreError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    entries: HashMap<String, Entry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.map(|at| Utc::now() >= at).unwrap_or(false)
    }
}

/// Session store persisted as one JSON document.
///
/// Expiry is stored as wall-clock timestamps so it holds across restarts.
/// A missing or corrupt file reads as an empty store rather than an error -
/// the worst outcome of losing session material is a fresh sign-in.
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles against the document.
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_document(&self) -> Document {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("session file unreadable, starting empty: {e}");
                Document::default()
            }),
            Err(_) => Document::default(),
        }
    }

    async fn write_document(&self, document: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await;
        let entry = document.entries.get(key)?;

        if entry.is_expired() {
            document.entries.remove(key);
            if let Err(e) = self.write_document(&document).await {
                tracing::warn!("failed to drop expired session entry: {e}");
            }
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await;
        let expires_at = ttl
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);
        document.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        self.write_document(&document).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await;
        if document.entries.remove(key).is_some() {
            self.write_document(&document).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("session.json"))
    }

    #[tokio::test]
    async fn values_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("certify_token", "abc", None).await.unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get("certify_token").await.as_deref(),
            Some("abc")
        );
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("certify_token").await, None);
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(store.get("certify_token").await, None);
        // And it recovers on the next write.
        store.set("k", "v", None).await.unwrap();
        assert_eq!(store.get("k").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn elapsed_ttl_is_dropped_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("k", "v", Some(Duration::ZERO)).await.unwrap();
        assert_eq!(store.get("k").await, None);

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("k").await, None);
    }

    #[tokio::test]
    async fn remove_deletes_only_the_named_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("certify_token", "t", None).await.unwrap();
        store.set("certify_user", "{}", None).await.unwrap();

        store.remove("certify_token").await.unwrap();
        assert_eq!(store.get("certify_token").await, None);
        assert_eq!(store.get("certify_user").await.as_deref(), Some("{}"));
    }
}
