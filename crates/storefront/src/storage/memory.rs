//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{KeyValueStorage, StorageError};

/// Mutex-guarded map storage. Contents vanish with the process.
///
/// Primarily for tests; also useful when a caller wants cart semantics
/// without durability.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned lock means a writer panicked mid-insert; the map
        // itself is still a valid HashMap.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_missing_key() {
        let storage = MemoryStorage::new();
        assert!(storage.get("missing").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let storage = MemoryStorage::new();
        storage.set("k", b"blob".to_vec()).await.expect("set");
        assert_eq!(storage.get("k").await.expect("get"), Some(b"blob".to_vec()));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.set("k", b"blob".to_vec()).await.expect("set");
        storage.remove("k").await.expect("remove");
        storage.remove("k").await.expect("remove absent");
        assert!(storage.get("k").await.expect("get").is_none());
    }
}
