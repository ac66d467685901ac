//! Durable key-value storage for on-device state.
//!
//! The cart store and auth session both persist a single opaque blob under
//! a well-known key. This module defines that contract and two backends:
//! [`MemoryStorage`] for tests and ephemeral use, [`FileStorage`] for real
//! on-disk persistence (one file per key).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when reading or writing stored blobs.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure, tagged with the key being accessed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// Asynchronous key-value blob storage.
///
/// Keys are opaque UTF-8 strings; values are opaque byte blobs. A missing
/// key is not an error: `get` returns `Ok(None)` and `remove` succeeds.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Delete the blob under `key`. Succeeds if the key is absent.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
