//! Persistent key-value storage used to mirror the cart.
//!
//! The cart only needs an asynchronous get/set-by-key primitive. Backends:
//!
//! - [`MemoryStore`] - process-local map, for tests and embedders without disk
//! - [`FileStore`] - one JSON file per key in a directory

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Asynchronous string key-value store.
///
/// Implementations must make `set` visible to subsequent `get` calls for the
/// same key. `remove` is idempotent.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
