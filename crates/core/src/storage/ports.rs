//! Key-value substrate port.
//!
//! The console persists everything (lead overrides, opportunities, list
//! preferences) as JSON strings in a flat key-value store. Adapters live in
//! `seller-console-infra`; tests use the in-memory mocks under `tests/support`.

use thiserror::Error;

/// Failure reported by a key-value substrate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The write would exceed the substrate's byte budget.
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The substrate cannot be reached (closed pool, missing file, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result alias for substrate operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Raw string key-value store.
///
/// Operations are synchronous; substrates are expected to be local and fast
/// (an in-process map or a pooled SQLite connection).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Insert or overwrite `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Every key currently stored, in no particular order.
    fn keys(&self) -> StorageResult<Vec<String>>;
}
