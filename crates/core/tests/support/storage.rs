use std::collections::HashMap;

use parking_lot::Mutex;
use seller_console_core::storage::{KeyValueStore, StorageError, StorageResult};

/// In-memory `KeyValueStore` with switchable write failures.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail as if the quota were exhausted.
    pub fn reject_writes(&self, reject: bool) {
        *self.reject_writes.lock() = reject;
    }

    /// Raw value under the fully qualified key.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if *self.reject_writes.lock() {
            return Err(StorageError::QuotaExceeded(format!("{key} ({} bytes)", value.len())));
        }
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.lock().keys().cloned().collect())
    }
}
