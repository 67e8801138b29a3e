//! In-process key-value substrate with an optional byte quota.
//!
//! Behaves like browser local storage: a flat string map that rejects writes
//! once the combined size of keys and values would exceed the quota.

use std::collections::HashMap;

use parking_lot::Mutex;
use seller_console_core::storage::{KeyValueStore, StorageError, StorageResult};

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, String>,
    used_bytes: usize,
}

fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// `KeyValueStore` held in memory
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<Entries>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    /// Unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store rejecting writes that would push usage past `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self { entries: Mutex::default(), quota_bytes: Some(quota_bytes) }
    }

    /// Combined size of every stored key and value.
    pub fn used_bytes(&self) -> usize {
        self.entries.lock().used_bytes
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock();
        let replaced = entries.map.get(key).map_or(0, |old| entry_size(key, old));
        let projected = entries.used_bytes - replaced + entry_size(key, value);

        if let Some(quota) = self.quota_bytes {
            if projected > quota {
                return Err(StorageError::QuotaExceeded(format!(
                    "writing {key} needs {projected} bytes, quota is {quota}"
                )));
            }
        }

        entries.map.insert(key.to_string(), value.to_string());
        entries.used_bytes = projected;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock();
        if let Some(old) = entries.map.remove(key) {
            entries.used_bytes -= entry_size(key, &old);
        }
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.lock().map.keys().cloned().collect())
    }
}
