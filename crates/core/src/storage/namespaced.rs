//! Namespaced JSON storage wrapper.
//!
//! Every key is prefixed with `"<namespace>:"` so console data can share a
//! substrate with unrelated entries. All operations are best-effort: encode,
//! decode and substrate failures are logged and swallowed, and readers get
//! their fallback instead of an error.

use std::sync::Arc;

use seller_console_domain::constants::STORAGE_NAMESPACE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::ports::KeyValueStore;

/// JSON-encoding, namespaced view over a [`KeyValueStore`]
#[derive(Clone)]
pub struct NamespacedStorage {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl NamespacedStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self { store, namespace: namespace.into() }
    }

    /// Wrapper using the console's default `msc` namespace.
    pub fn with_default_namespace(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, STORAGE_NAMESPACE)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    fn prefix(&self) -> String {
        format!("{}:", self.namespace)
    }

    /// Encode `value` as JSON and write it. Never fails.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key, error = %err, "failed to encode value; write skipped");
                return;
            }
        };

        if let Err(err) = self.store.set(&self.full_key(key), &encoded) {
            warn!(key, bytes = encoded.len(), error = %err, "storage write dropped");
        }
    }

    /// Decode the value under `key`, or `None` when absent or unreadable.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(&self.full_key(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "storage read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(key, error = %err, "discarding undecodable stored value");
                None
            }
        }
    }

    /// Decode the value under `key`, or `fallback` when absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.get_opt(key).unwrap_or(fallback)
    }

    /// Delete `key`. Never fails.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.store.remove(&self.full_key(key)) {
            warn!(key, error = %err, "storage remove failed");
        }
    }

    /// Delete every key under this namespace, leaving other namespaces alone.
    pub fn clear_namespace(&self) {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(err) => {
                warn!(namespace = %self.namespace, error = %err, "cannot list keys to clear");
                return;
            }
        };

        let prefix = self.prefix();
        let mut removed = 0usize;
        for key in keys.iter().filter(|key| key.starts_with(&prefix)) {
            match self.store.remove(key) {
                Ok(()) => removed += 1,
                Err(err) => warn!(key = %key, error = %err, "storage remove failed"),
            }
        }
        debug!(namespace = %self.namespace, removed, "namespace cleared");
    }
}

impl std::fmt::Debug for NamespacedStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespacedStorage")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
