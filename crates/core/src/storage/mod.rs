//! Persistent key-value storage

pub mod namespaced;
pub mod ports;

pub use namespaced::NamespacedStorage;
pub use ports::{KeyValueStore, StorageError, StorageResult};
