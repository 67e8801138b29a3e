//! Key-value substrates

pub mod manager;
pub mod memory_store;
pub mod sqlite_store;

pub use manager::{DbConnection, DbManager};
pub use memory_store::MemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;
