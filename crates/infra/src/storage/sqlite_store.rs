//! SQLite-backed key-value substrate.
//!
//! Implements the `KeyValueStore` port on the `kv_store` table. Calls are
//! synchronous and short; they go through the shared [`DbManager`] pool.

use std::path::Path;
use std::sync::Arc;

use rusqlite::{params, OptionalExtension};
use seller_console_core::storage::{KeyValueStore, StorageError, StorageResult};
use seller_console_domain::Result;

use super::manager::{DbConnection, DbManager};
use crate::errors::IntoStorageError;

/// `KeyValueStore` over the `kv_store` table
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    db: Arc<DbManager>,
}

impl SqliteKeyValueStore {
    /// Wrap an existing manager. The schema must already be migrated.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Open the database file at `path`, migrating the schema if needed.
    pub fn open<P: AsRef<Path>>(path: P, pool_size: u32) -> Result<Self> {
        let db = DbManager::new(path, pool_size)?;
        db.run_migrations()?;
        Ok(Self::new(Arc::new(db)))
    }

    /// Migrated private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = DbManager::in_memory()?;
        db.run_migrations()?;
        Ok(Self::new(Arc::new(db)))
    }

    fn connection(&self) -> StorageResult<DbConnection> {
        self.db.get_connection().map_err(|err| StorageError::Unavailable(err.to_string()))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.connection()?;
        conn.query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| row.get(0))
            .optional()
            .map_err(IntoStorageError::into_storage_error)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.connection()?;
        let now = chrono::Utc::now().timestamp_millis();

        // Upsert pattern (SQLite 3.24.0+)
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(IntoStorageError::into_storage_error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(IntoStorageError::into_storage_error)?;
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare("SELECT key FROM kv_store ORDER BY key")
            .map_err(IntoStorageError::into_storage_error)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(IntoStorageError::into_storage_error)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(IntoStorageError::into_storage_error)
    }
}
