#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use seller_console_core::{KeyValueStore, NamespacedStorage};
use seller_console_domain::{Lead, LeadSource, LeadStatus};
use seller_console_infra::storage::{DbManager, SqliteKeyValueStore};
use tempfile::TempDir;

/// Temporary SQLite-backed store that keeps the underlying file alive for
/// the duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub store: Arc<SqliteKeyValueStore>,
    temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("console.db");

        let manager = Arc::new(DbManager::new(&db_path, 4).expect("db manager should be created"));
        manager.run_migrations().expect("schema migrations should apply");
        let store = Arc::new(SqliteKeyValueStore::new(Arc::clone(&manager)));

        Self { manager, store, temp_dir }
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("console.db")
    }

    pub fn storage(&self) -> NamespacedStorage {
        let store: Arc<dyn KeyValueStore> = self.store.clone();
        NamespacedStorage::with_default_namespace(store)
    }
}

pub fn lead(id: &str, name: &str, email: &str, score: u8) -> Lead {
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        company: "Acme".to_string(),
        status: LeadStatus::New,
        source: LeadSource::Webform,
        score,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        notes: None,
    }
}
