//! # Seller Console Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Key-value substrates (SQLite pool, in-memory with byte quota)
//! - Lead seed sources (JSON file, bundled dataset)
//! - The stored leads and opportunities repositories
//! - Configuration loading and logging initialisation
//! - The `ConsoleContext` composition root
//!
//! ## Architecture
//! - Implements traits defined in `seller-console-core`
//! - Contains all "impure" code (files, SQLite, clocks)

pub mod config;
pub mod context;
pub mod errors;
pub mod observability;
pub mod repositories;
pub mod seed;
pub mod storage;

// Re-export commonly used items
pub use context::ConsoleContext;
pub use errors::{InfraError, IntoStorageError};
pub use observability::init_logging;
pub use repositories::{StoredLeadsRepository, StoredOpportunitiesRepository};
pub use seed::{EmbeddedLeadSeed, JsonFileLeadSeed, StaticLeadSeed};
pub use storage::{DbManager, MemoryKeyValueStore, SqliteKeyValueStore};
