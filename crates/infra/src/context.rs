//! Console context - dependency injection container
//!
//! Builds the storage substrate, the namespaced wrapper and both
//! repositories from a [`Config`], and hands out controllers wired to them.

use std::sync::Arc;

use seller_console_core::{
    ConversionService, KeyValueStore, LeadSeedSource, LeadsController, LeadsOptions,
    LeadsRepository, NamespacedStorage, OpportunitiesController, OpportunitiesRepository,
};
use seller_console_domain::{Config, Result};
use tracing::info;

use crate::repositories::{StoredLeadsRepository, StoredOpportunitiesRepository};
use crate::seed::{EmbeddedLeadSeed, JsonFileLeadSeed};
use crate::storage::{MemoryKeyValueStore, SqliteKeyValueStore};

/// Type alias for key-value port trait object
type DynKeyValueStore = dyn KeyValueStore + 'static;

/// Type alias for lead seed port trait object
type DynLeadSeedSource = dyn LeadSeedSource + 'static;

/// Type alias for leads repository port trait object
type DynLeadsRepository = dyn LeadsRepository + 'static;

/// Type alias for opportunities repository port trait object
type DynOpportunitiesRepository = dyn OpportunitiesRepository + 'static;

/// Holds the wired substrate and repositories
pub struct ConsoleContext {
    pub config: Config,
    pub store: Arc<DynKeyValueStore>,
    pub storage: NamespacedStorage,
    pub leads: Arc<DynLeadsRepository>,
    pub opportunities: Arc<DynOpportunitiesRepository>,
    conversion: ConversionService,
}

impl ConsoleContext {
    /// Wire everything from configuration.
    ///
    /// A configured `storage.path` selects the SQLite substrate; otherwise an
    /// in-memory store (with the optional byte quota) is used.
    ///
    /// # Errors
    /// Returns an error if the SQLite database cannot be opened or migrated.
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<DynKeyValueStore> = match config.storage.path.as_deref() {
            Some(path) => {
                info!(path, pool_size = config.storage.pool_size, "opening sqlite storage");
                Arc::new(SqliteKeyValueStore::open(path, config.storage.pool_size)?)
            }
            None => {
                info!(quota_bytes = ?config.storage.quota_bytes, "using in-memory storage");
                Arc::new(match config.storage.quota_bytes {
                    Some(quota) => MemoryKeyValueStore::with_quota(quota),
                    None => MemoryKeyValueStore::new(),
                })
            }
        };

        let seed: Arc<DynLeadSeedSource> = match config.leads.seed_path.as_deref() {
            Some(path) => Arc::new(JsonFileLeadSeed::new(path)),
            None => Arc::new(EmbeddedLeadSeed),
        };

        Ok(Self::with_parts(config, store, seed))
    }

    /// Wire the repositories over an explicit store and seed.
    pub fn with_parts(
        config: Config,
        store: Arc<DynKeyValueStore>,
        seed: Arc<DynLeadSeedSource>,
    ) -> Self {
        let storage = NamespacedStorage::new(Arc::clone(&store), config.storage.namespace.clone());
        let leads: Arc<DynLeadsRepository> =
            Arc::new(StoredLeadsRepository::new(seed, storage.clone(), config.latency));
        let opportunities: Arc<DynOpportunitiesRepository> =
            Arc::new(StoredOpportunitiesRepository::new(storage.clone(), config.latency));

        let conversion = ConversionService::new(Arc::clone(&opportunities));

        Self { config, store, storage, leads, opportunities, conversion }
    }

    /// A lead list controller over the shared repository.
    pub fn leads_controller(&self) -> LeadsController {
        LeadsController::new(
            Arc::clone(&self.leads),
            self.storage.clone(),
            LeadsOptions::from_config(&self.config.leads),
        )
    }

    /// An opportunity list controller over the shared repository.
    pub fn opportunities_controller(&self) -> OpportunitiesController {
        OpportunitiesController::with_conversion(
            Arc::clone(&self.opportunities),
            self.conversion.clone(),
            self.storage.clone(),
        )
    }

    /// The conversion service shared by every controller from this context.
    pub fn conversion_service(&self) -> ConversionService {
        self.conversion.clone()
    }
}
