//! # Seller Console Core
//!
//! Business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for key-value storage, lead seeds and the two
//!   repositories
//! - The namespaced JSON storage wrapper
//! - The lead and opportunity list controllers
//! - Lead to opportunity conversion
//!
//! ## Architecture Principles
//! - Only depends on `seller-console-common` and `seller-console-domain`
//! - No database, file or platform code
//! - All external dependencies via traits

pub mod conversion;
pub mod leads;
pub mod opportunities;
pub mod storage;

pub use conversion::{find_duplicate, ConversionOptions, ConversionService};
pub use leads::{LeadSeedSource, LeadsController, LeadsOptions, LeadsRepository};
pub use opportunities::{OpportunitiesController, OpportunitiesRepository};
pub use storage::{KeyValueStore, NamespacedStorage, StorageError, StorageResult};
