//! Ports for opportunity data

use std::time::Duration;

use async_trait::async_trait;
use seller_console_domain::{Opportunity, OpportunityInput, Result};

/// Opportunity persistence.
///
/// The collection is kept newest first.
#[async_trait]
pub trait OpportunitiesRepository: Send + Sync {
    /// Current collection. `delay` overrides the configured list latency;
    /// pass `Some(Duration::ZERO)` for an immediate read.
    async fn list_opportunities(&self, delay: Option<Duration>) -> Result<Vec<Opportunity>>;

    /// Create a record with a fresh id and defaults for absent fields, and
    /// prepend it to the collection.
    async fn create_opportunity(&self, input: OpportunityInput) -> Result<Opportunity>;

    /// Merge `patch` into record `id`. Fails with `NotFound` when absent.
    async fn update_opportunity(&self, id: &str, patch: OpportunityInput) -> Result<Opportunity>;

    /// Remove record `id`. Fails with `NotFound` when absent.
    async fn delete_opportunity(&self, id: &str) -> Result<()>;

    /// Empty the collection, re-inserting the bootstrap record when `seed`.
    async fn reset_opportunities(&self, seed: bool) -> Result<()>;
}
