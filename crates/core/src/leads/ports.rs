//! Ports for lead data

use async_trait::async_trait;
use seller_console_domain::{Lead, LeadUpdate, Result};

/// Source of the immutable lead seed list.
#[async_trait]
pub trait LeadSeedSource: Send + Sync {
    /// Load every seed lead, in seed order.
    async fn load_seed(&self) -> Result<Vec<Lead>>;
}

/// Lead persistence.
///
/// Seed records are never rewritten; edits are stored as per-id overrides and
/// merged on top at read time.
#[async_trait]
pub trait LeadsRepository: Send + Sync {
    /// Seed leads with their overrides applied, in seed order.
    ///
    /// Fails with `LoadFailure` when the seed cannot be read.
    async fn fetch_leads(&self) -> Result<Vec<Lead>>;

    /// Merge `patch` into the stored override for `id` and return the merged
    /// override. Fields are not validated here.
    async fn update_lead(&self, id: &str, patch: LeadUpdate) -> Result<LeadUpdate>;

    /// Drop the override for `id`, restoring its seed values.
    async fn clear_lead_override(&self, id: &str) -> Result<()>;

    /// Drop every override.
    async fn clear_all_lead_overrides(&self) -> Result<()>;
}
