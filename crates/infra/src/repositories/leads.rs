//! Lead repository over a seed source and stored overrides.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use seller_console_core::{LeadSeedSource, LeadsRepository, NamespacedStorage};
use seller_console_domain::constants::LEAD_OVERRIDES_KEY;
use seller_console_domain::{LatencyConfig, Lead, LeadUpdate, Result as DomainResult};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::InfraError;

type Overrides = HashMap<String, LeadUpdate>;

/// Stored form of the override map; entries are decoded one at a time.
type RawOverrides = HashMap<String, Value>;

/// `LeadsRepository` merging per-id overrides onto an immutable seed.
///
/// Overrides live under `leads:overrides:v1` as a map of id to partial lead.
/// An entry that no longer decodes is skipped on read and left untouched on
/// write.
pub struct StoredLeadsRepository {
    seed: Arc<dyn LeadSeedSource>,
    storage: NamespacedStorage,
    latency: LatencyConfig,
    /// Serialises read-modify-write of the override map.
    write: Mutex<()>,
}

impl StoredLeadsRepository {
    pub fn new(
        seed: Arc<dyn LeadSeedSource>,
        storage: NamespacedStorage,
        latency: LatencyConfig,
    ) -> Self {
        Self { seed, storage, latency, write: Mutex::new(()) }
    }

    /// Stored overrides keyed by lead id.
    pub fn overrides(&self) -> Overrides {
        self.raw_overrides()
            .into_iter()
            .filter_map(|(id, value)| decode_override(&id, value).map(|patch| (id, patch)))
            .collect()
    }

    fn raw_overrides(&self) -> RawOverrides {
        self.storage.get(LEAD_OVERRIDES_KEY, RawOverrides::new())
    }
}

fn decode_override(id: &str, value: Value) -> Option<LeadUpdate> {
    match serde_json::from_value(value) {
        Ok(patch) => Some(patch),
        Err(err) => {
            warn!(lead_id = id, error = %err, "skipping undecodable lead override");
            None
        }
    }
}

#[async_trait]
impl LeadsRepository for StoredLeadsRepository {
    async fn fetch_leads(&self) -> DomainResult<Vec<Lead>> {
        tokio::time::sleep(self.latency.leads_fetch()).await;

        let seed = self.seed.load_seed().await?;
        let overrides = self.overrides();
        debug!(seed = seed.len(), overrides = overrides.len(), "merging lead overrides");

        Ok(seed
            .into_iter()
            .map(|mut lead| {
                if let Some(patch) = overrides.get(&lead.id) {
                    patch.apply_to(&mut lead);
                }
                lead
            })
            .collect())
    }

    async fn update_lead(&self, id: &str, patch: LeadUpdate) -> DomainResult<LeadUpdate> {
        tokio::time::sleep(self.latency.lead_update()).await;

        let _write = self.write.lock();
        let mut raw = self.raw_overrides();
        let mut merged = raw
            .remove(id)
            .and_then(|value| decode_override(id, value))
            .unwrap_or_default();
        merged.merge(&patch);

        let encoded = serde_json::to_value(&merged).map_err(|err| InfraError::from(err).0)?;
        raw.insert(id.to_string(), encoded);
        self.storage.set(LEAD_OVERRIDES_KEY, &raw);

        debug!(lead_id = id, "lead override stored");
        Ok(merged)
    }

    async fn clear_lead_override(&self, id: &str) -> DomainResult<()> {
        let _write = self.write.lock();
        let mut raw = self.raw_overrides();
        if raw.remove(id).is_some() {
            self.storage.set(LEAD_OVERRIDES_KEY, &raw);
        }
        Ok(())
    }

    async fn clear_all_lead_overrides(&self) -> DomainResult<()> {
        let _write = self.write.lock();
        self.storage.remove(LEAD_OVERRIDES_KEY);
        Ok(())
    }
}
