//! Opportunity repository stored as a single JSON collection.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use seller_console_core::{NamespacedStorage, OpportunitiesRepository};
use seller_console_domain::constants::{
    OPPORTUNITIES_KEY, OPPORTUNITY_ID_PREFIX, OPPORTUNITY_NOT_FOUND, UNTITLED_OPPORTUNITY,
};
use seller_console_domain::{
    ConsoleError, LatencyConfig, Opportunity, OpportunityInput, Result as DomainResult, Stage,
};
use tracing::{debug, info};
use uuid::Uuid;

fn new_id() -> String {
    format!("{OPPORTUNITY_ID_PREFIX}_{}", Uuid::new_v4().simple())
}

/// Example record inserted into an empty collection.
fn bootstrap_opportunity() -> Opportunity {
    Opportunity {
        id: new_id(),
        lead_id: None,
        name: "Acme - Website Revamp".to_string(),
        company: Some("Acme Inc.".to_string()),
        email: Some("cto@acme.example.com".to_string()),
        value: Some(12_000.0),
        stage: Stage::Prospecting,
        created_at: Utc::now(),
        notes: Some("Initial contact by referral".to_string()),
    }
}

fn not_found() -> ConsoleError {
    ConsoleError::NotFound(OPPORTUNITY_NOT_FOUND.to_string())
}

/// `OpportunitiesRepository` keeping the whole collection, newest first,
/// under `opportunities:v1`.
pub struct StoredOpportunitiesRepository {
    storage: NamespacedStorage,
    latency: LatencyConfig,
    /// Serialises read-modify-write of the collection.
    write: Mutex<()>,
}

impl StoredOpportunitiesRepository {
    /// Open the collection, inserting the bootstrap record when it is empty.
    pub fn new(storage: NamespacedStorage, latency: LatencyConfig) -> Self {
        let repository = Self { storage, latency, write: Mutex::new(()) };
        repository.seed_if_empty();
        repository
    }

    fn load(&self) -> Vec<Opportunity> {
        self.storage.get(OPPORTUNITIES_KEY, Vec::new())
    }

    fn save(&self, items: &[Opportunity]) {
        self.storage.set(OPPORTUNITIES_KEY, items);
    }

    fn seed_if_empty(&self) {
        let _write = self.write.lock();
        if self.load().is_empty() {
            self.save(&[bootstrap_opportunity()]);
            info!("opportunities collection bootstrapped");
        }
    }
}

#[async_trait]
impl OpportunitiesRepository for StoredOpportunitiesRepository {
    async fn list_opportunities(&self, delay: Option<Duration>) -> DomainResult<Vec<Opportunity>> {
        tokio::time::sleep(delay.unwrap_or_else(|| self.latency.opportunity_list())).await;
        Ok(self.load())
    }

    async fn create_opportunity(&self, input: OpportunityInput) -> DomainResult<Opportunity> {
        tokio::time::sleep(self.latency.opportunity_write()).await;

        let created = Opportunity {
            id: new_id(),
            lead_id: input.lead_id,
            name: input.name.unwrap_or_else(|| UNTITLED_OPPORTUNITY.to_string()),
            company: Some(input.company.unwrap_or_default()),
            email: Some(input.email.unwrap_or_default()),
            value: Some(input.value.unwrap_or(0.0)),
            stage: input.stage.unwrap_or(Stage::Prospecting),
            created_at: Utc::now(),
            notes: Some(input.notes.unwrap_or_default()),
        };

        let _write = self.write.lock();
        let mut items = self.load();
        items.insert(0, created.clone());
        self.save(&items);

        debug!(opportunity_id = %created.id, lead_id = ?created.lead_id, "opportunity created");
        Ok(created)
    }

    async fn update_opportunity(
        &self,
        id: &str,
        patch: OpportunityInput,
    ) -> DomainResult<Opportunity> {
        tokio::time::sleep(self.latency.opportunity_write()).await;

        let _write = self.write.lock();
        let mut items = self.load();
        let item = items.iter_mut().find(|item| item.id == id).ok_or_else(not_found)?;
        patch.apply_to(item);
        let updated = item.clone();
        self.save(&items);

        debug!(opportunity_id = id, "opportunity updated");
        Ok(updated)
    }

    async fn delete_opportunity(&self, id: &str) -> DomainResult<()> {
        tokio::time::sleep(self.latency.opportunity_delete()).await;

        let _write = self.write.lock();
        let mut items = self.load();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(not_found());
        }
        self.save(&items);

        debug!(opportunity_id = id, "opportunity deleted");
        Ok(())
    }

    async fn reset_opportunities(&self, seed: bool) -> DomainResult<()> {
        {
            let _write = self.write.lock();
            self.save(&[]);
        }
        if seed {
            self.seed_if_empty();
        }
        Ok(())
    }
}
