//! Mock repository implementations for testing
//!
//! In-memory mocks for the lead and opportunity ports with scriptable
//! latency and failures, enabling deterministic controller tests under a
//! paused tokio clock.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use seller_console_core::{LeadsRepository, OpportunitiesRepository};
use seller_console_domain::constants::{LEADS_LOAD_ERROR, OPPORTUNITY_NOT_FOUND};
use seller_console_domain::{
    ConsoleError, Lead, LeadUpdate, Opportunity, OpportunityInput, Result as DomainResult, Stage,
};

/// In-memory mock for `LeadsRepository`.
///
/// Applies overrides on top of a fixed seed like the stored repository does.
/// Individual fetches can be scripted with their own delay and seed.
#[derive(Default)]
pub struct MockLeadsRepository {
    seed: Mutex<Vec<Lead>>,
    overrides: Mutex<HashMap<String, LeadUpdate>>,
    scripted_fetches: Mutex<VecDeque<(Duration, Vec<Lead>)>>,
    delay: Duration,
    fail_fetch: AtomicBool,
    fail_updates: AtomicBool,
    fetches: AtomicUsize,
}

impl MockLeadsRepository {
    pub fn new(seed: Vec<Lead>) -> Self {
        Self { seed: Mutex::new(seed), ..Self::default() }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The next fetch waits `delay` and returns `seed` (plus overrides).
    pub fn script_fetch(&self, delay: Duration, seed: Vec<Lead>) {
        self.scripted_fetches.lock().push_back((delay, seed));
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn stored_override(&self, id: &str) -> Option<LeadUpdate> {
        self.overrides.lock().get(id).cloned()
    }
}

#[async_trait]
impl LeadsRepository for MockLeadsRepository {
    async fn fetch_leads(&self) -> DomainResult<Vec<Lead>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let scripted = self.scripted_fetches.lock().pop_front();
        let (delay, seed) = match scripted {
            Some(script) => script,
            None => (self.delay, self.seed.lock().clone()),
        };
        tokio::time::sleep(delay).await;

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ConsoleError::LoadFailure(LEADS_LOAD_ERROR.to_string()));
        }

        let overrides = self.overrides.lock();
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
        tokio::time::sleep(self.delay).await;
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(ConsoleError::Storage("update rejected".to_string()));
        }
        let mut overrides = self.overrides.lock();
        let stored = overrides.entry(id.to_string()).or_default();
        stored.merge(&patch);
        Ok(stored.clone())
    }

    async fn clear_lead_override(&self, id: &str) -> DomainResult<()> {
        self.overrides.lock().remove(id);
        Ok(())
    }

    async fn clear_all_lead_overrides(&self) -> DomainResult<()> {
        self.overrides.lock().clear();
        Ok(())
    }
}

/// In-memory mock for `OpportunitiesRepository`.
#[derive(Default)]
pub struct MockOpportunitiesRepository {
    items: Mutex<Vec<Opportunity>>,
    delay: Duration,
    fail_writes: AtomicBool,
    next_id: AtomicUsize,
    creates: AtomicUsize,
}

impl MockOpportunitiesRepository {
    pub fn new(items: Vec<Opportunity>) -> Self {
        Self { items: Mutex::new(items), ..Self::default() }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make create, update and delete fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Vec<Opportunity> {
        self.items.lock().clone()
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ConsoleError::Storage("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl OpportunitiesRepository for MockOpportunitiesRepository {
    async fn list_opportunities(&self, delay: Option<Duration>) -> DomainResult<Vec<Opportunity>> {
        tokio::time::sleep(delay.unwrap_or(self.delay)).await;
        Ok(self.stored())
    }

    async fn create_opportunity(&self, input: OpportunityInput) -> DomainResult<Opportunity> {
        tokio::time::sleep(self.delay).await;
        self.check_writable()?;
        self.creates.fetch_add(1, Ordering::SeqCst);

        let id = format!("opp_mock{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut created = Opportunity {
            id,
            lead_id: None,
            name: "Untitled".to_string(),
            company: None,
            email: None,
            value: Some(0.0),
            stage: Stage::Prospecting,
            created_at: Utc::now(),
            notes: None,
        };
        input.apply_to(&mut created);
        self.items.lock().insert(0, created.clone());
        Ok(created)
    }

    async fn update_opportunity(
        &self,
        id: &str,
        patch: OpportunityInput,
    ) -> DomainResult<Opportunity> {
        tokio::time::sleep(self.delay).await;
        self.check_writable()?;
        let mut items = self.items.lock();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ConsoleError::NotFound(OPPORTUNITY_NOT_FOUND.to_string()))?;
        patch.apply_to(item);
        Ok(item.clone())
    }

    async fn delete_opportunity(&self, id: &str) -> DomainResult<()> {
        tokio::time::sleep(self.delay).await;
        self.check_writable()?;
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(ConsoleError::NotFound(OPPORTUNITY_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn reset_opportunities(&self, _seed: bool) -> DomainResult<()> {
        self.items.lock().clear();
        Ok(())
    }
}
