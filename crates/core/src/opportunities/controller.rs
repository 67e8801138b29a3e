//! Opportunity list controller

use std::sync::Arc;

use parking_lot::Mutex;
use seller_console_domain::constants::{OPPORTUNITIES_LOAD_ERROR, OPPORTUNITY_PREFS_KEY};
use seller_console_domain::utils::{next_sort, sort_by_key};
use seller_console_domain::{
    Lead, Opportunity, OpportunityInput, OpportunityPrefs, OpportunitySortKey, Result,
    SortDirection,
};
use tracing::{debug, error};

use super::ports::OpportunitiesRepository;
use crate::conversion::{ConversionOptions, ConversionService};
use crate::storage::NamespacedStorage;

#[derive(Debug, Default)]
struct OpportunitiesState {
    items: Vec<Opportunity>,
    loading: bool,
    error: Option<String>,
    sort_key: OpportunitySortKey,
    sort_dir: SortDirection,
    /// Creates in flight
    creating: usize,
    generation: u64,
}

struct Creating<'a>(&'a Mutex<OpportunitiesState>);

impl<'a> Creating<'a> {
    fn start(state: &'a Mutex<OpportunitiesState>) -> Self {
        state.lock().creating += 1;
        Self(state)
    }
}

impl Drop for Creating<'_> {
    fn drop(&mut self) {
        let mut state = self.0.lock();
        state.creating = state.creating.saturating_sub(1);
    }
}

/// Opportunity list state and actions
pub struct OpportunitiesController {
    repository: Arc<dyn OpportunitiesRepository>,
    conversion: ConversionService,
    storage: NamespacedStorage,
    state: Mutex<OpportunitiesState>,
}

impl OpportunitiesController {
    /// Build a controller, restoring the stored sort (default newest first).
    pub fn new(repository: Arc<dyn OpportunitiesRepository>, storage: NamespacedStorage) -> Self {
        let conversion = ConversionService::new(Arc::clone(&repository));
        Self::with_conversion(repository, conversion, storage)
    }

    /// Build a controller that converts through a shared `conversion`
    /// service, so its conversions are serialised with every other holder.
    pub fn with_conversion(
        repository: Arc<dyn OpportunitiesRepository>,
        conversion: ConversionService,
        storage: NamespacedStorage,
    ) -> Self {
        let prefs: OpportunityPrefs =
            storage.get(OPPORTUNITY_PREFS_KEY, OpportunityPrefs::default());
        let state = OpportunitiesState {
            sort_key: prefs.sort_key,
            sort_dir: prefs.sort_dir,
            ..OpportunitiesState::default()
        };
        Self { repository, conversion, storage, state: Mutex::new(state) }
    }

    /// Fetch the authoritative collection; see `LeadsController::load`.
    pub async fn load(&self) {
        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result = self.repository.list_opportunities(None).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(
                generation,
                latest = state.generation,
                "discarding superseded opportunity load"
            );
            return;
        }
        match result {
            Ok(items) => {
                debug!(count = items.len(), "opportunities loaded");
                state.items = items;
            }
            Err(err) => {
                error!(error = %err, kind = err.label(), "failed to load opportunities");
                state.error = Some(OPPORTUNITIES_LOAD_ERROR.to_string());
            }
        }
        state.loading = false;
    }

    pub async fn reload(&self) {
        self.load().await;
    }

    fn change_sort(&self, change: impl FnOnce(&mut OpportunitiesState)) {
        let prefs = {
            let mut state = self.state.lock();
            change(&mut state);
            OpportunityPrefs { sort_key: state.sort_key, sort_dir: state.sort_dir }
        };
        self.storage.set(OPPORTUNITY_PREFS_KEY, &prefs);
    }

    pub fn toggle_sort(&self, key: OpportunitySortKey, explicit: Option<SortDirection>) {
        self.change_sort(|state| {
            (state.sort_key, state.sort_dir) =
                next_sort((state.sort_key, state.sort_dir), key, explicit);
        });
    }

    pub fn set_sort_key(&self, key: OpportunitySortKey) {
        self.change_sort(|state| state.sort_key = key);
    }

    pub fn set_sort_dir(&self, dir: SortDirection) {
        self.change_sort(|state| state.sort_dir = dir);
    }

    /// Collection sorted by the active key and direction.
    pub fn opportunities(&self) -> Vec<Opportunity> {
        let state = self.state.lock();
        let key = state.sort_key;
        sort_by_key(&state.items, |item| key.extract(item), state.sort_dir)
    }

    pub fn total(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn sort_key(&self) -> OpportunitySortKey {
        self.state.lock().sort_key
    }

    pub fn sort_dir(&self) -> SortDirection {
        self.state.lock().sort_dir
    }

    pub fn loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Whether a create or conversion is in flight.
    pub fn is_creating(&self) -> bool {
        self.state.lock().creating > 0
    }

    /// Create an opportunity and prepend it on success.
    pub async fn add(&self, input: OpportunityInput) -> Result<Opportunity> {
        let _creating = Creating::start(&self.state);
        let created = self.repository.create_opportunity(input).await?;
        self.state.lock().items.insert(0, created.clone());
        Ok(created)
    }

    /// Convert `lead` and prepend the new record.
    ///
    /// Fails with `DuplicateConversion` when the lead was already converted.
    pub async fn convert_from_lead(
        &self,
        lead: &Lead,
        options: ConversionOptions,
    ) -> Result<Opportunity> {
        let _creating = Creating::start(&self.state);
        let created = self.conversion.convert_lead(lead, options).await?;
        self.state.lock().items.insert(0, created.clone());
        Ok(created)
    }

    /// Merge `input` optimistically, then replace the record with the saved
    /// one. On failure the collection is reloaded and the error returned.
    pub async fn patch(&self, id: &str, input: OpportunityInput) -> Result<Opportunity> {
        {
            let mut state = self.state.lock();
            if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                input.apply_to(item);
            }
        }

        match self.repository.update_opportunity(id, input).await {
            Ok(saved) => {
                let mut state = self.state.lock();
                if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                    *item = saved.clone();
                }
                Ok(saved)
            }
            Err(err) => {
                error!(opportunity_id = id, error = %err, "opportunity update failed; reloading");
                self.load().await;
                Err(err)
            }
        }
    }

    /// Remove optimistically. On failure the collection is restored to its
    /// exact pre-removal snapshot and the error returned.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let snapshot = {
            let mut state = self.state.lock();
            let snapshot = state.items.clone();
            state.items.retain(|item| item.id != id);
            snapshot
        };

        if let Err(err) = self.repository.delete_opportunity(id).await {
            error!(opportunity_id = id, error = %err, "opportunity delete failed; restoring");
            self.state.lock().items = snapshot;
            return Err(err);
        }
        Ok(())
    }
}

impl std::fmt::Debug for OpportunitiesController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpportunitiesController")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
