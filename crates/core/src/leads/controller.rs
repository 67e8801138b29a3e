//! Lead list controller
//!
//! Owns the raw lead collection, the filter and sort state and the set of
//! leads with an update in flight. The visible list is derived on demand from
//! that state, so callers never see a stale filtered view.
//!
//! Filter and sort changes are persisted as [`LeadPrefs`] and restored when a
//! controller is built over the same storage.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use seller_console_common::time::Debouncer;
use seller_console_domain::constants::{
    INVALID_EMAIL_MESSAGE, LEADS_LOAD_ERROR, LEAD_PREFS_KEY, SEARCH_DEBOUNCE_MS,
};
use seller_console_domain::utils::{is_email, next_sort, sort_by_key};
use seller_console_domain::{
    ConsoleError, Filter, Lead, LeadFilters, LeadPrefs, LeadSource, LeadStatus, LeadUpdate,
    LeadsConfig, LeadsSortKey, Result, SortDirection,
};
use tracing::{debug, error, warn};

use super::ports::LeadsRepository;
use crate::storage::NamespacedStorage;

/// Construction options for [`LeadsController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadsOptions {
    /// Sort used when no preferences are stored
    pub sort_key: LeadsSortKey,
    pub sort_dir: SortDirection,
    /// Quiet window for [`LeadsController::set_query`]
    pub search_debounce: Duration,
}

impl Default for LeadsOptions {
    fn default() -> Self {
        Self {
            sort_key: LeadsSortKey::Score,
            sort_dir: SortDirection::Desc,
            search_debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
        }
    }
}

impl LeadsOptions {
    pub fn from_config(config: &LeadsConfig) -> Self {
        Self { search_debounce: config.search_debounce(), ..Self::default() }
    }
}

#[derive(Debug)]
struct LeadsState {
    raw: Vec<Lead>,
    loading: bool,
    error: Option<String>,
    filters: LeadFilters,
    sort_key: LeadsSortKey,
    sort_dir: SortDirection,
    updating: HashSet<String>,
    /// Bumped by every load; a load only commits if it is still the latest.
    generation: u64,
}

impl LeadsState {
    fn prefs(&self) -> LeadPrefs {
        LeadPrefs {
            filters: self.filters.clone(),
            sort_key: self.sort_key,
            sort_dir: self.sort_dir,
        }
    }

    fn visible(&self) -> Vec<Lead> {
        let filtered: Vec<&Lead> =
            self.raw.iter().filter(|lead| self.filters.matches(lead)).collect();
        let key = self.sort_key;
        sort_by_key(&filtered, |lead| key.extract(lead), self.sort_dir)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// State reachable from the debounced search callback.
struct Shared {
    state: Mutex<LeadsState>,
    storage: NamespacedStorage,
}

impl Shared {
    /// Apply a filter/sort change and persist the resulting preferences.
    fn change_prefs(&self, change: impl FnOnce(&mut LeadsState)) {
        let prefs = {
            let mut state = self.state.lock();
            change(&mut state);
            state.prefs()
        };
        self.storage.set(LEAD_PREFS_KEY, &prefs);
    }
}

/// Clears the in-flight marker for a lead when the update finishes or is
/// abandoned.
struct InFlight<'a> {
    shared: &'a Shared,
    id: String,
}

impl<'a> InFlight<'a> {
    fn mark(shared: &'a Shared, id: &str) -> Self {
        shared.state.lock().updating.insert(id.to_string());
        Self { shared, id: id.to_string() }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.shared.state.lock().updating.remove(&self.id);
    }
}

/// Lead list state and actions
pub struct LeadsController {
    repository: Arc<dyn LeadsRepository>,
    shared: Arc<Shared>,
    search: Debouncer<String>,
}

impl LeadsController {
    /// Build a controller, restoring stored preferences when present.
    ///
    /// Nothing is fetched until [`load`](Self::load) is called.
    pub fn new(
        repository: Arc<dyn LeadsRepository>,
        storage: NamespacedStorage,
        options: LeadsOptions,
    ) -> Self {
        let prefs = match storage.get_opt::<LeadPrefs>(LEAD_PREFS_KEY) {
            Some(saved) => {
                debug!(
                    sort_key = %saved.sort_key,
                    sort_dir = %saved.sort_dir,
                    "restored lead list preferences"
                );
                saved
            }
            None => LeadPrefs {
                filters: LeadFilters::default(),
                sort_key: options.sort_key,
                sort_dir: options.sort_dir,
            },
        };

        let shared = Arc::new(Shared {
            state: Mutex::new(LeadsState {
                raw: Vec::new(),
                loading: false,
                error: None,
                filters: prefs.filters,
                sort_key: prefs.sort_key,
                sort_dir: prefs.sort_dir,
                updating: HashSet::new(),
                generation: 0,
            }),
            storage,
        });

        let sink = Arc::clone(&shared);
        let search = Debouncer::new(options.search_debounce, move |query: String| {
            debug!(query = %query, "applying debounced search query");
            sink.change_prefs(|state| state.filters.query = query);
        });

        Self { repository, shared, search }
    }

    /// Fetch the authoritative collection.
    ///
    /// Failures are surfaced through [`error`](Self::error) rather than
    /// returned. When loads overlap only the most recent one commits.
    pub async fn load(&self) {
        let generation = {
            let mut state = self.shared.state.lock();
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result = self.repository.fetch_leads().await;

        let mut state = self.shared.state.lock();
        if state.generation != generation {
            debug!(generation, latest = state.generation, "discarding superseded lead load");
            return;
        }
        match result {
            Ok(leads) => {
                debug!(count = leads.len(), "leads loaded");
                state.raw = leads;
            }
            Err(err) => {
                error!(error = %err, kind = err.label(), "failed to load leads");
                state.error = Some(LEADS_LOAD_ERROR.to_string());
            }
        }
        state.loading = false;
    }

    pub async fn reload(&self) {
        self.load().await;
    }

    /// Debounced search: only the last query within the quiet window is
    /// applied. Must be called from within a tokio runtime.
    pub fn set_query(&self, query: impl Into<String>) {
        self.search.call(query.into());
    }

    /// Apply `query` immediately, discarding any pending debounced value.
    pub fn set_query_now(&self, query: impl Into<String>) {
        self.search.cancel();
        let query = query.into();
        self.shared.change_prefs(|state| state.filters.query = query);
    }

    pub fn set_status(&self, status: Filter<LeadStatus>) {
        self.shared.change_prefs(|state| state.filters.status = status);
    }

    pub fn set_source(&self, source: Filter<LeadSource>) {
        self.shared.change_prefs(|state| state.filters.source = source);
    }

    /// Sort by `key`; see [`next_sort`] for the direction rules.
    pub fn toggle_sort(&self, key: LeadsSortKey, explicit: Option<SortDirection>) {
        self.shared.change_prefs(|state| {
            (state.sort_key, state.sort_dir) =
                next_sort((state.sort_key, state.sort_dir), key, explicit);
        });
    }

    pub fn set_sort_key(&self, key: LeadsSortKey) {
        self.shared.change_prefs(|state| state.sort_key = key);
    }

    pub fn set_sort_dir(&self, dir: SortDirection) {
        self.shared.change_prefs(|state| state.sort_dir = dir);
    }

    /// Filtered and sorted view of the collection.
    pub fn leads(&self) -> Vec<Lead> {
        self.shared.state.lock().visible()
    }

    /// Number of leads passing the current filters.
    pub fn total(&self) -> usize {
        let state = self.shared.state.lock();
        state.raw.iter().filter(|lead| state.filters.matches(lead)).count()
    }

    /// Unfiltered collection in load order.
    pub fn all(&self) -> Vec<Lead> {
        self.shared.state.lock().raw.clone()
    }

    pub fn filters(&self) -> LeadFilters {
        self.shared.state.lock().filters.clone()
    }

    pub fn sort_key(&self) -> LeadsSortKey {
        self.shared.state.lock().sort_key
    }

    pub fn sort_dir(&self) -> SortDirection {
        self.shared.state.lock().sort_dir
    }

    pub fn loading(&self) -> bool {
        self.shared.state.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.shared.state.lock().error.clone()
    }

    /// Whether an update for `id` is waiting on the repository.
    pub fn is_updating(&self, id: &str) -> bool {
        self.shared.state.lock().updating.contains(id)
    }

    /// Apply `patch` optimistically and persist it.
    ///
    /// A non-empty e-mail must look like `local@domain.tld`; otherwise the call
    /// fails with `Validation` and nothing changes. When the repository
    /// rejects the update the collection is reloaded and the repository error
    /// is returned.
    pub async fn update_lead(&self, id: &str, patch: LeadUpdate) -> Result<()> {
        if let Some(email) = patch.email.as_deref() {
            if !email.is_empty() && !is_email(email) {
                warn!(lead_id = id, "rejected lead update with invalid e-mail");
                return Err(ConsoleError::Validation(INVALID_EMAIL_MESSAGE.to_string()));
            }
        }

        {
            let mut state = self.shared.state.lock();
            if let Some(lead) = state.raw.iter_mut().find(|lead| lead.id == id) {
                patch.apply_to(lead);
            }
        }
        let _in_flight = InFlight::mark(&self.shared, id);

        match self.repository.update_lead(id, patch).await {
            Ok(_) => Ok(()),
            Err(err) => {
                error!(lead_id = id, error = %err, "lead update failed; reloading");
                self.load().await;
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for LeadsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadsController").field("search", &self.search).finish_non_exhaustive()
    }
}
