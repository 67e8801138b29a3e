//! Console constants
//!
//! Storage keys, simulated latencies and other fixed values shared by the
//! repositories and controllers.

// Storage namespace and keys
pub const STORAGE_NAMESPACE: &str = "msc";
pub const LEAD_OVERRIDES_KEY: &str = "leads:overrides:v1";
pub const LEAD_PREFS_KEY: &str = "leads:prefs:v1";
pub const OPPORTUNITIES_KEY: &str = "opportunities:v1";
pub const OPPORTUNITY_PREFS_KEY: &str = "opportunities:prefs:v1";

// Simulated latency (milliseconds)
pub const LEADS_FETCH_DELAY_MS: u64 = 800;
pub const LEAD_UPDATE_DELAY_MS: u64 = 300;
pub const OPPORTUNITY_LIST_DELAY_MS: u64 = 400;
pub const OPPORTUNITY_WRITE_DELAY_MS: u64 = 400;
pub const OPPORTUNITY_DELETE_DELAY_MS: u64 = 300;

// Search input quiet window
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

// Opportunity defaults
pub const OPPORTUNITY_ID_PREFIX: &str = "opp";
pub const UNTITLED_OPPORTUNITY: &str = "Untitled";

// Messages surfaced to views
pub const LEADS_LOAD_ERROR: &str = "Failed to load leads";
pub const OPPORTUNITIES_LOAD_ERROR: &str = "Failed to load opportunities";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid e-mail";
pub const EMAIL_REQUIRED_MESSAGE: &str = "E-mail is required";
pub const OPPORTUNITY_NOT_FOUND: &str = "Opportunity not found";
