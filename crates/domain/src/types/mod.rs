//! Domain types and models

pub mod lead;
pub mod opportunity;
pub mod query;

pub use lead::{Lead, LeadSource, LeadStatus, LeadUpdate};
pub use opportunity::{Opportunity, OpportunityInput, Stage};
pub use query::{Filter, LeadFilters, LeadPrefs, LeadsSortKey, OpportunityPrefs, OpportunitySortKey};
