//! Repository implementations over the namespaced storage wrapper

pub mod leads;
pub mod opportunities;

pub use leads::StoredLeadsRepository;
pub use opportunities::StoredOpportunitiesRepository;
