//! Lead to opportunity conversion

use std::sync::Arc;
use std::time::Duration;

use seller_console_domain::{ConsoleError, Lead, Opportunity, OpportunityInput, Result, Stage};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::opportunities::ports::OpportunitiesRepository;

/// Overrides for the opportunity created by a conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionOptions {
    /// Defaults to the lead's name
    pub name: Option<String>,
    /// Defaults to 0
    pub value: Option<f64>,
    /// Defaults to prospecting
    pub stage: Option<Stage>,
    /// Defaults to the lead's notes
    pub notes: Option<String>,
}

/// Converts leads into opportunities without creating duplicates.
///
/// Clones share one conversion lock, so every handle built from the same
/// service serialises its duplicate check with its create.
#[derive(Clone)]
pub struct ConversionService {
    repository: Arc<dyn OpportunitiesRepository>,
    lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for ConversionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionService").finish_non_exhaustive()
    }
}

impl ConversionService {
    pub fn new(repository: Arc<dyn OpportunitiesRepository>) -> Self {
        Self { repository, lock: Arc::new(Mutex::new(())) }
    }

    /// Create an opportunity for `lead`.
    ///
    /// Fails with `DuplicateConversion`, writing nothing, when
    /// [`find_duplicate`] matches an existing record. Overlapping calls on
    /// the same service run one after another.
    pub async fn convert_lead(
        &self,
        lead: &Lead,
        options: ConversionOptions,
    ) -> Result<Opportunity> {
        let _guard = self.lock.lock().await;
        let existing = self.repository.list_opportunities(Some(Duration::ZERO)).await?;

        if let Some(duplicate) = find_duplicate(lead, &existing) {
            warn!(lead_id = %lead.id, opportunity_id = %duplicate.id, "lead already converted");
            return Err(ConsoleError::DuplicateConversion { lead_id: lead.id.clone() });
        }

        let created = self.repository.create_opportunity(conversion_input(lead, options)).await?;
        info!(lead_id = %lead.id, opportunity_id = %created.id, "lead converted");
        Ok(created)
    }
}

/// Existing opportunity that already represents `lead`, if any.
///
/// A record with a `lead_id` matches only on that id. A record without one
/// matches when its name and company equal the lead's after trimming,
/// collapsing inner whitespace and ignoring case.
pub fn find_duplicate<'a>(
    lead: &Lead,
    opportunities: &'a [Opportunity],
) -> Option<&'a Opportunity> {
    let name = normalize(&lead.name);
    let company = normalize(&lead.company);

    opportunities.iter().find(|opportunity| match opportunity.lead_id.as_deref() {
        Some(lead_id) => lead_id == lead.id,
        None => {
            normalize(&opportunity.name) == name
                && normalize(opportunity.company.as_deref().unwrap_or_default()) == company
        }
    })
}

fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn conversion_input(lead: &Lead, options: ConversionOptions) -> OpportunityInput {
    OpportunityInput {
        lead_id: Some(lead.id.clone()),
        name: Some(options.name.unwrap_or_else(|| lead.name.clone())),
        company: Some(lead.company.clone()),
        email: Some(lead.email.clone()),
        value: Some(options.value.unwrap_or(0.0)),
        stage: Some(options.stage.unwrap_or(Stage::Prospecting)),
        notes: options.notes.or_else(|| lead.notes.clone()),
    }
}
