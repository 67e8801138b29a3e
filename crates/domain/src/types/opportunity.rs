//! Opportunity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Pipeline stage of an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Prospecting,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl_domain_enum_conversions!(Stage {
    Prospecting => "prospecting",
    Qualified => "qualified",
    Proposal => "proposal",
    Negotiation => "negotiation",
    Won => "won",
    Lost => "lost",
});

impl Stage {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Prospecting => "Prospecting",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }
}

/// A sales deal, optionally converted from a lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    /// Originating lead, if converted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Deal amount (USD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub stage: Stage,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Opportunity {
    /// Amount with the implicit zero default.
    pub fn amount(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Data accepted to create or patch an opportunity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpportunityInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OpportunityInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Overwrite `opportunity` with every field present in this input.
    pub fn apply_to(&self, opportunity: &mut Opportunity) {
        if self.lead_id.is_some() {
            opportunity.lead_id.clone_from(&self.lead_id);
        }
        if let Some(name) = &self.name {
            opportunity.name.clone_from(name);
        }
        if self.company.is_some() {
            opportunity.company.clone_from(&self.company);
        }
        if self.email.is_some() {
            opportunity.email.clone_from(&self.email);
        }
        if self.value.is_some() {
            opportunity.value = self.value;
        }
        if let Some(stage) = self.stage {
            opportunity.stage = stage;
        }
        if self.notes.is_some() {
            opportunity.notes.clone_from(&self.notes);
        }
    }
}
