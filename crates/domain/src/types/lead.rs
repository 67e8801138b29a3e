//! Lead types
//!
//! Leads are read from a seed resource that is never rewritten. Edits are
//! stored as per-id [`LeadUpdate`] overrides and merged on top at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Qualification status of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Unqualified,
}

impl_domain_enum_conversions!(LeadStatus {
    New => "new",
    Contacted => "contacted",
    Qualified => "qualified",
    Unqualified => "unqualified",
});

impl LeadStatus {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::Unqualified => "Unqualified",
        }
    }
}

/// Channel the lead arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Webform,
    Linkedin,
    Referral,
    Ads,
    Event,
}

impl_domain_enum_conversions!(LeadSource {
    Webform => "webform",
    Linkedin => "linkedin",
    Referral => "referral",
    Ads => "ads",
    Event => "event",
});

impl LeadSource {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Webform => "Web form",
            Self::Linkedin => "LinkedIn",
            Self::Referral => "Referral",
            Self::Ads => "Ads",
            Self::Event => "Event",
        }
    }
}

/// A prospective contact with a qualification score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: LeadStatus,
    pub source: LeadSource,
    /// 0–100
    pub score: u8,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial lead update, also the persisted override shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LeadSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LeadUpdate {
    pub fn email(email: impl Into<String>) -> Self {
        Self { email: Some(email.into()), ..Self::default() }
    }

    pub fn status(status: LeadStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite `lead` with every field present in this patch.
    pub fn apply_to(&self, lead: &mut Lead) {
        if let Some(name) = &self.name {
            lead.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            lead.email.clone_from(email);
        }
        if let Some(company) = &self.company {
            lead.company.clone_from(company);
        }
        if let Some(status) = self.status {
            lead.status = status;
        }
        if let Some(source) = self.source {
            lead.source = source;
        }
        if let Some(score) = self.score {
            lead.score = score;
        }
        if let Some(notes) = &self.notes {
            lead.notes = Some(notes.clone());
        }
    }

    /// Fold `newer` into this patch; fields present in `newer` win.
    pub fn merge(&mut self, newer: &LeadUpdate) {
        if newer.name.is_some() {
            self.name.clone_from(&newer.name);
        }
        if newer.email.is_some() {
            self.email.clone_from(&newer.email);
        }
        if newer.company.is_some() {
            self.company.clone_from(&newer.company);
        }
        if newer.status.is_some() {
            self.status = newer.status;
        }
        if newer.source.is_some() {
            self.source = newer.source;
        }
        if newer.score.is_some() {
            self.score = newer.score;
        }
        if newer.notes.is_some() {
            self.notes.clone_from(&newer.notes);
        }
    }
}
