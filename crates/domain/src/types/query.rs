//! List query types: filters, sort keys and persisted preferences

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lead::{Lead, LeadSource, LeadStatus};
use super::opportunity::Opportunity;
use crate::impl_domain_enum_conversions;
use crate::utils::sort::{SortDirection, SortKey};

/// Filter over a closed set of values with an "all" sentinel.
///
/// `All` is not a member of the filtered enum; on the wire it is the string
/// `"all"`, while `Only(v)` is `v`'s own wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Filter<T> {
    /// Whether `value` passes this filter.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T> From<Option<T>> for Filter<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: Serialize> Serialize for Filter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for Filter<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Lead list filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadFilters {
    pub query: String,
    pub status: Filter<LeadStatus>,
    pub source: Filter<LeadSource>,
}

impl LeadFilters {
    /// Whether `lead` passes every active filter.
    ///
    /// The query is trimmed and matched case-insensitively as a substring of
    /// name, email or company; an empty query passes everything.
    pub fn matches(&self, lead: &Lead) -> bool {
        let query = self.query.trim().to_lowercase();
        let query_ok = query.is_empty()
            || lead.name.to_lowercase().contains(&query)
            || lead.email.to_lowercase().contains(&query)
            || lead.company.to_lowercase().contains(&query);

        query_ok && self.status.matches(&lead.status) && self.source.matches(&lead.source)
    }
}

/// Sortable lead columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadsSortKey {
    #[default]
    Score,
    Name,
    Email,
    Company,
    CreatedAt,
    Status,
}

impl_domain_enum_conversions!(LeadsSortKey {
    Score => "score",
    Name => "name",
    Email => "email",
    Company => "company",
    CreatedAt => "createdAt",
    Status => "status",
});

impl LeadsSortKey {
    /// Derived sort key for `lead` under this column.
    pub fn extract(self, lead: &Lead) -> SortKey {
        match self {
            Self::Score => SortKey::from(lead.score),
            Self::Name => SortKey::text(lead.name.as_str()),
            Self::Email => SortKey::text(lead.email.as_str()),
            Self::Company => SortKey::text(lead.company.as_str()),
            Self::CreatedAt => SortKey::Text(timestamp_key(&lead.created_at)),
            Self::Status => SortKey::text(lead.status.as_str()),
        }
    }
}

/// Sortable opportunity columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpportunitySortKey {
    #[default]
    CreatedAt,
    Name,
    Company,
    Value,
    Stage,
}

impl_domain_enum_conversions!(OpportunitySortKey {
    CreatedAt => "createdAt",
    Name => "name",
    Company => "company",
    Value => "value",
    Stage => "stage",
});

impl OpportunitySortKey {
    /// Derived sort key for `opportunity` under this column.
    pub fn extract(self, opportunity: &Opportunity) -> SortKey {
        match self {
            Self::CreatedAt => SortKey::Text(timestamp_key(&opportunity.created_at)),
            Self::Name => SortKey::text(opportunity.name.as_str()),
            Self::Company => SortKey::text(opportunity.company.as_deref().unwrap_or_default()),
            Self::Value => SortKey::Number(opportunity.amount()),
            Self::Stage => SortKey::text(opportunity.stage.as_str()),
        }
    }
}

/// Fixed-width UTC rendering so lexical order equals chronological order.
fn timestamp_key(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Persisted lead list preferences
///
/// Missing fields in a stored record fall back to the defaults (no filters,
/// highest score first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadPrefs {
    pub filters: LeadFilters,
    pub sort_key: LeadsSortKey,
    pub sort_dir: SortDirection,
}

impl Default for LeadPrefs {
    fn default() -> Self {
        Self {
            filters: LeadFilters::default(),
            sort_key: LeadsSortKey::Score,
            sort_dir: SortDirection::Desc,
        }
    }
}

/// Persisted opportunity list preferences (newest first by default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpportunityPrefs {
    pub sort_key: OpportunitySortKey,
    pub sort_dir: SortDirection,
}

impl Default for OpportunityPrefs {
    fn default() -> Self {
        Self { sort_key: OpportunitySortKey::CreatedAt, sort_dir: SortDirection::Desc }
    }
}
