//! Error types used throughout the console

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the seller console.
///
/// Repository and controller operations return this type so a view can branch
/// on the kind of failure (retry banner, inline validation message, "already
/// converted" notice) without parsing strings.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ConsoleError {
    /// Seed resource or store could not be read.
    #[error("Load failure: {0}")]
    LoadFailure(String),

    /// Input rejected before any mutation happened.
    #[error("Validation failure: {0}")]
    Validation(String),

    /// Update or delete targeted an id that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Converting the lead would create a second opportunity for it.
    #[error("Duplicate opportunity for lead {lead_id}")]
    DuplicateConversion {
        /// Lead that was already converted
        lead_id: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Whether the view should offer a retry for this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LoadFailure(_) | Self::Storage(_))
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadFailure(_) => "load_failure",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::DuplicateConversion { .. } => "duplicate_conversion",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;
