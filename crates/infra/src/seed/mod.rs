//! Lead seed sources
//!
//! Implementations of the `LeadSeedSource` port. Any failure to produce the
//! seed is reported as `LoadFailure("Failed to load leads")`; the underlying
//! cause is logged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use seller_console_core::LeadSeedSource;
use seller_console_domain::constants::LEADS_LOAD_ERROR;
use seller_console_domain::{ConsoleError, Lead, Result};
use tracing::{debug, error};

use crate::errors::InfraError;

const EMBEDDED_LEADS: &str = include_str!("../../data/leads.json");

fn load_failure(cause: &ConsoleError, origin: &str) -> ConsoleError {
    error!(origin, error = %cause, "lead seed unavailable");
    ConsoleError::LoadFailure(LEADS_LOAD_ERROR.to_string())
}

fn parse_seed(contents: &str, origin: &str) -> Result<Vec<Lead>> {
    serde_json::from_str::<Vec<Lead>>(contents)
        .map_err(|err| load_failure(&InfraError::from(err).0, origin))
}

/// Seed read from a JSON array on disk at every fetch
#[derive(Debug, Clone)]
pub struct JsonFileLeadSeed {
    path: PathBuf,
}

impl JsonFileLeadSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LeadSeedSource for JsonFileLeadSeed {
    async fn load_seed(&self) -> Result<Vec<Lead>> {
        let origin = self.path.display().to_string();
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| load_failure(&InfraError::from(err).0, &origin))?;
        let leads = parse_seed(&contents, &origin)?;
        debug!(path = %origin, count = leads.len(), "lead seed read");
        Ok(leads)
    }
}

/// The sample dataset bundled with the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLeadSeed;

#[async_trait]
impl LeadSeedSource for EmbeddedLeadSeed {
    async fn load_seed(&self) -> Result<Vec<Lead>> {
        parse_seed(EMBEDDED_LEADS, "embedded")
    }
}

/// Fixed in-memory seed
#[derive(Debug, Clone, Default)]
pub struct StaticLeadSeed {
    leads: Vec<Lead>,
}

impl StaticLeadSeed {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self { leads }
    }
}

#[async_trait]
impl LeadSeedSource for StaticLeadSeed {
    async fn load_seed(&self) -> Result<Vec<Lead>> {
        Ok(self.leads.clone())
    }
}
