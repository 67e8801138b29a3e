//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    LEADS_FETCH_DELAY_MS, LEAD_UPDATE_DELAY_MS, OPPORTUNITY_DELETE_DELAY_MS,
    OPPORTUNITY_LIST_DELAY_MS, OPPORTUNITY_WRITE_DELAY_MS, SEARCH_DEBOUNCE_MS, STORAGE_NAMESPACE,
};

/// Console configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub latency: LatencyConfig,
    pub leads: LeadsConfig,
    pub logging: LoggingConfig,
}

/// Key-value substrate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file path. `None` keeps everything in memory.
    pub path: Option<String>,
    pub pool_size: u32,
    pub namespace: String,
    /// Byte budget for the in-memory substrate, mimicking a browser quota.
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            pool_size: 4,
            namespace: STORAGE_NAMESPACE.to_string(),
            quota_bytes: None,
        }
    }
}

/// Simulated repository latency, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub leads_fetch_ms: u64,
    pub lead_update_ms: u64,
    pub opportunity_list_ms: u64,
    pub opportunity_write_ms: u64,
    pub opportunity_delete_ms: u64,
}

impl LatencyConfig {
    /// No artificial delay anywhere; handy for tests and batch tooling.
    pub const fn none() -> Self {
        Self {
            leads_fetch_ms: 0,
            lead_update_ms: 0,
            opportunity_list_ms: 0,
            opportunity_write_ms: 0,
            opportunity_delete_ms: 0,
        }
    }

    pub fn leads_fetch(&self) -> Duration {
        Duration::from_millis(self.leads_fetch_ms)
    }

    pub fn lead_update(&self) -> Duration {
        Duration::from_millis(self.lead_update_ms)
    }

    pub fn opportunity_list(&self) -> Duration {
        Duration::from_millis(self.opportunity_list_ms)
    }

    pub fn opportunity_write(&self) -> Duration {
        Duration::from_millis(self.opportunity_write_ms)
    }

    pub fn opportunity_delete(&self) -> Duration {
        Duration::from_millis(self.opportunity_delete_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            leads_fetch_ms: LEADS_FETCH_DELAY_MS,
            lead_update_ms: LEAD_UPDATE_DELAY_MS,
            opportunity_list_ms: OPPORTUNITY_LIST_DELAY_MS,
            opportunity_write_ms: OPPORTUNITY_WRITE_DELAY_MS,
            opportunity_delete_ms: OPPORTUNITY_DELETE_DELAY_MS,
        }
    }
}

/// Lead list configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadsConfig {
    /// JSON seed file. `None` uses the bundled sample dataset.
    pub seed_path: Option<String>,
    pub search_debounce_ms: u64,
}

impl LeadsConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self { seed_path: None, search_debounce_ms: SEARCH_DEBOUNCE_MS }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
