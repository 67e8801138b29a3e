//! Configuration loader
//!
//! Loads console configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If any `SELLER_CONSOLE_*` variable is set, the environment wins and
//!    unset values keep their defaults
//! 2. Otherwise probes multiple paths for a config file
//! 3. Supports JSON and TOML formats
//! 4. With neither, the built-in defaults are used
//!
//! ## Environment Variables
//! - `SELLER_CONSOLE_STORAGE_PATH`: SQLite file path (memory when unset)
//! - `SELLER_CONSOLE_STORAGE_POOL_SIZE`: Connection pool size
//! - `SELLER_CONSOLE_STORAGE_NAMESPACE`: Key namespace
//! - `SELLER_CONSOLE_STORAGE_QUOTA_BYTES`: In-memory byte budget
//! - `SELLER_CONSOLE_SIMULATE_LATENCY`: Whether repositories sleep
//!   (true/false)
//! - `SELLER_CONSOLE_LEADS_SEED_PATH`: JSON lead seed file
//! - `SELLER_CONSOLE_SEARCH_DEBOUNCE_MS`: Search debounce in milliseconds
//! - `SELLER_CONSOLE_LOG_LEVEL`: Default log filter
//! - `SELLER_CONSOLE_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./seller-console.json` or `./seller-console.toml`
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use seller_console_domain::{Config, ConsoleError, LatencyConfig, Result};

use crate::errors::InfraError;

const ENV_PREFIX: &str = "SELLER_CONSOLE_";

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ConsoleError::Config` if a present source is malformed.
pub fn load() -> Result<Config> {
    if env_configured() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No configuration source found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// Every variable is optional; unset ones keep their default value.
///
/// # Errors
/// Returns `ConsoleError::Config` if a variable holds an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    if let Some(path) = env_opt("SELLER_CONSOLE_STORAGE_PATH") {
        config.storage.path = Some(path);
    }
    if let Some(size) = env_parse::<u32>("SELLER_CONSOLE_STORAGE_POOL_SIZE", "pool size")? {
        config.storage.pool_size = size;
    }
    if let Some(namespace) = env_opt("SELLER_CONSOLE_STORAGE_NAMESPACE") {
        config.storage.namespace = namespace;
    }
    if let Some(quota) = env_parse::<usize>("SELLER_CONSOLE_STORAGE_QUOTA_BYTES", "quota")? {
        config.storage.quota_bytes = Some(quota);
    }
    if !env_bool("SELLER_CONSOLE_SIMULATE_LATENCY", true) {
        config.latency = LatencyConfig::none();
    }

    if let Some(path) = env_opt("SELLER_CONSOLE_LEADS_SEED_PATH") {
        config.leads.seed_path = Some(path);
    }
    if let Some(ms) = env_parse::<u64>("SELLER_CONSOLE_SEARCH_DEBOUNCE_MS", "search debounce")? {
        config.leads.search_debounce_ms = ms;
    }

    if let Some(level) = env_opt("SELLER_CONSOLE_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("SELLER_CONSOLE_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Format is detected by file extension.
///
/// # Errors
/// Returns `ConsoleError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConsoleError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConsoleError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ConsoleError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).0),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConsoleError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ConsoleError::Config(format!("Unsupported config format: {}", extension))),
    }
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("seller-console.json"),
        dir.join("seller-console.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
    ]
}

/// Probe the working directory and then the executable's directory for a
/// config file. Returns the first one that exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_configured() -> bool {
    std::env::vars().any(|(key, _)| key.starts_with(ENV_PREFIX))
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConsoleError::Config(format!("Invalid {}: {}", what, e)))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
