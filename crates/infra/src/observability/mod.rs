//! Logging initialisation
//!
//! Installs a `tracing-subscriber` fmt subscriber. `RUST_LOG` takes
//! precedence over the configured level. Calling it more than once is
//! harmless: only the first subscriber is kept.

use seller_console_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let installed = if config.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().try_init().is_ok()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
    };

    if installed {
        tracing::debug!(level = %config.level, json = config.json, "logging initialised");
    }
    installed
}
