//! Logging initialisation.

use concord_error::{ConcordResult, ConfigError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

fn default_level() -> String {
    "info".to_string()
}

/// How log output is filtered and formatted.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "concord_state=debug")
    #[serde(default = "default_level")]
    level: String,
    /// JSON lines instead of text
    #[serde(default)]
    json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. If a subscriber is already
/// installed this does nothing, so calling it more than once is harmless.
///
/// # Example
///
/// ```no_run
/// use concord::{LoggingConfig, init_logging};
///
/// # fn main() -> concord::ConcordResult<()> {
/// init_logging(&LoggingConfig::default().with_level("concord_state=debug"))?;
/// # Ok(())
/// # }
/// ```
pub fn init_logging(config: &LoggingConfig) -> ConcordResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level()))
        .map_err(|e| {
            ConfigError::new(format!("Invalid log filter '{}': {}", config.level(), e))
                .with_origin("logging.level")
        })?;

    let fmt_layer = if *config.json() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already installed");
    }
    Ok(())
}
