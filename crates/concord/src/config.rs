//! Configuration loading.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`concord.toml` compiled into the crate)
//! 2. `~/.config/concord/concord.toml`
//! 3. `./concord.toml`

use crate::LoggingConfig;
use concord_error::{ConcordError, ConcordResult, ConfigError};
use concord_gateway::DispatcherConfig;
use concord_state::StateConfig;
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../concord.toml");

/// Complete Concord configuration.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct ConcordConfig {
    /// State tunables
    #[serde(default)]
    state: StateConfig,
    /// Event dispatch tunables
    #[serde(default)]
    dispatcher: DispatcherConfig,
    /// Logging setup
    #[serde(default)]
    logging: LoggingConfig,
}

impl ConcordConfig {
    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use concord::ConcordConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ConcordConfig::load()?;
    /// println!("keeping {} messages per channel", config.state().max_messages());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> ConcordResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::home_dir() {
            let home_config = config_dir.join(".config/concord/concord.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("concord").required(false));

        let config = builder.build().map_err(|e| {
            ConcordError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?;
        Self::deserialize_from(config)
    }

    /// Load configuration from a single file; missing keys take their defaults.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ConcordResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConcordError::from(
                    ConfigError::new(format!("Failed to load configuration: {}", e))
                        .with_origin(path.as_ref().display().to_string()),
                )
            })?;
        Self::deserialize_from(config)
    }

    fn deserialize_from(config: Config) -> ConcordResult<Self> {
        config.try_deserialize().map_err(|e| {
            ConcordError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
    }
}
