//! CLI configuration
//!
//! Settings come from `SETTLE_*` environment variables (after `.env` has been
//! loaded by the binary) layered over the defaults below. Command-line flags
//! take precedence over both.

use serde::Deserialize;

use core_kernel::{DISPLAY_DECIMALS, SETTLEMENT_TOLERANCE};

/// Prefix of the environment variables read by [`CliConfig::from_env`]
pub const ENV_PREFIX: &str = "SETTLE";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory relative workspaces resolve against
    pub workspace: String,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Decimal places shown for amounts
    pub display_precision: u32,
    /// Balance magnitude below which a participant counts as settled
    pub tolerance: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            workspace: ".".to_string(),
            log_level: "warn".to_string(),
            display_precision: DISPLAY_DECIMALS,
            tolerance: SETTLEMENT_TOLERANCE,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Loads configuration from the given source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let config: Self = config::Config::builder()
            .set_default("workspace", defaults.workspace)?
            .set_default("log_level", defaults.log_level)?
            .set_default("display_precision", i64::from(defaults.display_precision))?
            .set_default("tolerance", defaults.tolerance)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        if !config.tolerance.is_finite() || config.tolerance < 0.0 {
            return Err(config::ConfigError::Message(format!(
                "tolerance must be a non-negative number, got {}",
                config.tolerance
            )));
        }
        Ok(config)
    }
}
