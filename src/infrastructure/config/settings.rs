//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; source paths can be replaced
//! through `RIFTBET_BETS_DB`, `RIFTBET_HISTORY_DB` and `RIFTBET_EXTRACT`.
//!
//! # Example
//!
//! ```no_run
//! use riftbet::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

use super::logging::LoggingConfig;
use super::matching::MatchingConfig;
use super::settlement::SettlementConfig;
use super::sources::SourcesConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Wager database, history database and extract locations.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Extract matching: date tolerance and team aliases.
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Tie, duration, stake and age policies.
    #[serde(default)]
    pub settlement: SettlementConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.sources.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {}", LoggingConfig::FORMATS.join(", ")),
            }
            .into());
        }

        for (field, value) in [
            ("sources.bets_database", &self.sources.bets_database),
            ("sources.history_database", &self.sources.history_database),
            ("sources.player_extract", &self.sources.player_extract),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }

        let tolerance = self.matching.date_tolerance_days;
        if !(0..=MatchingConfig::MAX_TOLERANCE_DAYS).contains(&tolerance) {
            return Err(ConfigError::InvalidValue {
                field: "matching.date_tolerance_days",
                reason: format!("must be between 0 and {}", MatchingConfig::MAX_TOLERANCE_DAYS),
            }
            .into());
        }
        if let Some((from, _)) = self
            .matching
            .team_aliases
            .iter()
            .find(|(from, to)| from.trim().is_empty() || to.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "matching.team_aliases",
                reason: format!("alias entry {from:?} must map a non-empty name to a non-empty name"),
            }
            .into());
        }

        let settlement = &self.settlement;
        if settlement.default_stake <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "settlement.default_stake",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if settlement.recent_within_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "settlement.recent_within_days",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if settlement.stale_after_days < settlement.recent_within_days {
            return Err(ConfigError::InvalidValue {
                field: "settlement.stale_after_days",
                reason: "must be >= recent_within_days".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
