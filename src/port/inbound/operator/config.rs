//! Configuration projections for operator-facing adapters.

use rust_decimal::Decimal;

use crate::error::Result;

/// Source locations of a configuration view.
#[derive(Debug, Clone)]
pub struct ConfigSources {
    pub bets_database: String,
    pub history_database: String,
    pub player_extract: String,
}

/// Settlement policy section of a configuration view.
#[derive(Debug, Clone)]
pub struct ConfigSettlement {
    pub tie_policy: String,
    pub duration_unit: String,
    pub totals_extract_fallback: bool,
    pub default_stake: Decimal,
    pub recent_within_days: i64,
    pub stale_after_days: i64,
    pub skip_future_events: bool,
}

/// Full configuration projection for operator-facing output.
#[derive(Debug, Clone)]
pub struct ConfigView {
    pub log_level: String,
    pub log_format: String,
    pub sources: ConfigSources,
    pub date_tolerance_days: i64,
    pub team_aliases: usize,
    pub settlement: ConfigSettlement,
}

/// Validation output for `config validate`.
#[derive(Debug, Clone, Default)]
pub struct ConfigValidationReport {
    pub warnings: Vec<String>,
}

/// Command-line overrides applied on top of the `[logging]` section.
#[derive(Debug, Clone, Default)]
pub struct LogOverrides {
    /// Filter directive replacing the configured level.
    pub level: Option<String>,
    /// Force JSON log lines.
    pub json: bool,
    /// `-v` count; raises the level when no explicit level is given.
    pub verbose: u8,
}

/// Configuration use-cases for operator-facing adapters.
pub trait ConfigurationOperator: Send + Sync {
    /// Install the tracing subscriber from the config's logging section.
    fn init_logging(&self, config_toml: &str, overrides: &LogOverrides) -> Result<()>;

    /// Build a projection for `config show`.
    fn show_config(&self, config_toml: &str) -> Result<ConfigView>;

    /// Validate config and return non-fatal warnings.
    fn validate_config(&self, config_toml: &str) -> Result<ConfigValidationReport>;
}
