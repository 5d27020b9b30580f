//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{operator, output};
use crate::error::{ConfigError, Result};

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} to point at your databases", path.display()));
    output::note(&format!("2. Run: riftbet config validate -c {}", path.display()));
    output::note(&format!("3. Run: riftbet settle --dry-run -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config_toml = operator::load_config(path)?;
    let config = operator::with_source(&config_toml, operator::operator().show_config(&config_toml))?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config show",
            "logging": {
                "level": config.log_level,
                "format": config.log_format,
            },
            "sources": {
                "bets_database": config.sources.bets_database,
                "history_database": config.sources.history_database,
                "player_extract": config.sources.player_extract,
            },
            "matching": {
                "date_tolerance_days": config.date_tolerance_days,
                "team_aliases": config.team_aliases,
            },
            "settlement": {
                "tie_policy": config.settlement.tie_policy,
                "duration_unit": config.settlement.duration_unit,
                "totals_extract_fallback": config.settlement.totals_extract_fallback,
                "default_stake": config.settlement.default_stake.to_string(),
                "recent_within_days": config.settlement.recent_within_days,
                "stale_after_days": config.settlement.stale_after_days,
                "skip_future_events": config.settlement.skip_future_events,
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Log level", config.log_level);
    output::field("Log format", config.log_format);

    output::section("Sources");
    output::field("Wagers", config.sources.bets_database);
    output::field("History", config.sources.history_database);
    output::field("Extract", config.sources.player_extract);

    output::section("Matching");
    output::field("Tolerance", format!("±{} days", config.date_tolerance_days));
    output::field("Aliases", config.team_aliases);

    output::section("Settlement");
    let settlement = config.settlement;
    output::field("Ties", settlement.tie_policy);
    output::field("Duration", settlement.duration_unit);
    output::field(
        "Fallback",
        if settlement.totals_extract_fallback {
            "extract"
        } else {
            "none"
        },
    );
    output::field("Stake", settlement.default_stake);
    output::field(
        "Age buckets",
        format!(
            "recent ≤{}d, stale >{}d",
            settlement.recent_within_days, settlement.stale_after_days
        ),
    );
    output::field(
        "Future",
        if settlement.skip_future_events {
            "skipped"
        } else {
            "attempted"
        },
    );

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config_toml = operator::load_config(path)?;
    let validation =
        operator::with_source(&config_toml, operator::operator().validate_config(&config_toml))?;
    output::success("Config file is valid");

    if !validation.warnings.is_empty() {
        output::section("Warnings");
        for warning in &validation.warnings {
            output::warning(warning);
        }
    }

    output::field("Next", format!("riftbet config show -c {}", path.display()));

    Ok(())
}
