//! Configuration operator implementation.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::config::{
    ConfigSettlement, ConfigSources, ConfigValidationReport, ConfigView, ConfigurationOperator,
    LogOverrides,
};

use super::entry::Operator;

fn lowercase_debug(value: impl std::fmt::Debug) -> String {
    format!("{value:?}").to_lowercase()
}

impl ConfigurationOperator for Operator {
    fn init_logging(&self, config_toml: &str, overrides: &LogOverrides) -> Result<()> {
        let config = Config::parse_toml(config_toml)?;
        let mut logging = config.logging;
        match (&overrides.level, overrides.verbose) {
            (Some(level), _) => logging.level = level.clone(),
            (None, 0) => {}
            (None, 1) => logging.level = "debug".into(),
            (None, _) => logging.level = "trace".into(),
        }
        if overrides.json {
            logging.format = "json".into();
        }
        logging.init();
        Ok(())
    }

    fn show_config(&self, config_toml: &str) -> Result<ConfigView> {
        let config = Config::parse_toml(config_toml)?;
        let settlement = &config.settlement;

        Ok(ConfigView {
            log_level: config.logging.level.clone(),
            log_format: config.logging.format.clone(),
            sources: ConfigSources {
                bets_database: config.sources.bets_database.clone(),
                history_database: config.sources.history_database.clone(),
                player_extract: config.sources.player_extract.clone(),
            },
            date_tolerance_days: config.matching.date_tolerance_days,
            team_aliases: config.matching.aliases().len(),
            settlement: ConfigSettlement {
                tie_policy: lowercase_debug(settlement.tie_policy),
                duration_unit: lowercase_debug(settlement.duration_unit),
                totals_extract_fallback: settlement.totals_extract_fallback,
                default_stake: settlement.default_stake,
                recent_within_days: settlement.recent_within_days,
                stale_after_days: settlement.stale_after_days,
                skip_future_events: settlement.skip_future_events,
            },
        })
    }

    fn validate_config(&self, config_toml: &str) -> Result<ConfigValidationReport> {
        let config = Config::parse_toml(config_toml)?;
        let mut warnings = Vec::new();

        for (label, path) in [
            ("Wager database", &config.sources.bets_database),
            ("History database", &config.sources.history_database),
        ] {
            if path != ":memory:" && !Path::new(path).exists() {
                warnings.push(format!("{label} not found at {path} (an empty one will be created)"));
            }
        }
        if !Path::new(&config.sources.player_extract).exists() {
            warnings.push(format!(
                "Player extract not found at {} (player markets will stay pending)",
                config.sources.player_extract
            ));
        }
        if !config.settlement.totals_extract_fallback {
            warnings.push("Totals extract fallback disabled".to_string());
        }
        if config.matching.date_tolerance_days == 0 {
            warnings.push("Date tolerance is 0; games after midnight UTC will not match".to_string());
        }

        Ok(ConfigValidationReport { warnings })
    }
}
