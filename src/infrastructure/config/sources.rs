//! Data source locations.

use serde::Deserialize;

/// Paths of the two databases and the flat extract.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Wager database (bets, events, teams).
    #[serde(default = "default_bets_database")]
    pub bets_database: String,

    /// Structured match history database.
    #[serde(default = "default_history_database")]
    pub history_database: String,

    /// Flat per-player statistics CSV.
    #[serde(default = "default_player_extract")]
    pub player_extract: String,
}

fn default_bets_database() -> String {
    "bets.db".to_string()
}

fn default_history_database() -> String {
    "history.db".to_string()
}

fn default_player_extract() -> String {
    "player_stats.csv".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            bets_database: default_bets_database(),
            history_database: default_history_database(),
            player_extract: default_player_extract(),
        }
    }
}

impl SourcesConfig {
    /// Environment variables that replace the configured paths.
    pub const BETS_DB_ENV: &'static str = "RIFTBET_BETS_DB";
    pub const HISTORY_DB_ENV: &'static str = "RIFTBET_HISTORY_DB";
    pub const EXTRACT_ENV: &'static str = "RIFTBET_EXTRACT";

    /// Apply non-empty environment overrides.
    pub fn apply_env(&mut self) {
        for (var, slot) in [
            (Self::BETS_DB_ENV, &mut self.bets_database),
            (Self::HISTORY_DB_ENV, &mut self.history_database),
            (Self::EXTRACT_ENV, &mut self.player_extract),
        ] {
            if let Some(value) = std::env::var(var).ok().filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
    }
}
