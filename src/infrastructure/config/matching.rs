//! Extract matching configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::application::settlement::{ExtractMatcher, TeamAliases};

/// How wager-store events are located in the flat extract.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Days of slack around the event date.
    #[serde(default = "default_tolerance")]
    pub date_tolerance_days: i64,

    /// Extra provider name to extract name mappings, applied on top of the
    /// built-in table.
    #[serde(default)]
    pub team_aliases: BTreeMap<String, String>,
}

fn default_tolerance() -> i64 {
    ExtractMatcher::DEFAULT_TOLERANCE_DAYS
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            date_tolerance_days: default_tolerance(),
            team_aliases: BTreeMap::new(),
        }
    }
}

impl MatchingConfig {
    /// Largest accepted date tolerance.
    pub const MAX_TOLERANCE_DAYS: i64 = 7;

    /// Built-in aliases extended with the configured ones.
    #[must_use]
    pub fn aliases(&self) -> TeamAliases {
        TeamAliases::standard().extend(&self.team_aliases)
    }
}
