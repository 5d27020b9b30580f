//! Settlement policy configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{AgePolicy, DurationUnit, TiePolicy};

/// Settlement behaviour knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// What an exact tie with the line does.
    #[serde(default)]
    pub tie_policy: TiePolicy,

    /// Derive totals from the extract when the history store has none.
    #[serde(default = "default_true")]
    pub totals_extract_fallback: bool,

    /// Unit duration lines are quoted in.
    #[serde(default)]
    pub duration_unit: DurationUnit,

    /// Stake assumed for wagers that recorded none.
    #[serde(default = "default_stake")]
    pub default_stake: Decimal,

    #[serde(default = "default_recent")]
    pub recent_within_days: i64,

    #[serde(default = "default_stale")]
    pub stale_after_days: i64,

    /// Leave wagers on events dated after today untouched.
    #[serde(default = "default_true")]
    pub skip_future_events: bool,
}

fn default_true() -> bool {
    true
}

fn default_stake() -> Decimal {
    Decimal::ONE
}

fn default_recent() -> i64 {
    AgePolicy::default().recent_within_days
}

fn default_stale() -> i64 {
    AgePolicy::default().stale_after_days
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tie_policy: TiePolicy::default(),
            totals_extract_fallback: true,
            duration_unit: DurationUnit::default(),
            default_stake: default_stake(),
            recent_within_days: default_recent(),
            stale_after_days: default_stale(),
            skip_future_events: true,
        }
    }
}

impl SettlementConfig {
    #[must_use]
    pub fn age_policy(&self) -> AgePolicy {
        AgePolicy {
            recent_within_days: self.recent_within_days,
            stale_after_days: self.stale_after_days,
        }
    }
}
