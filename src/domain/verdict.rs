//! Settlement verdicts and the reasons a wager stays open.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::market::StatKind;

/// Final result of a settled wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// Realized profit for this outcome.
    ///
    /// A win pays `stake * (odds - 1)`; a loss costs the stake.
    #[must_use]
    pub fn profit(self, odds: Decimal, stake: Decimal) -> Decimal {
        match self {
            Self::Won => stake * (odds - Decimal::ONE),
            Self::Lost => -stake,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a value exactly equal to the line is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// An exact tie loses for both directions.
    #[default]
    Lose,
    /// An exact tie is left open for manual review instead of settled.
    Review,
}

/// Unit a duration line is quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Seconds,
    Minutes,
}

impl DurationUnit {
    /// Express a duration recorded in seconds in this unit.
    #[must_use]
    pub fn from_seconds(self, seconds: Decimal) -> Decimal {
        match self {
            Self::Seconds => seconds,
            Self::Minutes => (seconds / Decimal::from(60)).round_dp(2),
        }
    }
}

/// Why the market/selection text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no recognized statistic in '{text}'")]
    UnknownStatistic { text: String },

    #[error("selection '{selection}' has no leading Over/Under")]
    MissingDirection { selection: String },

    #[error("selection '{selection}' names no player")]
    MissingSubject { selection: String },

    #[error("line '{line}' is not numeric")]
    InvalidLine { line: String },

    #[error("map {value} is out of range")]
    InvalidMap { value: i64 },
}

/// Why the event could not be located in the flat extract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityFailure {
    #[error("event has no nominal date")]
    MissingDate,

    #[error("no extract game for {home} vs {away} near {date}")]
    NoMatch {
        home: String,
        away: String,
        date: String,
    },

    #[error("{candidates} extract games for {home} vs {away} are equally close")]
    Ambiguous {
        home: String,
        away: String,
        candidates: usize,
    },
}

/// Why a wager is still open after a settlement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PendingReason {
    #[error("unparsed: {0}")]
    Unparsed(ParseFailure),

    #[error("event not found in the wager store")]
    EventUnknown,

    #[error("event has not started")]
    NotStarted,

    #[error("no concluded result for map {map} ({stat})")]
    ResultUnavailable { map: u8, stat: StatKind },

    #[error("identity unresolved: {0}")]
    IdentityUnresolved(IdentityFailure),

    #[error("player '{player}' not found on map {map}")]
    SubjectNotFound { player: String, map: u8 },

    #[error("actual value {actual} equals the line, left for review")]
    TieUnderReview { actual: Decimal },
}

impl PendingReason {
    /// Stable label used in reports and JSON output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unparsed(_) => "unparsed",
            Self::EventUnknown => "event_unknown",
            Self::NotStarted => "not_started",
            Self::ResultUnavailable { .. } => "result_unavailable",
            Self::IdentityUnresolved(IdentityFailure::Ambiguous { .. }) => "identity_ambiguous",
            Self::IdentityUnresolved(_) => "identity_unresolved",
            Self::SubjectNotFound { .. } => "subject_not_found",
            Self::TieUnderReview { .. } => "tie_review",
        }
    }

    /// Whether the next run may settle this wager without operator action.
    ///
    /// Parse failures, ambiguous identities and ties never resolve on their
    /// own; everything else is waiting on data that may still arrive.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Unparsed(_) | Self::TieUnderReview { .. } => false,
            Self::IdentityUnresolved(IdentityFailure::Ambiguous { .. }) => false,
            Self::IdentityUnresolved(IdentityFailure::MissingDate) => false,
            Self::EventUnknown
            | Self::NotStarted
            | Self::ResultUnavailable { .. }
            | Self::IdentityUnresolved(IdentityFailure::NoMatch { .. })
            | Self::SubjectNotFound { .. } => true,
        }
    }
}

/// Output of a resolver: the actual statistic, or why there is none yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Decimal),
    Unavailable(PendingReason),
}

/// Decision for one wager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Settled {
        outcome: Outcome,
        actual_value: Decimal,
        profit: Decimal,
    },
    Unresolved(PendingReason),
}

impl Verdict {
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settled { .. })
    }
}
