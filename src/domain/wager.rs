//! Wagers and their settlement fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use super::id::{EventId, WagerId};
use super::verdict::{Outcome, Verdict};

/// Lifecycle state of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WagerStatus {
    Pending,
    ToVerify,
    Won,
    Lost,
}

impl WagerStatus {
    /// States the settlement engine scans.
    pub const OPEN: [WagerStatus; 2] = [WagerStatus::Pending, WagerStatus::ToVerify];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ToVerify => "to_verify",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::ToVerify)
    }

    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl From<Outcome> for WagerStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Self::Won,
            Outcome::Lost => Self::Lost,
        }
    }
}

impl FromStr for WagerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "to_verify" => Ok(Self::ToVerify),
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            other => Err(format!("unknown wager status '{other}'")),
        }
    }
}

impl fmt::Display for WagerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed wager.
///
/// Identity fields are fixed at placement. Settlement fields are written
/// only by the settlement engine, all together, once.
#[derive(Debug, Clone, PartialEq)]
pub struct Wager {
    pub id: WagerId,
    pub event_id: EventId,
    pub market: String,
    pub selection: String,
    /// Threshold line as stored, e.g. `"4.5"`.
    pub line: String,
    /// Map number recorded at placement, if any.
    pub map_number: Option<i32>,
    pub odds: Decimal,
    pub stake: Option<Decimal>,
    pub status: WagerStatus,
    pub actual_value: Option<Decimal>,
    pub actual_profit: Option<Decimal>,
    pub verified: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Wager {
    /// New open wager with no settlement fields.
    pub fn new(
        id: WagerId,
        event_id: impl Into<EventId>,
        market: impl Into<String>,
        selection: impl Into<String>,
        line: impl Into<String>,
        odds: Decimal,
    ) -> Self {
        Self {
            id,
            event_id: event_id.into(),
            market: market.into(),
            selection: selection.into(),
            line: line.into(),
            map_number: None,
            odds,
            stake: None,
            status: WagerStatus::Pending,
            actual_value: None,
            actual_profit: None,
            verified: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Recorded stake, or `default` when none was stored.
    #[must_use]
    pub fn stake_or(&self, default: Decimal) -> Decimal {
        self.stake.unwrap_or(default)
    }
}

/// The all-or-nothing settlement update for one wager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementRecord {
    pub wager_id: WagerId,
    pub status: WagerStatus,
    pub actual_value: Decimal,
    pub actual_profit: Decimal,
    pub verified: bool,
    pub updated_at: DateTime<Utc>,
}

impl SettlementRecord {
    /// Build the update for a settled verdict; `None` for unresolved ones.
    #[must_use]
    pub fn from_verdict(wager_id: WagerId, verdict: &Verdict, now: DateTime<Utc>) -> Option<Self> {
        match verdict {
            Verdict::Settled {
                outcome,
                actual_value,
                profit,
            } => Some(Self {
                wager_id,
                status: WagerStatus::from(*outcome),
                actual_value: *actual_value,
                actual_profit: *profit,
                verified: true,
                updated_at: now,
            }),
            Verdict::Unresolved(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verdict::PendingReason;
    use rust_decimal_macros::dec;

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            WagerStatus::Pending,
            WagerStatus::ToVerify,
            WagerStatus::Won,
            WagerStatus::Lost,
        ] {
            assert_eq!(status.as_str().parse::<WagerStatus>(), Ok(status));
        }
        assert!("void".parse::<WagerStatus>().is_err());
    }

    #[test]
    fn open_and_settled_are_disjoint() {
        assert!(WagerStatus::Pending.is_open());
        assert!(WagerStatus::ToVerify.is_open());
        assert!(WagerStatus::Won.is_settled());
        assert!(!WagerStatus::Lost.is_open());
    }

    #[test]
    fn record_only_for_settled_verdicts() {
        let now = Utc::now();
        let settled = Verdict::Settled {
            outcome: Outcome::Lost,
            actual_value: dec!(5),
            profit: dec!(-1),
        };
        let record = SettlementRecord::from_verdict(WagerId::new(7), &settled, now).unwrap();
        assert_eq!(record.status, WagerStatus::Lost);
        assert_eq!(record.actual_value, dec!(5));
        assert_eq!(record.actual_profit, dec!(-1));
        assert!(record.verified);

        let open = Verdict::Unresolved(PendingReason::NotStarted);
        assert!(SettlementRecord::from_verdict(WagerId::new(7), &open, now).is_none());
    }

    #[test]
    fn stake_defaults_when_missing() {
        let mut wager = Wager::new(WagerId::new(1), "e1", "Map 1 - Totals", "Over Total Kills", "27.5", dec!(1.8));
        assert_eq!(wager.stake_or(Decimal::ONE), Decimal::ONE);
        wager.stake = Some(dec!(2));
        assert_eq!(wager.stake_or(Decimal::ONE), dec!(2));
    }
}
