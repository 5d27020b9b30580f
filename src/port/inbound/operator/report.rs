//! Read-only wager reports for operator-facing adapters.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{EventId, PendingAge, PerformanceSummary, WagerId, WagerStatus};
use crate::error::Result;

/// One open wager as listed by `pending`.
#[derive(Debug, Clone)]
pub struct PendingWagerView {
    pub wager_id: WagerId,
    pub event_id: EventId,
    /// "Home vs Away", when the event is known.
    pub teams: Option<String>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub market: String,
    pub selection: String,
    pub line: String,
    pub odds: Decimal,
    pub status: WagerStatus,
    pub age: PendingAge,
}

/// Report use cases for operator-facing adapters.
pub trait ReportOperator: Send + Sync {
    /// Every open wager with its age bucket relative to `now`.
    fn pending_wagers(&self, config_toml: &str, now: DateTime<Utc>) -> Result<Vec<PendingWagerView>>;

    /// Realized performance over the whole wager store.
    fn performance(&self, config_toml: &str) -> Result<PerformanceSummary>;
}
