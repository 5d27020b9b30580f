//! End-of-run settlement report.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{EventId, Outcome, PendingAge, PendingReason, WagerId};

/// A wager settled during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledEntry {
    pub wager_id: WagerId,
    pub event_id: EventId,
    /// Human-readable predicate, e.g. `map 1 dragons under 4.5`.
    pub predicate: String,
    pub outcome: Outcome,
    pub actual_value: Decimal,
    pub profit: Decimal,
}

/// A wager still open after the run, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    pub wager_id: WagerId,
    pub event_id: EventId,
    pub market: String,
    pub selection: String,
    pub reason: PendingReason,
    pub age: PendingAge,
}

/// Count of still-open wagers per age bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeBreakdown {
    pub future: usize,
    pub recent: usize,
    pub this_week: usize,
    pub stale: usize,
    pub unknown: usize,
}

impl AgeBreakdown {
    pub fn record(&mut self, age: PendingAge) {
        *self.slot(age) += 1;
    }

    #[must_use]
    pub fn count(&self, age: PendingAge) -> usize {
        match age {
            PendingAge::Future => self.future,
            PendingAge::Recent => self.recent,
            PendingAge::ThisWeek => self.this_week,
            PendingAge::Stale => self.stale,
            PendingAge::Unknown => self.unknown,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        PendingAge::ALL.iter().map(|age| self.count(*age)).sum()
    }

    fn slot(&mut self, age: PendingAge) -> &mut usize {
        match age {
            PendingAge::Future => &mut self.future,
            PendingAge::Recent => &mut self.recent,
            PendingAge::ThisWeek => &mut self.this_week,
            PendingAge::Stale => &mut self.stale,
            PendingAge::Unknown => &mut self.unknown,
        }
    }
}

/// Summary of one settlement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReport {
    pub started_at: DateTime<Utc>,
    pub dry_run: bool,
    /// Open wagers when the run began.
    pub pending_before: usize,
    pub settled: Vec<SettledEntry>,
    pub pending: Vec<PendingEntry>,
    /// Open wagers another writer settled while this run was in progress.
    pub skipped: usize,
    pub ages: AgeBreakdown,
}

impl SettlementReport {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, dry_run: bool, pending_before: usize) -> Self {
        Self {
            started_at,
            dry_run,
            pending_before,
            settled: Vec::new(),
            pending: Vec::new(),
            skipped: 0,
            ages: AgeBreakdown::default(),
        }
    }

    pub fn push_settled(&mut self, entry: SettledEntry) {
        self.settled.push(entry);
    }

    pub fn push_pending(&mut self, entry: PendingEntry) {
        self.ages.record(entry.age);
        self.pending.push(entry);
    }

    #[must_use]
    pub fn won(&self) -> usize {
        self.count_outcome(Outcome::Won)
    }

    #[must_use]
    pub fn lost(&self) -> usize {
        self.count_outcome(Outcome::Lost)
    }

    #[must_use]
    pub fn still_pending(&self) -> usize {
        self.pending.len()
    }

    /// Realized profit of the wagers settled in this run.
    #[must_use]
    pub fn net_profit(&self) -> Decimal {
        self.settled.iter().map(|entry| entry.profit).sum()
    }

    /// Pending wagers likely to settle on a later run without intervention.
    pub fn transient(&self) -> impl Iterator<Item = &PendingEntry> {
        self.pending.iter().filter(|entry| entry.reason.is_transient())
    }

    /// Pending wagers that need an operator to look at them.
    pub fn needs_review(&self) -> impl Iterator<Item = &PendingEntry> {
        self.pending.iter().filter(|entry| !entry.reason.is_transient())
    }

    fn count_outcome(&self, outcome: Outcome) -> usize {
        self.settled.iter().filter(|entry| entry.outcome == outcome).count()
    }
}
