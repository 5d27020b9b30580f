//! Settlement writer: verdict to persisted wager update.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{SettlementRecord, Verdict, Wager};
use crate::error::Result;
use crate::port::outbound::store::WagerStore;

/// What [`SettlementWriter::apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Settlement fields written.
    Written,
    /// Would have written; dry run.
    DryRun,
    /// The wager was already won/lost; nothing changed.
    AlreadySettled,
    /// Verdict is unresolved; nothing to write.
    Unchanged,
}

/// Persists settled verdicts, at most once per wager.
pub struct SettlementWriter {
    store: Arc<dyn WagerStore>,
    dry_run: bool,
}

impl SettlementWriter {
    #[must_use]
    pub fn new(store: Arc<dyn WagerStore>) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Apply a verdict. Unresolved verdicts touch nothing; settled ones write
    /// every settlement field in one atomic update guarded on the wager still
    /// being open, so re-running is a no-op.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn apply(&self, wager: &Wager, verdict: &Verdict, now: DateTime<Utc>) -> Result<WriteOutcome> {
        if wager.status.is_settled() {
            return Ok(WriteOutcome::AlreadySettled);
        }
        let Some(record) = SettlementRecord::from_verdict(wager.id, verdict, now) else {
            return Ok(WriteOutcome::Unchanged);
        };

        if self.dry_run {
            debug!(wager_id = %wager.id, outcome = %record.status, "Dry run, settlement not written");
            return Ok(WriteOutcome::DryRun);
        }

        if self.store.record_settlement(&record)? {
            info!(
                wager_id = %wager.id,
                outcome = %record.status,
                actual = %record.actual_value,
                profit = %record.actual_profit,
                "Wager settled"
            );
            Ok(WriteOutcome::Written)
        } else {
            debug!(wager_id = %wager.id, "Wager already settled in store");
            Ok(WriteOutcome::AlreadySettled)
        }
    }
}
