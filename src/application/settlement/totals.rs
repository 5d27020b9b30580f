//! Totals resolver: combined both-sides statistics per map.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{
    DurationUnit, EventInfo, PendingReason, Predicate, Resolution, StatKind,
};
use crate::error::Result;
use crate::port::outbound::matcher::IdentityMatcher;
use crate::port::outbound::source::MapResultStore;

/// Resolves totals predicates from the structured result store, optionally
/// falling back to the flat extract's team-aggregate rows.
pub struct TotalsResolver {
    results: Arc<dyn MapResultStore>,
    fallback: Option<Arc<dyn IdentityMatcher>>,
    duration_unit: DurationUnit,
}

impl TotalsResolver {
    #[must_use]
    pub fn new(results: Arc<dyn MapResultStore>) -> Self {
        Self {
            results,
            fallback: None,
            duration_unit: DurationUnit::default(),
        }
    }

    /// Derive counters from the extract when the structured store has none.
    #[must_use]
    pub fn with_extract_fallback(mut self, matcher: Arc<dyn IdentityMatcher>) -> Self {
        self.fallback = Some(matcher);
        self
    }

    #[must_use]
    pub fn with_duration_unit(mut self, unit: DurationUnit) -> Self {
        self.duration_unit = unit;
        self
    }

    /// Actual combined value of the predicate's statistic on its map.
    ///
    /// A map with no concluded result is [`Resolution::Unavailable`], not an
    /// error.
    ///
    /// # Errors
    /// Returns an error only when a result source fails.
    pub fn resolve(&self, event: &EventInfo, predicate: &Predicate) -> Result<Resolution> {
        let map = predicate.map;
        let stat = predicate.stat;

        if let Some(result) = self.results.map_result(&event.id, map)? {
            if let Some(value) = result.combined(stat) {
                debug!(
                    event_id = %event.id,
                    map = map.get(),
                    stat = %stat,
                    actual = %value,
                    source = self.results.source_name(),
                    "Resolved totals"
                );
                return Ok(Resolution::Resolved(self.normalize(stat, value)));
            }
            debug!(
                event_id = %event.id,
                map = map.get(),
                stat = %stat,
                "Map result has no counter for statistic"
            );
        }

        if let Some(matcher) = &self.fallback {
            match matcher.locate(event)? {
                Ok(series) => {
                    if let Some(value) = series.map_result(map).and_then(|r| r.combined(stat)) {
                        debug!(
                            event_id = %event.id,
                            map = map.get(),
                            stat = %stat,
                            actual = %value,
                            source = "extract",
                            "Resolved totals from extract"
                        );
                        return Ok(Resolution::Resolved(self.normalize(stat, value)));
                    }
                }
                Err(failure) => {
                    debug!(event_id = %event.id, reason = %failure, "Extract fallback found no game");
                }
            }
        }

        Ok(Resolution::Unavailable(PendingReason::ResultUnavailable {
            map: map.get(),
            stat,
        }))
    }

    fn normalize(&self, stat: StatKind, value: Decimal) -> Decimal {
        match stat {
            StatKind::Duration => self.duration_unit.from_seconds(value),
            _ => value,
        }
    }
}
