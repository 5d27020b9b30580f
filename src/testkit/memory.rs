//! In-memory implementations of the outbound ports.
//!
//! Each fake can be switched to fail every call, for error-path tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{
    EventId, EventInfo, GameHeader, IdentityFailure, MapIndex, MapResult, MatchedSeries,
    ParticipantRow, PerformanceSummary, SettlementRecord, Wager, WagerId,
};
use crate::error::{Error, Result};
use crate::port::outbound::matcher::{IdentityMatcher, SeriesLookup};
use crate::port::outbound::source::{FlatExtract, MapResultStore, ResultSource};
use crate::port::outbound::store::{EventDirectory, WagerStore};

fn unavailable(source: &str) -> Error {
    Error::Database(format!("{source} unavailable"))
}

/// Structured map results keyed by event and map.
#[derive(Debug, Default)]
pub struct MemoryResults {
    results: HashMap<(EventId, u8), MapResult>,
    failing: bool,
}

impl MemoryResults {
    #[must_use]
    pub fn with(mut self, event: impl Into<EventId>, result: MapResult) -> Self {
        self.results.insert((event.into(), result.map.get()), result);
        self
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

impl ResultSource for MemoryResults {
    fn source_name(&self) -> &str {
        "memory-results"
    }
}

impl MapResultStore for MemoryResults {
    fn map_result(&self, event: &EventId, map: MapIndex) -> Result<Option<MapResult>> {
        if self.failing {
            return Err(unavailable(self.source_name()));
        }
        Ok(self.results.get(&(event.clone(), map.get())).cloned())
    }
}

/// Flat extract rows held in a vector.
#[derive(Debug, Default)]
pub struct MemoryExtract {
    rows: Vec<ParticipantRow>,
}

impl MemoryExtract {
    #[must_use]
    pub fn with_row(mut self, row: ParticipantRow) -> Self {
        self.rows.push(row);
        self
    }
}

impl ResultSource for MemoryExtract {
    fn source_name(&self) -> &str {
        "memory-extract"
    }
}

impl FlatExtract for MemoryExtract {
    fn team_games_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<GameHeader>> {
        Ok(GameHeader::from_rows(self.rows.iter().filter(|row| {
            let day = row.played_at.date();
            day >= from && day <= to
        })))
    }

    fn rows_for_games(&self, game_ids: &[String]) -> Result<Vec<ParticipantRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| game_ids.contains(&row.game_id))
            .cloned()
            .collect())
    }
}

/// Identity matcher with a canned answer.
///
/// `missing` answers `NoMatch` for whichever event is asked about.
#[derive(Debug)]
pub struct MemoryMatcher {
    answer: Option<SeriesLookup>,
}

impl MemoryMatcher {
    #[must_use]
    pub fn found(rows: Vec<ParticipantRow>) -> Self {
        Self {
            answer: Some(Ok(MatchedSeries::from_rows(rows))),
        }
    }

    #[must_use]
    pub fn missing() -> Self {
        Self { answer: None }
    }

    #[must_use]
    pub fn failing_with(failure: IdentityFailure) -> Self {
        Self {
            answer: Some(Err(failure)),
        }
    }
}

impl IdentityMatcher for MemoryMatcher {
    fn locate(&self, event: &EventInfo) -> Result<SeriesLookup> {
        Ok(match &self.answer {
            Some(answer) => answer.clone(),
            None => Err(IdentityFailure::NoMatch {
                home: event.home_team.clone(),
                away: event.away_team.clone(),
                date: event
                    .match_day()
                    .map(|day| day.to_string())
                    .unwrap_or_default(),
            }),
        })
    }
}

/// Wager store and event directory behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryWagerStore {
    wagers: Mutex<BTreeMap<WagerId, Wager>>,
    events: HashMap<EventId, EventInfo>,
    failing: bool,
}

impl MemoryWagerStore {
    #[must_use]
    pub fn with_wager(self, wager: Wager) -> Self {
        self.lock().insert(wager.id, wager);
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: EventInfo) -> Self {
        self.events.insert(event.id.clone(), event);
        self
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<WagerId, Wager>> {
        self.wagers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            Err(unavailable("memory-wagers"))
        } else {
            Ok(())
        }
    }
}

impl WagerStore for MemoryWagerStore {
    fn pending(&self) -> Result<Vec<Wager>> {
        self.check()?;
        Ok(self
            .lock()
            .values()
            .filter(|wager| wager.status.is_open())
            .cloned()
            .collect())
    }

    fn get(&self, id: WagerId) -> Result<Option<Wager>> {
        self.check()?;
        Ok(self.lock().get(&id).cloned())
    }

    fn record_settlement(&self, record: &SettlementRecord) -> Result<bool> {
        self.check()?;
        let mut wagers = self.lock();
        let Some(wager) = wagers.get_mut(&record.wager_id) else {
            return Ok(false);
        };
        if !wager.status.is_open() {
            return Ok(false);
        }
        wager.status = record.status;
        wager.actual_value = Some(record.actual_value);
        wager.actual_profit = Some(record.actual_profit);
        wager.verified = record.verified;
        wager.updated_at = Some(record.updated_at.naive_utc());
        Ok(true)
    }

    fn summary(&self) -> Result<PerformanceSummary> {
        self.check()?;
        Ok(PerformanceSummary::from_wagers(self.lock().values(), Decimal::ONE))
    }
}

impl EventDirectory for MemoryWagerStore {
    fn event(&self, id: &EventId) -> Result<Option<EventInfo>> {
        self.check()?;
        Ok(self.events.get(id).cloned())
    }
}
