//! Read-only match result sources.

use chrono::NaiveDate;

use crate::domain::{EventId, GameHeader, MapIndex, MapResult, ParticipantRow};
use crate::error::Result;

/// Common capability of every result source.
pub trait ResultSource: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn source_name(&self) -> &str;
}

/// Structured historical results keyed by the shared event id.
pub trait MapResultStore: ResultSource {
    /// Aggregate counters of one concluded map, or `None` if the map has no
    /// result yet.
    fn map_result(&self, event: &EventId, map: MapIndex) -> Result<Option<MapResult>>;
}

/// Flat row-per-participant statistics extract.
///
/// Has no key in common with the wager store; games are found by team pair
/// and date through an [`IdentityMatcher`](super::matcher::IdentityMatcher).
pub trait FlatExtract: ResultSource {
    /// Headers of all games played between `from` and `to` (inclusive).
    fn team_games_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<GameHeader>>;

    /// Every row (team aggregates and players) of the given games.
    fn rows_for_games(&self, game_ids: &[String]) -> Result<Vec<ParticipantRow>>;
}
