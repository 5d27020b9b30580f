//! SQLite structured result store over the history database.
//!
//! Counters are stored as text per map and side. Values like `"49.8k"` are
//! expanded, `mm:ss` durations become seconds, and blank values count as
//! absent.

use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    MapStatisticRow, NewGameMapRow, NewMapStatisticRow, NewMatchRow,
};
use crate::adapter::outbound::sqlite::database::schema::{game_maps, map_statistics, matches};
use crate::domain::{EventId, MapIndex, MapResult, StatKind};
use crate::error::{Error, Result};
use crate::port::outbound::source::{MapResultStore, ResultSource};

/// SQLite-backed [`MapResultStore`].
pub struct SqliteMapResultStore {
    pool: DbPool,
}

impl SqliteMapResultStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record one map's counters as `(stat_name, home, away)` text triples,
    /// creating the match row on first sight.
    ///
    /// # Errors
    /// Returns an error if an insert fails.
    pub fn insert_map(
        &self,
        event: &EventId,
        teams: (&str, &str),
        map: MapIndex,
        counters: &[(&str, &str, &str)],
    ) -> Result<()> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            let existing = matches::table
                .filter(matches::bet365_id.eq(event.as_str()))
                .select(matches::id)
                .first::<i32>(conn)
                .optional()?;
            let match_id = match existing {
                Some(id) => id,
                None => diesel::insert_into(matches::table)
                    .values(NewMatchRow {
                        bet365_id: event.to_string(),
                        home_team_id: teams.0.to_string(),
                        away_team_id: teams.1.to_string(),
                        event_time: None,
                        time_status: Some(3),
                    })
                    .returning(matches::id)
                    .get_result::<i32>(conn)?,
            };
            let map_id = diesel::insert_into(game_maps::table)
                .values(NewGameMapRow {
                    match_id,
                    map_number: i32::from(map.get()),
                })
                .returning(game_maps::id)
                .get_result::<i32>(conn)?;
            let rows: Vec<NewMapStatisticRow> = counters
                .iter()
                .map(|(name, home, away)| NewMapStatisticRow {
                    map_id,
                    stat_name: (*name).to_string(),
                    home_value: Some((*home).to_string()),
                    away_value: Some((*away).to_string()),
                })
                .collect();
            diesel::insert_into(map_statistics::table)
                .values(&rows)
                .execute(conn)?;
            Ok(())
        })
    }
}

/// Statistic a stored counter name feeds, if any.
fn stat_for(name: &str) -> Option<StatKind> {
    match name.trim().to_ascii_lowercase().as_str() {
        "kills" => Some(StatKind::Kills),
        "dragons" => Some(StatKind::Dragons),
        "barons" => Some(StatKind::Barons),
        "towers" => Some(StatKind::Towers),
        "inhibitors" => Some(StatKind::Inhibitors),
        "game_duration" | "duration" => Some(StatKind::Duration),
        _ => None,
    }
}

/// Parse a stored counter: plain number, `k`-suffixed thousands, or `mm:ss`.
pub fn parse_counter(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some((minutes, seconds)) = text.split_once(':') {
        let minutes = minutes.trim().parse::<u32>().ok()?;
        let seconds = seconds.trim().parse::<u32>().ok()?;
        if seconds >= 60 {
            return None;
        }
        return Some(Decimal::from(minutes * 60 + seconds));
    }
    if let Some(thousands) = text.strip_suffix('k').or_else(|| text.strip_suffix('K')) {
        return Decimal::from_str(thousands.trim())
            .ok()
            .map(|value| (value * Decimal::ONE_THOUSAND).normalize());
    }
    Decimal::from_str(text).ok()
}

impl ResultSource for SqliteMapResultStore {
    fn source_name(&self) -> &str {
        "history"
    }
}

impl MapResultStore for SqliteMapResultStore {
    fn map_result(&self, event: &EventId, map: MapIndex) -> Result<Option<MapResult>> {
        let mut conn = self.pool.get()?;
        let rows: Vec<MapStatisticRow> = map_statistics::table
            .inner_join(game_maps::table.inner_join(matches::table))
            .filter(matches::bet365_id.eq(event.as_str()))
            .filter(game_maps::map_number.eq(i32::from(map.get())))
            .select(MapStatisticRow::as_select())
            .load(&mut conn)?;

        let mut result = MapResult::new(map);
        for row in &rows {
            let Some(stat) = stat_for(&row.stat_name) else {
                continue;
            };
            let home = row.home_value.as_deref().and_then(parse_counter);
            let away = row.away_value.as_deref().and_then(parse_counter);
            match (stat, home, away) {
                (StatKind::Duration, Some(home), away) => {
                    result.insert(stat, home, away.unwrap_or(home));
                }
                (_, Some(home), Some(away)) => result.insert(stat, home, away),
                _ => debug!(
                    event_id = %event,
                    map = map.get(),
                    stat = %stat,
                    home = ?row.home_value,
                    away = ?row.away_value,
                    "Skipping unreadable counter"
                ),
            }
        }

        if result.is_empty() {
            return Ok(None);
        }
        Ok(Some(result))
    }
}
