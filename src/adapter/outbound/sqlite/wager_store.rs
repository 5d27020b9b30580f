//! SQLite wager store and event directory.
//!
//! Reads open wagers from the `bets` table and writes settlement fields
//! back in a single guarded `UPDATE`. Event identity comes from `events`
//! joined to `teams`.

use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    BetRow, EventRow, NewBetRow, NewEventRow, NewTeamRow, TeamRow,
};
use crate::adapter::outbound::sqlite::database::schema::{bets, events, teams};
use crate::adapter::outbound::timestamp::{format_timestamp, parse_timestamp};
use crate::domain::{
    EventId, EventInfo, PerformanceSummary, SettlementRecord, Wager, WagerId, WagerStatus,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{EventDirectory, WagerStore};

/// SQLite-backed [`WagerStore`] and [`EventDirectory`].
pub struct SqliteWagerStore {
    pool: DbPool,
    default_stake: Decimal,
}

impl SqliteWagerStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            default_stake: Decimal::ONE,
        }
    }

    /// Stake assumed by [`WagerStore::summary`] for wagers that stored none.
    #[must_use]
    pub fn with_default_stake(mut self, stake: Decimal) -> Self {
        self.default_stake = stake;
        self
    }

    fn open_statuses() -> [&'static str; 2] {
        WagerStatus::OPEN.map(WagerStatus::as_str)
    }

    fn from_row(row: BetRow) -> Result<Wager> {
        let status = row.bet_status.parse::<WagerStatus>().map_err(Error::Parse)?;
        Ok(Wager {
            id: WagerId::new(row.id),
            event_id: EventId::from(row.event_id),
            market: row.market_type,
            selection: row.selection,
            line: row.line,
            map_number: row.map_number,
            odds: to_decimal(row.odds, "odds")?,
            stake: row.stake.map(|s| to_decimal(s, "stake")).transpose()?,
            status,
            actual_value: row.actual_value.map(|v| to_decimal(v, "actual_value")).transpose()?,
            actual_profit: row.actual_win.map(|v| to_decimal(v, "actual_win")).transpose()?,
            verified: row.result_verified,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        })
    }

    /// Insert an event and its two teams, creating teams on first sight.
    ///
    /// Wagers and events are normally written by the ingestion side; this is
    /// for seeding and tests.
    ///
    /// # Errors
    /// Returns an error if an insert fails.
    pub fn insert_event(&self, event: &EventInfo) -> Result<()> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            let home = upsert_team(conn, &event.home_team)?;
            let away = upsert_team(conn, &event.away_team)?;
            diesel::insert_into(events::table)
                .values(NewEventRow {
                    event_id: event.id.to_string(),
                    home_team_id: home,
                    away_team_id: away,
                    league_name: event.league.clone().unwrap_or_default(),
                    match_date: event.scheduled_at.map(format_timestamp),
                })
                .execute(conn)?;
            Ok(())
        })
    }

    /// Insert a wager as placed, ignoring its id and settlement fields.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn insert_wager(&self, wager: &Wager) -> Result<WagerId> {
        let mut conn = self.pool.get()?;
        let created = format_timestamp(wager.created_at.unwrap_or_else(|| Utc::now().naive_utc()));
        let row = NewBetRow {
            event_id: wager.event_id.to_string(),
            market_type: wager.market.clone(),
            selection: wager.selection.clone(),
            odds: to_f64(wager.odds, "odds")?,
            line: wager.line.clone(),
            map_number: wager.map_number,
            stake: wager.stake.map(|s| to_f64(s, "stake")).transpose()?,
            bet_status: wager.status.as_str().to_string(),
            created_at: created.clone(),
            updated_at: created,
        };
        let id = diesel::insert_into(bets::table)
            .values(&row)
            .returning(bets::id)
            .get_result::<i32>(&mut conn)?;
        Ok(WagerId::new(id))
    }
}

fn upsert_team(conn: &mut SqliteConnection, name: &str) -> Result<i32> {
    let existing = teams::table
        .filter(teams::name.eq(name))
        .select(teams::id)
        .first::<i32>(conn)
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    let id = diesel::insert_into(teams::table)
        .values(NewTeamRow {
            team_id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
        })
        .returning(teams::id)
        .get_result::<i32>(conn)?;
    Ok(id)
}

fn to_decimal(value: f64, field: &str) -> Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(4).normalize())
        .ok_or_else(|| Error::Parse(format!("{field}: {value} is not a finite number")))
}

fn to_f64(value: Decimal, field: &str) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| Error::Parse(format!("{field}: {value} does not fit a double")))
}

impl WagerStore for SqliteWagerStore {
    fn pending(&self) -> Result<Vec<Wager>> {
        let mut conn = self.pool.get()?;
        let rows: Vec<BetRow> = bets::table
            .filter(bets::bet_status.eq_any(Self::open_statuses()))
            .order((bets::created_at.asc(), bets::id.asc()))
            .select(BetRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(Self::from_row).collect()
    }

    fn get(&self, id: WagerId) -> Result<Option<Wager>> {
        let mut conn = self.pool.get()?;
        let row: Option<BetRow> = bets::table
            .find(id.value())
            .select(BetRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(Self::from_row).transpose()
    }

    fn record_settlement(&self, record: &SettlementRecord) -> Result<bool> {
        let mut conn = self.pool.get()?;
        // One statement; the status guard makes a repeat write a no-op.
        let updated = diesel::update(
            bets::table
                .filter(bets::id.eq(record.wager_id.value()))
                .filter(bets::bet_status.eq_any(Self::open_statuses())),
        )
        .set((
            bets::bet_status.eq(record.status.as_str()),
            bets::actual_value.eq(Some(to_f64(record.actual_value, "actual_value")?)),
            bets::actual_win.eq(Some(to_f64(record.actual_profit, "actual_win")?)),
            bets::result_verified.eq(record.verified),
            bets::updated_at.eq(format_timestamp(record.updated_at.naive_utc())),
        ))
        .execute(&mut conn)?;

        debug!(wager_id = %record.wager_id, updated, "Settlement update applied");
        Ok(updated > 0)
    }

    fn summary(&self) -> Result<PerformanceSummary> {
        let mut conn = self.pool.get()?;
        let rows: Vec<BetRow> = bets::table
            .select(BetRow::as_select())
            .load(&mut conn)?;
        let mut wagers = Vec::with_capacity(rows.len());
        for row in rows {
            // Unrecognised statuses stay out of the totals.
            if let Err(reason) = row.bet_status.parse::<WagerStatus>() {
                warn!(wager_id = row.id, %reason, "Wager left out of summary");
                continue;
            }
            wagers.push(Self::from_row(row)?);
        }
        Ok(PerformanceSummary::from_wagers(&wagers, self.default_stake))
    }
}

impl EventDirectory for SqliteWagerStore {
    fn event(&self, id: &EventId) -> Result<Option<EventInfo>> {
        let mut conn = self.pool.get()?;
        let Some(row) = events::table
            .filter(events::event_id.eq(id.as_str()))
            .select(EventRow::as_select())
            .first(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        let names: Vec<TeamRow> = teams::table
            .filter(teams::id.eq_any([row.home_team_id, row.away_team_id]))
            .select(TeamRow::as_select())
            .load(&mut conn)?;
        let name_of = |team: i32| {
            names
                .iter()
                .find(|t| t.id == team)
                .map(|t| t.name.clone())
                .ok_or_else(|| Error::Database(format!("event {id} references missing team {team}")))
        };

        let mut event = EventInfo::new(
            row.event_id.as_str(),
            name_of(row.home_team_id)?,
            name_of(row.away_team_id)?,
            row.match_date.as_deref().and_then(parse_timestamp),
        );
        event.league = Some(row.league_name).filter(|league| !league.is_empty());
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_bets_migrations};
    use crate::domain::Outcome;
    use crate::testkit::domain::{at, event, wager};
    use rust_decimal_macros::dec;

    fn store() -> SqliteWagerStore {
        let pool = create_pool(":memory:").unwrap();
        run_bets_migrations(&pool).unwrap();
        SqliteWagerStore::new(pool)
    }

    fn settle(id: WagerId, outcome: Outcome, actual: Decimal, profit: Decimal) -> SettlementRecord {
        SettlementRecord {
            wager_id: id,
            status: outcome.into(),
            actual_value: actual,
            actual_profit: profit,
            verified: true,
            updated_at: at("2024-06-03 12:00:00").and_utc(),
        }
    }

    #[test]
    fn pending_reads_open_wagers_in_placement_order() {
        let store = store();
        store.insert_event(&event("e1")).unwrap();
        let mut first = wager(0, "e1", "Map 1 - Totals", "Over Total Kills", "27.5", dec!(1.83));
        first.created_at = Some(at("2024-06-01 08:00:00"));
        first.map_number = Some(1);
        let mut second = wager(0, "e1", "Map 2 - Totals", "Under Total Dragons", "4.5", dec!(2.2));
        second.created_at = Some(at("2024-06-01 07:00:00"));
        second.status = WagerStatus::ToVerify;
        let mut done = wager(0, "e1", "Map 1 - Totals", "Over Total Towers", "11.5", dec!(1.9));
        done.status = WagerStatus::Won;

        let a = store.insert_wager(&first).unwrap();
        let b = store.insert_wager(&second).unwrap();
        store.insert_wager(&done).unwrap();

        let pending = store.pending().unwrap();
        assert_eq!(pending.iter().map(|w| w.id).collect::<Vec<_>>(), vec![b, a]);
        assert_eq!(pending[1].odds, dec!(1.83));
        assert_eq!(pending[1].map_number, Some(1));
        assert_eq!(pending[0].status, WagerStatus::ToVerify);
    }

    #[test]
    fn settlement_writes_all_fields_once() {
        let store = store();
        store.insert_event(&event("e1")).unwrap();
        let id = store
            .insert_wager(&wager(0, "e1", "Map 1 - Totals", "Under Total Dragons", "4.5", dec!(2.2)))
            .unwrap();

        assert!(store.record_settlement(&settle(id, Outcome::Lost, dec!(5), dec!(-1))).unwrap());
        assert!(!store.record_settlement(&settle(id, Outcome::Won, dec!(5), dec!(1.2))).unwrap());

        let stored = store.get(id).unwrap().unwrap();
        assert_eq!(stored.status, WagerStatus::Lost);
        assert_eq!(stored.actual_value, Some(dec!(5)));
        assert_eq!(stored.actual_profit, Some(dec!(-1)));
        assert!(stored.verified);
        assert_eq!(stored.updated_at, Some(at("2024-06-03 12:00:00")));
        assert!(store.pending().unwrap().is_empty());
    }

    #[test]
    fn settling_unknown_wager_changes_nothing() {
        let store = store();
        assert!(!store
            .record_settlement(&settle(WagerId::new(42), Outcome::Won, dec!(1), dec!(1)))
            .unwrap());
    }

    #[test]
    fn event_resolves_team_names() {
        let store = store();
        let mut info = event("e1");
        info.league = Some("LCK".into());
        store.insert_event(&info).unwrap();
        store.insert_event(&EventInfo::new("e2", "Gen.G", "T1", None)).unwrap();

        assert_eq!(store.event(&EventId::new("e1")).unwrap(), Some(info));
        let reverse = store.event(&EventId::new("e2")).unwrap().unwrap();
        assert_eq!(reverse.label(), "Gen.G vs T1");
        assert_eq!(reverse.scheduled_at, None);
        assert_eq!(store.event(&EventId::new("missing")).unwrap(), None);
    }

    #[test]
    fn summary_counts_settled_and_open() {
        let store = store();
        store.insert_event(&event("e1")).unwrap();
        let won = store
            .insert_wager(&wager(0, "e1", "Map 1 - Totals", "Over Total Kills", "27.5", dec!(1.9)))
            .unwrap();
        let lost = store
            .insert_wager(&wager(0, "e1", "Map 1 - Totals", "Under Total Kills", "27.5", dec!(2.1)))
            .unwrap();
        store
            .insert_wager(&wager(0, "e1", "Map 2 - Totals", "Over Total Kills", "27.5", dec!(1.9)))
            .unwrap();
        store.record_settlement(&settle(won, Outcome::Won, dec!(30), dec!(0.9))).unwrap();
        store.record_settlement(&settle(lost, Outcome::Lost, dec!(30), dec!(-1))).unwrap();

        let summary = store.summary().unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.won, 1);
        assert_eq!(summary.lost, 1);
        assert_eq!(summary.open, 1);
        assert_eq!(summary.net_profit, dec!(-0.1));
    }

    #[test]
    fn summary_skips_rows_with_unrecognised_status() {
        let store = store();
        store.insert_event(&event("e1")).unwrap();
        let won = store
            .insert_wager(&wager(0, "e1", "Map 1 - Totals", "Over Total Kills", "27.5", dec!(1.833)))
            .unwrap();
        let legacy = store
            .insert_wager(&wager(0, "e1", "Map 1 - Totals", "Under Total Kills", "27.5", dec!(2.1)))
            .unwrap();
        store.record_settlement(&settle(won, Outcome::Won, dec!(30), dec!(0.833))).unwrap();
        {
            let mut conn = store.pool.get().unwrap();
            diesel::update(bets::table.find(legacy.value()))
                .set(bets::bet_status.eq("unknown"))
                .execute(&mut conn)
                .unwrap();
        }

        let summary = store.summary().unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.won, 1);
        assert_eq!(summary.net_profit, dec!(0.833));
        assert!(store.get(legacy).is_err());
    }
}
