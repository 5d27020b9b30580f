//! Builders for domain primitives used across tests.
//!
//! Extract rows default to [`PLAYED_AT`]; only the fields a test names are
//! populated, the rest are blank.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::{
    Direction, EventInfo, MapIndex, MarketFamily, ParticipantRow, Predicate, StatKind, Wager,
    WagerId,
};

/// Default timestamp of extract rows and events.
pub const PLAYED_AT: &str = "2024-06-01 10:00:00";

/// Parse a `%Y-%m-%d %H:%M:%S` timestamp.
pub fn at(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("bad test timestamp {timestamp}: {e}"))
}

/// T1 vs Gen.G at [`PLAYED_AT`].
pub fn event(id: &str) -> EventInfo {
    EventInfo::new(id, "T1", "Gen.G", Some(at(PLAYED_AT)))
}

/// Open wager with unit stake left unset.
pub fn wager(id: i32, event: &str, market: &str, selection: &str, line: &str, odds: Decimal) -> Wager {
    Wager::new(WagerId::new(id), event, market, selection, line, odds)
}

/// Team-aggregate row (participant 100 or 200) at [`PLAYED_AT`].
pub fn team_row(game_id: &str, ordinal: u8, participant_id: u16, team: &str, kills: u32) -> ParticipantRow {
    team_row_at(game_id, PLAYED_AT, ordinal, participant_id, team, kills)
}

/// Team-aggregate row at a given timestamp.
pub fn team_row_at(
    game_id: &str,
    played_at: &str,
    ordinal: u8,
    participant_id: u16,
    team: &str,
    kills: u32,
) -> ParticipantRow {
    ParticipantRow {
        game_id: game_id.to_string(),
        played_at: at(played_at),
        ordinal,
        participant_id,
        team: team.to_string(),
        player: None,
        kills: Some(kills),
        deaths: None,
        assists: None,
        dragons: None,
        barons: None,
        towers: None,
        inhibitors: None,
        game_length: None,
    }
}

/// Player row (participant 1..=10) at [`PLAYED_AT`].
#[allow(clippy::too_many_arguments)]
pub fn player_row(
    game_id: &str,
    ordinal: u8,
    participant_id: u16,
    team: &str,
    player: &str,
    kills: u32,
    deaths: u32,
    assists: u32,
) -> ParticipantRow {
    ParticipantRow {
        player: Some(player.to_string()),
        kills: Some(kills),
        deaths: Some(deaths),
        assists: Some(assists),
        ..team_row(game_id, ordinal, participant_id, team, kills)
    }
}

/// Over predicate on a totals statistic.
pub fn totals_predicate(stat: StatKind, map: i64, line: Decimal) -> Predicate {
    Predicate {
        family: MarketFamily::Totals,
        stat,
        direction: Direction::Over,
        map: map_index(map),
        subject: None,
        line,
    }
}

/// Over predicate on a player statistic.
pub fn player_predicate(stat: StatKind, map: i64, player: &str, line: Decimal) -> Predicate {
    Predicate {
        family: MarketFamily::Player,
        subject: Some(player.to_string()),
        ..totals_predicate(stat, map, line)
    }
}

fn map_index(map: i64) -> MapIndex {
    MapIndex::new(map).unwrap_or_else(|| panic!("bad test map {map}"))
}
