//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{bets, events, game_maps, map_statistics, matches, teams};

/// Database row for a team.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TeamRow {
    pub id: i32,
    pub team_id: String,
    pub name: String,
}

/// Database row for a team (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    pub team_id: String,
    pub name: String,
}

/// Database row for an event.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventRow {
    pub id: i32,
    pub event_id: String,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub league_name: String,
    pub match_date: Option<String>,
    pub status: String,
}

/// Database row for an event (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = events)]
pub struct NewEventRow {
    pub event_id: String,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub league_name: String,
    pub match_date: Option<String>,
}

/// Database row for a wager.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = bets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BetRow {
    pub id: i32,
    pub event_id: String,
    pub market_type: String,
    pub selection: String,
    pub odds: f64,
    pub line: String,
    pub map_number: Option<i32>,
    pub stake: Option<f64>,
    pub bet_status: String,
    pub actual_value: Option<f64>,
    pub actual_win: Option<f64>,
    pub result_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for a wager (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = bets)]
pub struct NewBetRow {
    pub event_id: String,
    pub market_type: String,
    pub selection: String,
    pub odds: f64,
    pub line: String,
    pub map_number: Option<i32>,
    pub stake: Option<f64>,
    pub bet_status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for a historical match (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = matches)]
pub struct NewMatchRow {
    pub bet365_id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub event_time: Option<String>,
    pub time_status: Option<i32>,
}

/// Database row for one map of a historical match (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = game_maps)]
pub struct NewGameMapRow {
    pub match_id: i32,
    pub map_number: i32,
}

/// Database row for one named counter of a map.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = map_statistics)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MapStatisticRow {
    pub stat_name: String,
    pub home_value: Option<String>,
    pub away_value: Option<String>,
}

/// Database row for one named counter of a map (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = map_statistics)]
pub struct NewMapStatisticRow {
    pub map_id: i32,
    pub stat_name: String,
    pub home_value: Option<String>,
    pub away_value: Option<String>,
}
