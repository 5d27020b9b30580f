//! Match results from the two result sources.
//!
//! [`MapResult`] is the structured store's per-map view (aggregate counters
//! per side). [`ParticipantRow`] is one row of the flat extract; a
//! [`MatchedSeries`] groups the rows of one series by map ordinal.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::market::{MapIndex, StatKind};

/// One counter for both sides of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideTotals {
    pub home: Decimal,
    pub away: Decimal,
}

impl SideTotals {
    #[must_use]
    pub const fn new(home: Decimal, away: Decimal) -> Self {
        Self { home, away }
    }
}

/// Aggregate counters of one concluded map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapResult {
    pub map: MapIndex,
    counters: BTreeMap<StatKind, SideTotals>,
}

impl MapResult {
    #[must_use]
    pub fn new(map: MapIndex) -> Self {
        Self {
            map,
            counters: BTreeMap::new(),
        }
    }

    /// Builder-style counter insertion.
    #[must_use]
    pub fn with_counter(mut self, stat: StatKind, home: Decimal, away: Decimal) -> Self {
        self.insert(stat, home, away);
        self
    }

    pub fn insert(&mut self, stat: StatKind, home: Decimal, away: Decimal) {
        self.counters.insert(stat, SideTotals::new(home, away));
    }

    #[must_use]
    pub fn counter(&self, stat: StatKind) -> Option<SideTotals> {
        self.counters.get(&stat).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Value a totals wager on `stat` is settled against.
    ///
    /// Summed statistics add both sides; duration is taken from the home
    /// column as recorded.
    #[must_use]
    pub fn combined(&self, stat: StatKind) -> Option<Decimal> {
        let totals = self.counter(stat)?;
        if stat.is_summed() {
            Some(totals.home + totals.away)
        } else {
            Some(totals.home)
        }
    }
}

/// One row of the flat per-player extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub game_id: String,
    pub played_at: NaiveDateTime,
    /// 1-based position of this game within its series.
    pub ordinal: u8,
    pub participant_id: u16,
    pub team: String,
    pub player: Option<String>,
    pub kills: Option<u32>,
    pub deaths: Option<u32>,
    pub assists: Option<u32>,
    pub dragons: Option<u32>,
    pub barons: Option<u32>,
    pub towers: Option<u32>,
    pub inhibitors: Option<u32>,
    /// Game length in seconds.
    pub game_length: Option<u32>,
}

impl ParticipantRow {
    /// Participant ids reserved for the two team-aggregate rows.
    pub const TEAM_PARTICIPANTS: [u16; 2] = [100, 200];

    /// Participant ids of individual players.
    pub const PLAYER_PARTICIPANTS: std::ops::RangeInclusive<u16> = 1..=10;

    #[must_use]
    pub fn is_team_aggregate(&self) -> bool {
        Self::TEAM_PARTICIPANTS.contains(&self.participant_id)
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        Self::PLAYER_PARTICIPANTS.contains(&self.participant_id)
    }

    /// Trimmed, case-insensitive player name comparison.
    #[must_use]
    pub fn is_player_named(&self, name: &str) -> bool {
        self.player
            .as_deref()
            .is_some_and(|player| player.trim().eq_ignore_ascii_case(name.trim()))
    }

    /// Raw value of `stat` on this row. Duration maps to game length.
    #[must_use]
    pub fn stat(&self, stat: StatKind) -> Option<u32> {
        match stat {
            StatKind::Kills => self.kills,
            StatKind::Deaths => self.deaths,
            StatKind::Assists => self.assists,
            StatKind::Dragons => self.dragons,
            StatKind::Barons => self.barons,
            StatKind::Towers => self.towers,
            StatKind::Inhibitors => self.inhibitors,
            StatKind::Duration => self.game_length,
        }
    }
}

/// Summary of one extract game built from its team-aggregate rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameHeader {
    pub game_id: String,
    pub played_at: NaiveDateTime,
    pub ordinal: u8,
    /// Team names as they appear in the extract, one per aggregate row.
    pub teams: Vec<String>,
}

impl GameHeader {
    /// One header per game, built from the team-aggregate rows among `rows`.
    ///
    /// Headers are ordered by game id; player rows are ignored.
    #[must_use]
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ParticipantRow>) -> Vec<Self> {
        let mut headers: BTreeMap<&str, Self> = BTreeMap::new();
        for row in rows.into_iter().filter(|row| row.is_team_aggregate()) {
            headers
                .entry(row.game_id.as_str())
                .or_insert_with(|| Self {
                    game_id: row.game_id.clone(),
                    played_at: row.played_at,
                    ordinal: row.ordinal,
                    teams: Vec::new(),
                })
                .teams
                .push(row.team.clone());
        }
        headers.into_values().collect()
    }
}

/// All extract rows of one series, keyed by map ordinal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedSeries {
    games: BTreeMap<u8, Vec<ParticipantRow>>,
}

impl MatchedSeries {
    /// Group rows by their game ordinal.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = ParticipantRow>) -> Self {
        let mut games: BTreeMap<u8, Vec<ParticipantRow>> = BTreeMap::new();
        for row in rows {
            games.entry(row.ordinal).or_default().push(row);
        }
        Self { games }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Map ordinals present in the series, ascending.
    pub fn ordinals(&self) -> impl Iterator<Item = u8> + '_ {
        self.games.keys().copied()
    }

    /// Rows of one map, if that map appears in the extract.
    #[must_use]
    pub fn game(&self, map: MapIndex) -> Option<&[ParticipantRow]> {
        self.games.get(&map.get()).map(Vec::as_slice)
    }

    /// The named player's row on one map.
    #[must_use]
    pub fn player(&self, map: MapIndex, name: &str) -> Option<&ParticipantRow> {
        self.game(map)?
            .iter()
            .find(|row| row.is_player() && row.is_player_named(name))
    }

    /// Player names present on one map, for diagnostics.
    #[must_use]
    pub fn players(&self, map: MapIndex) -> Vec<&str> {
        self.game(map)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.is_player())
                    .filter_map(|row| row.player.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Derive map counters from the two team-aggregate rows.
    ///
    /// Returns `None` unless exactly two aggregate rows are present.
    #[must_use]
    pub fn map_result(&self, map: MapIndex) -> Option<MapResult> {
        let teams: Vec<&ParticipantRow> = self
            .game(map)?
            .iter()
            .filter(|row| row.is_team_aggregate())
            .collect();
        let [home, away] = teams.as_slice() else {
            return None;
        };

        let mut result = MapResult::new(map);
        for stat in [
            StatKind::Kills,
            StatKind::Dragons,
            StatKind::Towers,
            StatKind::Barons,
            StatKind::Inhibitors,
        ] {
            if let (Some(h), Some(a)) = (home.stat(stat), away.stat(stat)) {
                result.insert(stat, Decimal::from(h), Decimal::from(a));
            }
        }
        if let Some(length) = home.game_length.or(away.game_length) {
            result.insert(StatKind::Duration, Decimal::from(length), Decimal::ZERO);
        }
        Some(result)
    }
}
