//! Player resolver: one named player's statistic on one map.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{MatchedSeries, PendingReason, Predicate, Resolution};

/// Extracts a player's per-map statistic from a matched extract series.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerResolver;

impl PlayerResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// "Map not in the extract" and "player not on the map" both leave the
    /// wager unresolved, with distinct reasons.
    #[must_use]
    pub fn resolve(&self, series: &MatchedSeries, predicate: &Predicate) -> Resolution {
        let map = predicate.map;
        let unavailable = || {
            Resolution::Unavailable(PendingReason::ResultUnavailable {
                map: map.get(),
                stat: predicate.stat,
            })
        };

        if series.game(map).is_none() {
            return unavailable();
        }

        let Some(player) = predicate.subject.as_deref() else {
            return unavailable();
        };

        let Some(row) = series.player(map, player) else {
            debug!(
                player,
                map = map.get(),
                available = ?series.players(map),
                "Player not in matched game"
            );
            return Resolution::Unavailable(PendingReason::SubjectNotFound {
                player: player.to_string(),
                map: map.get(),
            });
        };

        match row.stat(predicate.stat) {
            Some(value) => Resolution::Resolved(Decimal::from(value)),
            None => unavailable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatKind;
    use crate::testkit::domain::{player_predicate, player_row, team_row};
    use rust_decimal_macros::dec;

    fn series() -> MatchedSeries {
        MatchedSeries::from_rows(vec![
            team_row("g1", 1, 100, "T1", 20),
            player_row("g1", 1, 3, "T1", "Faker", 6, 1, 9),
            team_row("g2", 2, 100, "Gen.G", 12),
            player_row("g2", 2, 7, "Gen.G", "River", 4, 2, 5),
        ])
    }

    #[test]
    fn reads_statistic_on_requested_map() {
        let resolver = PlayerResolver::new();
        assert_eq!(
            resolver.resolve(&series(), &player_predicate(StatKind::Kills, 2, "River", dec!(3.5))),
            Resolution::Resolved(dec!(4))
        );
        assert_eq!(
            resolver.resolve(&series(), &player_predicate(StatKind::Assists, 2, "river", dec!(3.5))),
            Resolution::Resolved(dec!(5))
        );
    }

    #[test]
    fn player_on_other_map_is_not_found() {
        assert_eq!(
            PlayerResolver::new()
                .resolve(&series(), &player_predicate(StatKind::Kills, 1, "River", dec!(3.5))),
            Resolution::Unavailable(PendingReason::SubjectNotFound {
                player: "River".into(),
                map: 1
            })
        );
    }

    #[test]
    fn missing_map_is_unavailable_not_subject_missing() {
        assert_eq!(
            PlayerResolver::new()
                .resolve(&series(), &player_predicate(StatKind::Deaths, 3, "River", dec!(2.5))),
            Resolution::Unavailable(PendingReason::ResultUnavailable {
                map: 3,
                stat: StatKind::Deaths
            })
        );
    }

    #[test]
    fn blank_statistic_is_unavailable() {
        let mut row = player_row("g1", 1, 3, "T1", "Faker", 6, 1, 9);
        row.deaths = None;
        let series = MatchedSeries::from_rows(vec![row]);

        assert!(matches!(
            PlayerResolver::new()
                .resolve(&series, &player_predicate(StatKind::Deaths, 1, "Faker", dec!(2.5))),
            Resolution::Unavailable(PendingReason::ResultUnavailable { .. })
        ));
    }
}
