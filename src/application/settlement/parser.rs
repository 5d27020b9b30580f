//! Market predicate parser.
//!
//! Turns a wager's market label, selection label, and stored line into a
//! [`Predicate`]. Nothing is guessed: any label the grammar does not cover
//! yields a [`ParseFailure`] and the wager stays pending.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::grammar::MarketGrammar;
use crate::domain::{Direction, MapIndex, MarketFamily, ParseFailure, Predicate};

const PLAYER_MARKER: &str = "player";
const MAP_MARKER: &str = "map";

/// Parse with the standard grammar.
///
/// # Errors
/// Returns a [`ParseFailure`] when the labels name no known statistic, the
/// selection has no direction or player, the line is not numeric, or the
/// map number is out of range.
pub fn parse_predicate(
    market: &str,
    selection: &str,
    line: &str,
    stored_map: Option<i32>,
) -> Result<Predicate, ParseFailure> {
    MarketGrammar::standard().parse(market, selection, line, stored_map)
}

impl MarketGrammar {
    /// Parse a wager's labels against this grammar.
    ///
    /// # Errors
    /// See [`parse_predicate`].
    pub fn parse(
        &self,
        market: &str,
        selection: &str,
        line: &str,
        stored_map: Option<i32>,
    ) -> Result<Predicate, ParseFailure> {
        let map = map_index(market, stored_map)?;

        let family = if market.to_lowercase().contains(PLAYER_MARKER) {
            MarketFamily::Player
        } else {
            MarketFamily::Totals
        };

        let stat_text = match family {
            MarketFamily::Totals => selection,
            MarketFamily::Player => market,
        };
        let stat = self
            .lookup(family, stat_text)
            .ok_or_else(|| ParseFailure::UnknownStatistic {
                text: stat_text.to_string(),
            })?;

        let mut tokens = selection.trim().splitn(2, char::is_whitespace);
        let direction = tokens
            .next()
            .and_then(Direction::from_token)
            .ok_or_else(|| ParseFailure::MissingDirection {
                selection: selection.to_string(),
            })?;

        let subject = match family {
            MarketFamily::Totals => None,
            MarketFamily::Player => {
                let name = tokens.next().map(str::trim).unwrap_or_default();
                if name.is_empty() {
                    return Err(ParseFailure::MissingSubject {
                        selection: selection.to_string(),
                    });
                }
                Some(name.to_string())
            }
        };

        Ok(Predicate {
            family,
            stat,
            direction,
            map,
            subject,
            line: parse_line(line)?,
        })
    }
}

/// Explicit "Map N" marker first, then the stored map number, then map 1.
fn map_index(market: &str, stored_map: Option<i32>) -> Result<MapIndex, ParseFailure> {
    if let Some(value) = explicit_map(market) {
        return MapIndex::new(value).ok_or(ParseFailure::InvalidMap { value });
    }
    match stored_map {
        Some(value) => {
            let value = i64::from(value);
            MapIndex::new(value).ok_or(ParseFailure::InvalidMap { value })
        }
        None => Ok(MapIndex::FIRST),
    }
}

/// Number following the first "map" marker that is followed by digits.
fn explicit_map(market: &str) -> Option<i64> {
    let lower = market.to_lowercase();
    lower.match_indices(MAP_MARKER).find_map(|(at, marker)| {
        let digits: String = lower[at + marker.len()..]
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            None
        } else {
            // Saturate absurd values so they surface as out of range.
            Some(digits.parse().unwrap_or(i64::MAX))
        }
    })
}

fn parse_line(line: &str) -> Result<Decimal, ParseFailure> {
    let trimmed = line.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    Decimal::from_str(unsigned).map_err(|_| ParseFailure::InvalidLine {
        line: line.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatKind;
    use rust_decimal_macros::dec;

    #[test]
    fn totals_market_with_explicit_map() {
        let predicate = parse_predicate("Map 2 - Totals", "Under Total Dragons", "4.5", None).unwrap();

        assert_eq!(predicate.family, MarketFamily::Totals);
        assert_eq!(predicate.stat, StatKind::Dragons);
        assert_eq!(predicate.direction, Direction::Under);
        assert_eq!(predicate.map.get(), 2);
        assert_eq!(predicate.subject, None);
        assert_eq!(predicate.line, dec!(4.5));
    }

    #[test]
    fn player_market_reads_subject_from_selection() {
        let predicate =
            parse_predicate("Map 2 - Player Total Kills", "Over River", "3.5", None).unwrap();

        assert_eq!(predicate.family, MarketFamily::Player);
        assert_eq!(predicate.stat, StatKind::Kills);
        assert_eq!(predicate.direction, Direction::Over);
        assert_eq!(predicate.map.get(), 2);
        assert_eq!(predicate.subject.as_deref(), Some("River"));
    }

    #[test]
    fn player_names_may_contain_spaces() {
        let predicate =
            parse_predicate("Map 1 - Player Total Assists", "Under  Lee Sang", "7.5", None)
                .unwrap();
        assert_eq!(predicate.subject.as_deref(), Some("Lee Sang"));
        assert_eq!(predicate.stat, StatKind::Assists);
    }

    #[test]
    fn map_defaults_to_first_without_marker_or_stored_value() {
        let predicate = parse_predicate("Totals", "Over Total Kills", "27.5", None).unwrap();
        assert_eq!(predicate.map, MapIndex::FIRST);
    }

    #[test]
    fn stored_map_used_when_label_has_none() {
        let predicate = parse_predicate("Totals", "Over Total Kills", "27.5", Some(2)).unwrap();
        assert_eq!(predicate.map.get(), 2);
    }

    #[test]
    fn explicit_marker_beats_stored_map() {
        let predicate =
            parse_predicate("Map 1 - Totals", "Over Total Kills", "27.5", Some(2)).unwrap();
        assert_eq!(predicate.map.get(), 1);
    }

    #[test]
    fn marker_without_space_is_accepted() {
        let predicate = parse_predicate("MAP3 Totals", "Over Total Towers", "11.5", None).unwrap();
        assert_eq!(predicate.map.get(), 3);
    }

    #[test]
    fn out_of_range_map_is_rejected() {
        assert_eq!(
            parse_predicate("Map 9 - Totals", "Over Total Kills", "27.5", None),
            Err(ParseFailure::InvalidMap { value: 9 })
        );
        assert_eq!(
            parse_predicate("Totals", "Over Total Kills", "27.5", Some(0)),
            Err(ParseFailure::InvalidMap { value: 0 })
        );
    }

    #[test]
    fn unknown_statistic_is_not_guessed() {
        assert!(matches!(
            parse_predicate("Map 1 - Totals", "Over First Blood", "0.5", None),
            Err(ParseFailure::UnknownStatistic { .. })
        ));
    }

    #[test]
    fn non_numeric_line_fails() {
        assert_eq!(
            parse_predicate("Map 1 - Totals", "Over Total Kills", "abc", None),
            Err(ParseFailure::InvalidLine { line: "abc".into() })
        );
    }

    #[test]
    fn signed_line_is_accepted() {
        let predicate = parse_predicate("Map 1 - Totals", "Over Total Kills", " +27.5 ", None).unwrap();
        assert_eq!(predicate.line, dec!(27.5));
    }

    #[test]
    fn missing_direction_fails() {
        assert!(matches!(
            parse_predicate("Map 1 - Totals", "Total Kills", "27.5", None),
            Err(ParseFailure::MissingDirection { .. })
        ));
    }

    #[test]
    fn player_market_without_name_fails() {
        assert!(matches!(
            parse_predicate("Map 1 - Player Total Kills", "Over", "3.5", None),
            Err(ParseFailure::MissingSubject { .. })
        ));
    }
}
