//! Match identity bridge from wager-store events to flat extract games.
//!
//! The extract has no key in common with the wager store. A game belongs to
//! an event when its two team-aggregate rows carry the event's team pair
//! (order-insensitive, after alias mapping) and it was played within the
//! date tolerance. Each map ordinal is chosen on its own: the game closest
//! to the event's day wins, so a series that runs past midnight keeps all of
//! its maps. Two equally close games for one ordinal are ambiguous.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::domain::{EventInfo, GameHeader, IdentityFailure, MatchedSeries};
use crate::error::Result;
use crate::port::outbound::matcher::{IdentityMatcher, SeriesLookup};
use crate::port::outbound::source::FlatExtract;

/// Provider team names whose extract spelling differs.
const KNOWN_ALIASES: &[(&str, &str)] = &[
    ("BNK FearX", "BNK FEARX Youth"),
    ("BNK FearX.Y", "BNK FEARX Youth"),
    ("DN Freecs.Ch", "DN Freecs Challengers"),
    ("DRX.Ch", "DRX Challengers"),
    ("Dplus KIA.Ch", "Dplus KIA Challengers"),
    ("Gen.G.GA", "Gen.G Global Academy"),
    ("Hanwha Life Esports.Ch", "Hanwha Life Esports Challengers"),
    ("KT Rolster.Ch", "KT Rolster Challengers"),
    ("Nongshim.EA", "Nongshim Esports Academy"),
    ("T1.EA", "T1 Esports Academy"),
];

/// Team name normalisation: alias lookup, then trimmed lowercase.
#[derive(Debug, Clone, Default)]
pub struct TeamAliases {
    aliases: HashMap<String, String>,
}

impl TeamAliases {
    /// Empty alias table; names are only trimmed and lowercased.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with the known provider/extract renames.
    #[must_use]
    pub fn standard() -> Self {
        Self::new().extend(KNOWN_ALIASES.iter().copied())
    }

    /// Add aliases; later entries replace earlier ones.
    #[must_use]
    pub fn extend<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (from, to) in aliases {
            self.aliases.insert(key(from.as_ref()), key(to.as_ref()));
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Comparable form of a team name.
    #[must_use]
    pub fn canonical(&self, name: &str) -> String {
        let name = key(name);
        self.aliases.get(&name).cloned().unwrap_or(name)
    }

    /// Order-insensitive comparable form of a team pair.
    #[must_use]
    pub fn pair(&self, a: &str, b: &str) -> (String, String) {
        let (a, b) = (self.canonical(a), self.canonical(b));
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// [`IdentityMatcher`] over a [`FlatExtract`].
pub struct ExtractMatcher {
    extract: Arc<dyn FlatExtract>,
    aliases: TeamAliases,
    tolerance_days: i64,
}

impl ExtractMatcher {
    /// Default slack around the event's nominal date, in days.
    pub const DEFAULT_TOLERANCE_DAYS: i64 = 1;

    #[must_use]
    pub fn new(extract: Arc<dyn FlatExtract>) -> Self {
        Self {
            extract,
            aliases: TeamAliases::standard(),
            tolerance_days: Self::DEFAULT_TOLERANCE_DAYS,
        }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: TeamAliases) -> Self {
        self.aliases = aliases;
        self
    }

    #[must_use]
    pub fn with_tolerance_days(mut self, days: i64) -> Self {
        self.tolerance_days = days.max(0);
        self
    }

    /// Pick, per map ordinal, the game closest to `day`.
    ///
    /// Fails with the number of tied candidates when an ordinal has more than
    /// one game at the closest distance.
    fn choose<'a>(
        day: NaiveDate,
        by_ordinal: &BTreeMap<u8, Vec<&'a GameHeader>>,
    ) -> std::result::Result<Vec<&'a GameHeader>, usize> {
        let distance = |game: &GameHeader| (game.played_at.date() - day).num_days().abs();
        let mut chosen = Vec::with_capacity(by_ordinal.len());
        for games in by_ordinal.values() {
            let Some(best) = games.iter().map(|g| distance(g)).min() else {
                continue;
            };
            match games.iter().filter(|g| distance(g) == best).collect::<Vec<_>>().as_slice() {
                [game] => chosen.push(**game),
                tied => return Err(tied.len()),
            }
        }
        Ok(chosen)
    }
}

impl IdentityMatcher for ExtractMatcher {
    fn locate(&self, event: &EventInfo) -> Result<SeriesLookup> {
        let Some(day) = event.match_day() else {
            return Ok(Err(IdentityFailure::MissingDate));
        };
        let no_match = || IdentityFailure::NoMatch {
            home: event.home_team.clone(),
            away: event.away_team.clone(),
            date: day.to_string(),
        };

        let slack = Duration::days(self.tolerance_days);
        let headers = self.extract.team_games_between(day - slack, day + slack)?;
        let wanted = self.aliases.pair(&event.home_team, &event.away_team);

        let mut by_ordinal: BTreeMap<u8, Vec<&GameHeader>> = BTreeMap::new();
        for header in &headers {
            if let [a, b] = header.teams.as_slice() {
                if self.aliases.pair(a, b) == wanted {
                    by_ordinal.entry(header.ordinal).or_default().push(header);
                }
            }
        }

        if by_ordinal.is_empty() {
            debug!(
                event_id = %event.id,
                teams = %event.label(),
                date = %day,
                scanned = headers.len(),
                "No extract game for team pair"
            );
            return Ok(Err(no_match()));
        }

        let games = match Self::choose(day, &by_ordinal) {
            Ok(games) => games,
            Err(candidates) => {
                debug!(event_id = %event.id, candidates, "Ambiguous extract match");
                return Ok(Err(IdentityFailure::Ambiguous {
                    home: event.home_team.clone(),
                    away: event.away_team.clone(),
                    candidates,
                }));
            }
        };

        let game_ids: Vec<String> = games.iter().map(|g| g.game_id.clone()).collect();
        let series = MatchedSeries::from_rows(self.extract.rows_for_games(&game_ids)?);
        if series.is_empty() {
            return Ok(Err(no_match()));
        }

        debug!(
            event_id = %event.id,
            games = ?game_ids,
            source = self.extract.source_name(),
            "Matched extract series"
        );
        Ok(Ok(series))
    }
}
