//! Event identity as seen by the wager store.

use chrono::{NaiveDate, NaiveDateTime};

use super::id::EventId;

/// A scheduled match between two teams.
///
/// Carries the team pair and nominal start time needed to locate the match
/// in the flat extract, which has no shared key with the wager store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInfo {
    pub id: EventId,
    pub home_team: String,
    pub away_team: String,
    pub league: Option<String>,
    pub scheduled_at: Option<NaiveDateTime>,
}

impl EventInfo {
    pub fn new(
        id: impl Into<EventId>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        scheduled_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id: id.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            league: None,
            scheduled_at,
        }
    }

    /// Calendar day of the nominal start, if known.
    #[must_use]
    pub fn match_day(&self) -> Option<NaiveDate> {
        self.scheduled_at.map(|at| at.date())
    }

    /// Human-readable "Home vs Away" label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}
