//! Pending-age classification for operator visibility.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// How long ago a pending wager's event was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PendingAge {
    /// Event date is after today.
    Future,
    /// Played today or within `recent_within_days`.
    Recent,
    /// Played within `stale_after_days`.
    ThisWeek,
    /// Played longer ago than `stale_after_days`; needs attention.
    Stale,
    /// Event date unknown.
    Unknown,
}

impl PendingAge {
    pub const ALL: [PendingAge; 5] = [
        PendingAge::Future,
        PendingAge::Recent,
        PendingAge::ThisWeek,
        PendingAge::Stale,
        PendingAge::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Future => "future",
            Self::Recent => "recent",
            Self::ThisWeek => "this_week",
            Self::Stale => "stale",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PendingAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket boundaries, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgePolicy {
    pub recent_within_days: i64,
    pub stale_after_days: i64,
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self {
            recent_within_days: 1,
            stale_after_days: 7,
        }
    }
}

impl AgePolicy {
    /// Bucket an event date relative to `today`.
    #[must_use]
    pub fn classify(&self, scheduled_at: Option<NaiveDateTime>, today: NaiveDate) -> PendingAge {
        let Some(at) = scheduled_at else {
            return PendingAge::Unknown;
        };
        let day = at.date();
        if day > today {
            return PendingAge::Future;
        }
        let days_since = (today - day).num_days();
        if days_since <= self.recent_within_days {
            PendingAge::Recent
        } else if days_since <= self.stale_after_days {
            PendingAge::ThisWeek
        } else {
            PendingAge::Stale
        }
    }
}

/// Bucket an event date relative to `today` under `policy`.
#[must_use]
pub fn classify_age(
    scheduled_at: Option<NaiveDateTime>,
    today: NaiveDate,
    policy: &AgePolicy,
) -> PendingAge {
    policy.classify(scheduled_at, today)
}
