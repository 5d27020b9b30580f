//! Normalized market predicates.
//!
//! A [`Predicate`] is the evaluable form of a wager's free-text market and
//! selection labels: which statistic, on which map, compared in which
//! direction against which line, and (for player markets) for whom.

use std::fmt;

use rust_decimal::Decimal;

/// Closed set of statistics a wager can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKind {
    Kills,
    Deaths,
    Assists,
    Dragons,
    Towers,
    Barons,
    Inhibitors,
    Duration,
}

impl StatKind {
    /// Every statistic, in declaration order.
    pub const ALL: [StatKind; 8] = [
        StatKind::Kills,
        StatKind::Deaths,
        StatKind::Assists,
        StatKind::Dragons,
        StatKind::Towers,
        StatKind::Barons,
        StatKind::Inhibitors,
        StatKind::Duration,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kills => "kills",
            Self::Deaths => "deaths",
            Self::Assists => "assists",
            Self::Dragons => "dragons",
            Self::Towers => "towers",
            Self::Barons => "barons",
            Self::Inhibitors => "inhibitors",
            Self::Duration => "duration",
        }
    }

    /// Whether the combined total of this statistic is the sum of both
    /// sides. Duration is a single per-map value and is never summed.
    #[must_use]
    pub const fn is_summed(self) -> bool {
        !matches!(self, Self::Duration)
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Over/Under side of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Over,
    Under,
}

impl Direction {
    /// Parse a leading selection token (case-insensitive).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("over") {
            Some(Self::Over)
        } else if token.eq_ignore_ascii_case("under") {
            Some(Self::Under)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::Under => "under",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which resolver a predicate is settled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketFamily {
    /// Both-sides combined statistic, resolved from the structured store.
    Totals,
    /// One named player's statistic, resolved from the flat extract.
    Player,
}

impl MarketFamily {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Totals => "totals",
            Self::Player => "player",
        }
    }
}

impl fmt::Display for MarketFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based index of a map within a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapIndex(u8);

impl MapIndex {
    /// Default map for legacy wagers without any map marker.
    pub const FIRST: MapIndex = MapIndex(1);

    /// Longest supported series (best-of-five).
    pub const MAX: u8 = 5;

    /// Build a map index, rejecting values outside `1..=MAX`.
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (1..=Self::MAX).contains(v))
            .map(Self)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for MapIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for MapIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directly-evaluable form of a wager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub family: MarketFamily,
    pub stat: StatKind,
    pub direction: Direction,
    pub map: MapIndex,
    /// Player name, present only for [`MarketFamily::Player`].
    pub subject: Option<String>,
    pub line: Decimal,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map {} ", self.map)?;
        if let Some(subject) = &self.subject {
            write!(f, "{subject} ")?;
        }
        write!(f, "{} {} {}", self.stat, self.direction, self.line)
    }
}
