//! Closed grammar of recognized market statistics.
//!
//! Supported markets are a fixed table of substring productions, so adding
//! a statistic is a data change here rather than a new branch in the parser.

use crate::domain::{MarketFamily, StatKind};

/// One recognized substring and the statistic it denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Production {
    /// Lowercase substring matched against the label.
    pub token: &'static str,
    pub family: MarketFamily,
    pub stat: StatKind,
}

impl Production {
    const fn new(token: &'static str, family: MarketFamily, stat: StatKind) -> Self {
        Self {
            token,
            family,
            stat,
        }
    }
}

/// Totals statistics are read from the selection label, player statistics
/// from the market label. First match in table order wins.
const STANDARD: &[Production] = &[
    Production::new("dragon", MarketFamily::Totals, StatKind::Dragons),
    Production::new("baron", MarketFamily::Totals, StatKind::Barons),
    Production::new("inhibitor", MarketFamily::Totals, StatKind::Inhibitors),
    Production::new("tower", MarketFamily::Totals, StatKind::Towers),
    Production::new("turret", MarketFamily::Totals, StatKind::Towers),
    Production::new("duration", MarketFamily::Totals, StatKind::Duration),
    Production::new("kill", MarketFamily::Totals, StatKind::Kills),
    Production::new("kill", MarketFamily::Player, StatKind::Kills),
    Production::new("death", MarketFamily::Player, StatKind::Deaths),
    Production::new("assist", MarketFamily::Player, StatKind::Assists),
];

/// Table-driven statistic lookup.
#[derive(Debug, Clone, Copy)]
pub struct MarketGrammar {
    productions: &'static [Production],
}

impl Default for MarketGrammar {
    fn default() -> Self {
        Self::standard()
    }
}

impl MarketGrammar {
    /// The built-in table.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            productions: STANDARD,
        }
    }

    /// Grammar over a caller-supplied table.
    #[must_use]
    pub const fn with_productions(productions: &'static [Production]) -> Self {
        Self { productions }
    }

    #[must_use]
    pub const fn productions(&self) -> &'static [Production] {
        self.productions
    }

    /// Statistic named by `text` for `family`, if any production matches.
    #[must_use]
    pub fn lookup(&self, family: MarketFamily, text: &str) -> Option<StatKind> {
        let text = text.to_lowercase();
        self.productions
            .iter()
            .filter(|p| p.family == family)
            .find(|p| text.contains(p.token))
            .map(|p| p.stat)
    }
}
