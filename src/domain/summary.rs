//! Realized performance over the whole wager store.

use rust_decimal::Decimal;

use super::wager::{Wager, WagerStatus};

/// Aggregate counts and realized profit across all wagers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceSummary {
    pub total: u64,
    pub won: u64,
    pub lost: u64,
    pub open: u64,
    pub total_stake: Decimal,
    pub net_profit: Decimal,
    /// Average odds of settled wagers.
    pub average_odds: Option<Decimal>,
}

impl PerformanceSummary {
    /// Fold a set of wagers. Stake and odds figures cover settled wagers
    /// only; a wager without a stake counts as `default_stake`.
    #[must_use]
    pub fn from_wagers<'a>(wagers: impl IntoIterator<Item = &'a Wager>, default_stake: Decimal) -> Self {
        let mut summary = Self::default();
        let mut odds_sum = Decimal::ZERO;
        for wager in wagers {
            summary.total += 1;
            match wager.status {
                WagerStatus::Won => summary.won += 1,
                WagerStatus::Lost => summary.lost += 1,
                _ => {
                    summary.open += 1;
                    continue;
                }
            }
            summary.total_stake += wager.stake_or(default_stake);
            summary.net_profit += wager.actual_profit.unwrap_or_default();
            odds_sum += wager.odds;
        }
        let settled = summary.settled();
        if settled > 0 {
            summary.average_odds = Some((odds_sum / Decimal::from(settled)).round_dp(2));
        }
        summary
    }

    #[must_use]
    pub fn settled(&self) -> u64 {
        self.won + self.lost
    }

    /// Share of settled wagers that won, in percent.
    #[must_use]
    pub fn win_rate(&self) -> Option<Decimal> {
        let settled = self.settled();
        if settled == 0 {
            return None;
        }
        Some((Decimal::from(self.won) * Decimal::from(100) / Decimal::from(settled)).round_dp(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn win_rate_over_settled_only() {
        let summary = PerformanceSummary {
            total: 10,
            won: 3,
            lost: 5,
            open: 2,
            ..Default::default()
        };
        assert_eq!(summary.settled(), 8);
        assert_eq!(summary.win_rate(), Some(dec!(37.5)));
    }

    #[test]
    fn folds_settled_wagers() {
        use crate::domain::WagerId;

        let mut won = Wager::new(WagerId::new(1), "e1", "m", "s", "1.5", dec!(1.9));
        won.status = WagerStatus::Won;
        won.actual_profit = Some(dec!(0.9));
        let mut lost = Wager::new(WagerId::new(2), "e1", "m", "s", "1.5", dec!(2.1));
        lost.status = WagerStatus::Lost;
        lost.stake = Some(dec!(2));
        lost.actual_profit = Some(dec!(-2));
        let open = Wager::new(WagerId::new(3), "e1", "m", "s", "1.5", dec!(5));

        let summary = PerformanceSummary::from_wagers([&won, &lost, &open], Decimal::ONE);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.open, 1);
        assert_eq!(summary.total_stake, dec!(3));
        assert_eq!(summary.net_profit, dec!(-1.1));
        assert_eq!(summary.average_odds, Some(dec!(2)));
        assert_eq!(summary.win_rate(), Some(dec!(50)));
    }

    #[test]
    fn win_rate_without_settled_wagers() {
        assert_eq!(PerformanceSummary::default().win_rate(), None);
    }
}
