//! Verdict evaluator.

use rust_decimal::Decimal;

use crate::domain::{Direction, Outcome, PendingReason, Predicate, Resolution, TiePolicy, Verdict};

/// Applies a predicate to a resolved value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    tie_policy: TiePolicy,
}

impl Evaluator {
    #[must_use]
    pub const fn new(tie_policy: TiePolicy) -> Self {
        Self { tie_policy }
    }

    #[must_use]
    pub const fn tie_policy(&self) -> TiePolicy {
        self.tie_policy
    }

    /// Over wins iff `actual > line`, Under wins iff `actual < line`. An
    /// exact tie loses either direction unless the tie policy is `Review`.
    ///
    /// Profit is exactly `stake * (odds - 1)` on a win and `-stake` on a
    /// loss.
    #[must_use]
    pub fn evaluate(
        &self,
        predicate: &Predicate,
        resolution: Resolution,
        odds: Decimal,
        stake: Decimal,
    ) -> Verdict {
        let actual = match resolution {
            Resolution::Resolved(actual) => actual,
            Resolution::Unavailable(reason) => return Verdict::Unresolved(reason),
        };

        if actual == predicate.line && self.tie_policy == TiePolicy::Review {
            return Verdict::Unresolved(PendingReason::TieUnderReview { actual });
        }

        let won = match predicate.direction {
            Direction::Over => actual > predicate.line,
            Direction::Under => actual < predicate.line,
        };
        let outcome = if won { Outcome::Won } else { Outcome::Lost };

        Verdict::Settled {
            outcome,
            actual_value: actual,
            profit: outcome.profit(odds, stake),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatKind;
    use crate::testkit::domain::totals_predicate;
    use rust_decimal_macros::dec;

    fn over(line: Decimal) -> Predicate {
        totals_predicate(StatKind::Kills, 1, line)
    }

    fn under(line: Decimal) -> Predicate {
        let mut predicate = over(line);
        predicate.direction = Direction::Under;
        predicate
    }

    fn settle(predicate: &Predicate, actual: Decimal, odds: Decimal) -> Verdict {
        Evaluator::default().evaluate(predicate, Resolution::Resolved(actual), odds, Decimal::ONE)
    }

    #[test]
    fn over_wins_above_line() {
        assert_eq!(
            settle(&over(dec!(3.5)), dec!(4), dec!(1.9)),
            Verdict::Settled {
                outcome: Outcome::Won,
                actual_value: dec!(4),
                profit: dec!(0.9)
            }
        );
    }

    #[test]
    fn under_loses_above_line() {
        assert_eq!(
            settle(&under(dec!(4.5)), dec!(5), dec!(2.2)),
            Verdict::Settled {
                outcome: Outcome::Lost,
                actual_value: dec!(5),
                profit: dec!(-1)
            }
        );
    }

    #[test]
    fn exact_tie_loses_both_directions() {
        for predicate in [over(dec!(30)), under(dec!(30))] {
            let verdict = settle(&predicate, dec!(30), dec!(1.8));
            assert!(
                matches!(
                    verdict,
                    Verdict::Settled {
                        outcome: Outcome::Lost,
                        ..
                    }
                ),
                "{predicate}"
            );
        }
    }

    #[test]
    fn exact_tie_under_review_policy_stays_open() {
        let verdict = Evaluator::new(TiePolicy::Review).evaluate(
            &over(dec!(30)),
            Resolution::Resolved(dec!(30)),
            dec!(1.8),
            Decimal::ONE,
        );
        assert_eq!(
            verdict,
            Verdict::Unresolved(PendingReason::TieUnderReview { actual: dec!(30) })
        );
    }

    #[test]
    fn review_policy_still_settles_non_ties() {
        let verdict = Evaluator::new(TiePolicy::Review).evaluate(
            &under(dec!(30.5)),
            Resolution::Resolved(dec!(30)),
            dec!(1.8),
            Decimal::ONE,
        );
        assert!(verdict.is_settled());
    }

    #[test]
    fn unavailable_is_unresolved() {
        let reason = PendingReason::ResultUnavailable {
            map: 1,
            stat: StatKind::Kills,
        };
        let verdict = Evaluator::default().evaluate(
            &over(dec!(27.5)),
            Resolution::Unavailable(reason.clone()),
            dec!(1.8),
            Decimal::ONE,
        );
        assert_eq!(verdict, Verdict::Unresolved(reason));
    }

    #[test]
    fn profit_keeps_full_odds_precision() {
        let settle_with = |stake| {
            Evaluator::default().evaluate(
                &over(dec!(3.5)),
                Resolution::Resolved(dec!(4)),
                dec!(1.833),
                stake,
            )
        };
        assert!(matches!(settle_with(Decimal::ONE), Verdict::Settled { profit, .. } if profit == dec!(0.833)));
        assert!(matches!(settle_with(dec!(3)), Verdict::Settled { profit, .. } if profit == dec!(2.499)));
    }
}
