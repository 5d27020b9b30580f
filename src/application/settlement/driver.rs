//! Settlement driver: one pass over every open wager.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::evaluator::Evaluator;
use super::grammar::MarketGrammar;
use super::player::PlayerResolver;
use super::report::{PendingEntry, SettledEntry, SettlementReport};
use super::totals::TotalsResolver;
use super::writer::{SettlementWriter, WriteOutcome};
use crate::domain::{
    AgePolicy, EventId, EventInfo, MarketFamily, PendingAge, PendingReason, Predicate, Resolution,
    Verdict, Wager,
};
use crate::error::Result;
use crate::port::outbound::matcher::IdentityMatcher;
use crate::port::outbound::store::{EventDirectory, WagerStore};

/// Runs parse, resolve, evaluate and write for each open wager in turn.
///
/// Per-wager problems leave that wager pending and the pass continues; only
/// store and source failures abort the run. A pass can be repeated at any
/// time.
pub struct SettlementDriver {
    wagers: Arc<dyn WagerStore>,
    events: Arc<dyn EventDirectory>,
    totals: TotalsResolver,
    matcher: Arc<dyn IdentityMatcher>,
    players: PlayerResolver,
    grammar: MarketGrammar,
    evaluator: Evaluator,
    writer: SettlementWriter,
    ages: AgePolicy,
    default_stake: Decimal,
    skip_future: bool,
}

impl SettlementDriver {
    #[must_use]
    pub fn new(
        wagers: Arc<dyn WagerStore>,
        events: Arc<dyn EventDirectory>,
        totals: TotalsResolver,
        matcher: Arc<dyn IdentityMatcher>,
        writer: SettlementWriter,
    ) -> Self {
        Self {
            wagers,
            events,
            totals,
            matcher,
            players: PlayerResolver::new(),
            grammar: MarketGrammar::standard(),
            evaluator: Evaluator::default(),
            writer,
            ages: AgePolicy::default(),
            default_stake: Decimal::ONE,
            skip_future: true,
        }
    }

    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    #[must_use]
    pub fn with_grammar(mut self, grammar: MarketGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    #[must_use]
    pub fn with_age_policy(mut self, ages: AgePolicy) -> Self {
        self.ages = ages;
        self
    }

    /// Stake assumed for wagers that recorded none.
    #[must_use]
    pub fn with_default_stake(mut self, stake: Decimal) -> Self {
        self.default_stake = stake;
        self
    }

    /// Leave wagers on events dated after today untouched.
    #[must_use]
    pub fn skip_future_events(mut self, skip: bool) -> Self {
        self.skip_future = skip;
        self
    }

    /// Settle every open wager once.
    ///
    /// # Errors
    /// Returns an error if the wager store, event directory, or a result
    /// source fails. Wagers written before the failure stay written.
    pub fn run(&self, now: DateTime<Utc>) -> Result<SettlementReport> {
        let open = self.wagers.pending()?;
        let today = now.date_naive();
        let mut report = SettlementReport::new(now, self.writer.is_dry_run(), open.len());
        let mut events: HashMap<EventId, Option<EventInfo>> = HashMap::new();

        info!(pending = open.len(), dry_run = report.dry_run, "Settlement run started");

        for wager in &open {
            let event = match events.get(&wager.event_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.events.event(&wager.event_id)?;
                    events.insert(wager.event_id.clone(), found.clone());
                    found
                }
            };
            let age = self
                .ages
                .classify(event.as_ref().and_then(|e| e.scheduled_at), today);

            let (verdict, predicate) = self.settle_one(wager, event.as_ref(), age)?;
            match self.writer.apply(wager, &verdict, now)? {
                WriteOutcome::Written | WriteOutcome::DryRun => {
                    if let (
                        Verdict::Settled {
                            outcome,
                            actual_value,
                            profit,
                        },
                        Some(predicate),
                    ) = (&verdict, predicate)
                    {
                        report.push_settled(SettledEntry {
                            wager_id: wager.id,
                            event_id: wager.event_id.clone(),
                            predicate: predicate.to_string(),
                            outcome: *outcome,
                            actual_value: *actual_value,
                            profit: *profit,
                        });
                    }
                }
                WriteOutcome::AlreadySettled => report.skipped += 1,
                WriteOutcome::Unchanged => {
                    if let Verdict::Unresolved(reason) = verdict {
                        warn!(
                            wager_id = %wager.id,
                            event_id = %wager.event_id,
                            reason = reason.label(),
                            age = %age,
                            "Wager left pending: {reason}"
                        );
                        report.push_pending(PendingEntry {
                            wager_id: wager.id,
                            event_id: wager.event_id.clone(),
                            market: wager.market.clone(),
                            selection: wager.selection.clone(),
                            reason,
                            age,
                        });
                    }
                }
            }
        }

        info!(
            settled = report.settled.len(),
            won = report.won(),
            lost = report.lost(),
            pending = report.still_pending(),
            stale = report.ages.stale,
            profit = %report.net_profit(),
            "Settlement run finished"
        );
        Ok(report)
    }

    /// Verdict for one wager, plus the predicate when parsing succeeded.
    fn settle_one(
        &self,
        wager: &Wager,
        event: Option<&EventInfo>,
        age: PendingAge,
    ) -> Result<(Verdict, Option<Predicate>)> {
        if self.skip_future && age == PendingAge::Future {
            return Ok((Verdict::Unresolved(PendingReason::NotStarted), None));
        }

        let predicate = match self.grammar.parse(
            &wager.market,
            &wager.selection,
            &wager.line,
            wager.map_number,
        ) {
            Ok(predicate) => predicate,
            Err(failure) => {
                return Ok((Verdict::Unresolved(PendingReason::Unparsed(failure)), None));
            }
        };

        let resolution = self.resolve(wager, event, &predicate)?;
        let verdict = self.evaluator.evaluate(
            &predicate,
            resolution,
            wager.odds,
            wager.stake_or(self.default_stake),
        );
        Ok((verdict, Some(predicate)))
    }

    fn resolve(
        &self,
        wager: &Wager,
        event: Option<&EventInfo>,
        predicate: &Predicate,
    ) -> Result<Resolution> {
        match predicate.family {
            MarketFamily::Totals => {
                // The structured store is keyed by event id alone.
                let bare;
                let event = match event {
                    Some(event) => event,
                    None => {
                        bare = EventInfo::new(wager.event_id.clone(), "", "", None);
                        &bare
                    }
                };
                self.totals.resolve(event, predicate)
            }
            MarketFamily::Player => {
                let Some(event) = event else {
                    return Ok(Resolution::Unavailable(PendingReason::EventUnknown));
                };
                Ok(match self.matcher.locate(event)? {
                    Ok(series) => self.players.resolve(&series, predicate),
                    Err(failure) => {
                        Resolution::Unavailable(PendingReason::IdentityUnresolved(failure))
                    }
                })
            }
        }
    }
}
