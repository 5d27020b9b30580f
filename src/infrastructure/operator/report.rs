//! Report operator implementation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{classify_age, EventId, EventInfo, PerformanceSummary};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::report::{PendingWagerView, ReportOperator};
use crate::port::outbound::store::{EventDirectory, WagerStore};

use super::entry::Operator;

impl ReportOperator for Operator {
    fn pending_wagers(&self, config_toml: &str, now: DateTime<Utc>) -> Result<Vec<PendingWagerView>> {
        let config = Config::parse_toml(config_toml)?;
        let store = bootstrap::open_wager_store(&config)?;
        let policy = config.settlement.age_policy();
        let today = now.date_naive();

        let mut events: HashMap<EventId, Option<EventInfo>> = HashMap::new();
        let mut views = Vec::new();
        for wager in store.pending()? {
            let event = match events.get(&wager.event_id) {
                Some(event) => event.clone(),
                None => {
                    let found = store.event(&wager.event_id)?;
                    events.insert(wager.event_id.clone(), found.clone());
                    found
                }
            };
            let scheduled_at = event.as_ref().and_then(|e| e.scheduled_at);
            views.push(PendingWagerView {
                wager_id: wager.id,
                event_id: wager.event_id,
                teams: event.as_ref().map(EventInfo::label),
                scheduled_at,
                market: wager.market,
                selection: wager.selection,
                line: wager.line,
                odds: wager.odds,
                status: wager.status,
                age: classify_age(scheduled_at, today, &policy),
            });
        }
        Ok(views)
    }

    fn performance(&self, config_toml: &str) -> Result<PerformanceSummary> {
        let config = Config::parse_toml(config_toml)?;
        bootstrap::open_wager_store(&config)?.summary()
    }
}
