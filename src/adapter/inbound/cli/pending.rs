//! Handler for the `pending` command.

use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::{operator, output};
use crate::domain::PendingAge;
use crate::error::Result;
use crate::port::inbound::operator::report::PendingWagerView;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Wager")]
    wager: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Scheduled")]
    scheduled: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Selection")]
    selection: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Age")]
    age: String,
}

impl From<&PendingWagerView> for Row {
    fn from(view: &PendingWagerView) -> Self {
        Self {
            wager: view.wager_id.to_string(),
            event: view.teams.clone().unwrap_or_else(|| view.event_id.to_string()),
            scheduled: view
                .scheduled_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
            market: view.market.clone(),
            selection: view.selection.clone(),
            line: view.line.clone(),
            odds: view.odds.to_string(),
            age: view.age.to_string(),
        }
    }
}

/// Execute `pending`.
pub fn execute(path: &Path) -> Result<()> {
    let config_toml = operator::load_config(path)?;
    let wagers = operator::with_source(
        &config_toml,
        operator::operator().pending_wagers(&config_toml, Utc::now()),
    )?;

    if output::is_json() {
        let items: Vec<serde_json::Value> = wagers
            .iter()
            .map(|view| {
                json!({
                    "wager_id": view.wager_id.to_string(),
                    "event_id": view.event_id.to_string(),
                    "teams": view.teams,
                    "scheduled_at": view.scheduled_at.map(|at| at.to_string()),
                    "market": view.market,
                    "selection": view.selection,
                    "line": view.line,
                    "odds": view.odds.to_string(),
                    "status": view.status.to_string(),
                    "age": view.age.as_str(),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "pending",
            "count": wagers.len(),
            "wagers": items,
        }));
        return Ok(());
    }

    if output::is_quiet() {
        return Ok(());
    }

    output::section("Open Wagers");
    if wagers.is_empty() {
        output::success("Nothing pending");
        return Ok(());
    }

    let rows: Vec<Row> = wagers.iter().map(Row::from).collect();
    output::lines(&Table::new(rows).to_string());

    let stale = wagers.iter().filter(|view| view.age == PendingAge::Stale).count();
    output::field("Total", wagers.len());
    if stale > 0 {
        output::warning(&format!("{stale} wagers are stale; check their results by hand"));
    }
    Ok(())
}
