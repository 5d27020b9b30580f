//! Handler for the `settle` command.

use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::{operator, output};
use crate::application::settlement::{PendingEntry, SettledEntry, SettlementReport};
use crate::domain::{Outcome, PendingAge};
use crate::error::Result;
use crate::port::inbound::operator::settlement::SettleRequest;

#[derive(Tabled)]
struct SettledRow {
    #[tabled(rename = "Wager")]
    wager: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Predicate")]
    predicate: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Result")]
    outcome: String,
    #[tabled(rename = "Profit")]
    profit: String,
}

impl From<&SettledEntry> for SettledRow {
    fn from(entry: &SettledEntry) -> Self {
        Self {
            wager: entry.wager_id.to_string(),
            event: entry.event_id.to_string(),
            predicate: entry.predicate.clone(),
            actual: entry.actual_value.to_string(),
            outcome: entry.outcome.to_string(),
            profit: output::money(entry.profit).to_string(),
        }
    }
}

#[derive(Tabled)]
struct PendingRow {
    #[tabled(rename = "Wager")]
    wager: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Selection")]
    selection: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&PendingEntry> for PendingRow {
    fn from(entry: &PendingEntry) -> Self {
        Self {
            wager: entry.wager_id.to_string(),
            event: entry.event_id.to_string(),
            market: entry.market.clone(),
            selection: entry.selection.clone(),
            age: entry.age.to_string(),
            reason: entry.reason.to_string(),
        }
    }
}

/// Execute `settle`.
pub fn execute(path: &Path, dry_run: bool) -> Result<()> {
    let config_toml = operator::load_config(path)?;
    let request = SettleRequest {
        config_toml,
        dry_run,
        now: Utc::now(),
    };

    let pb = output::spinner("Settling open wagers...");
    let report = match operator::with_source(&request.config_toml, operator::operator().settle(&request)) {
        Ok(report) => report,
        Err(err) => {
            output::spinner_fail(&pb, "Settlement run failed");
            return Err(err);
        }
    };
    output::spinner_success(&pb, &format!("Checked {} open wagers", report.pending_before));

    if output::is_json() {
        output::json_output(report_json(&report));
        return Ok(());
    }

    render(&report);
    Ok(())
}

fn render(report: &SettlementReport) {
    output::section(if report.dry_run {
        "Settlement (dry run)"
    } else {
        "Settlement"
    });
    output::field("Open before", report.pending_before);
    output::field("Won", output::positive(report.won()));
    output::field("Lost", output::negative(report.lost()));
    output::field("Still open", report.still_pending());
    if report.skipped > 0 {
        output::field("Skipped", report.skipped);
    }
    output::field("Net profit", output::signed(report.net_profit()));

    if !report.settled.is_empty() {
        output::section("Settled");
        let rows: Vec<SettledRow> = report.settled.iter().map(SettledRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }

    let review: Vec<PendingRow> = report.needs_review().map(PendingRow::from).collect();
    if !review.is_empty() {
        output::section("Needs Review");
        output::lines(&Table::new(review).to_string());
    }

    let waiting = report.transient().count();
    if waiting > 0 {
        output::section("Waiting On Data");
        output::note(&format!("{waiting} wagers will be retried on the next run"));
        if output::verbosity() > 0 {
            let rows: Vec<PendingRow> = report.transient().map(PendingRow::from).collect();
            output::lines(&Table::new(rows).to_string());
        }
    }

    if report.ages.total() > 0 {
        output::section("Pending By Age");
        for age in PendingAge::ALL {
            let count = report.ages.count(age);
            if count > 0 {
                output::field(age.as_str(), count);
            }
        }
    }

    let stale: Vec<&PendingEntry> = report
        .pending
        .iter()
        .filter(|entry| entry.age == PendingAge::Stale)
        .collect();
    if !stale.is_empty() {
        output::warning(&format!("{} wagers pending for over a week", stale.len()));
        for entry in stale {
            output::note(&format!(
                "#{} {} / {} ({})",
                entry.wager_id, entry.market, entry.selection, entry.reason
            ));
        }
    }

    if report.dry_run {
        output::hint("dry run: nothing was written");
    }
}

fn report_json(report: &SettlementReport) -> serde_json::Value {
    let settled: Vec<serde_json::Value> = report
        .settled
        .iter()
        .map(|entry| {
            json!({
                "wager_id": entry.wager_id.to_string(),
                "event_id": entry.event_id.to_string(),
                "predicate": entry.predicate,
                "outcome": match entry.outcome {
                    Outcome::Won => "won",
                    Outcome::Lost => "lost",
                },
                "actual_value": entry.actual_value.to_string(),
                "profit": entry.profit.to_string(),
            })
        })
        .collect();
    let pending: Vec<serde_json::Value> = report
        .pending
        .iter()
        .map(|entry| {
            json!({
                "wager_id": entry.wager_id.to_string(),
                "event_id": entry.event_id.to_string(),
                "market": entry.market,
                "selection": entry.selection,
                "reason": entry.reason.label(),
                "detail": entry.reason.to_string(),
                "transient": entry.reason.is_transient(),
                "age": entry.age.as_str(),
            })
        })
        .collect();
    let ages: serde_json::Map<String, serde_json::Value> = PendingAge::ALL
        .iter()
        .map(|age| (age.as_str().to_string(), json!(report.ages.count(*age))))
        .collect();

    json!({
        "command": "settle",
        "started_at": report.started_at.to_rfc3339(),
        "dry_run": report.dry_run,
        "pending_before": report.pending_before,
        "won": report.won(),
        "lost": report.lost(),
        "still_pending": report.still_pending(),
        "skipped": report.skipped,
        "net_profit": report.net_profit().to_string(),
        "settled": settled,
        "pending": pending,
        "ages": ages,
    })
}
