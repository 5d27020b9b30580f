//! Handler for the `summary` command.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{operator, output};
use crate::error::Result;

/// Execute `summary`.
pub fn execute(path: &Path) -> Result<()> {
    let config_toml = operator::load_config(path)?;
    let summary = operator::with_source(&config_toml, operator::operator().performance(&config_toml))?;

    if output::is_json() {
        output::json_output(json!({
            "command": "summary",
            "total": summary.total,
            "won": summary.won,
            "lost": summary.lost,
            "open": summary.open,
            "win_rate": summary.win_rate().map(|rate| rate.to_string()),
            "total_stake": summary.total_stake.to_string(),
            "net_profit": summary.net_profit.to_string(),
            "average_odds": summary.average_odds.map(|odds| odds.to_string()),
        }));
        return Ok(());
    }

    output::section("Performance");
    output::field("Wagers", summary.total);
    output::field("Won", output::positive(summary.won));
    output::field("Lost", output::negative(summary.lost));
    output::field("Open", summary.open);
    output::field(
        "Win rate",
        summary
            .win_rate()
            .map_or_else(|| output::muted("n/a"), |rate| format!("{rate}%")),
    );
    output::field("Staked", summary.total_stake);
    output::field("Net profit", output::signed(summary.net_profit));
    if let Some(odds) = summary.average_odds {
        output::field("Avg odds", odds);
    }
    if summary.settled() == 0 {
        output::hint("run `riftbet settle` once results are in");
    }
    Ok(())
}
