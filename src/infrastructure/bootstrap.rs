//! Infrastructure bootstrap helpers for wiring adapters into the engine.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapter::outbound::extract::CsvExtract;
use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, run_bets_migrations, run_history_migrations,
};
use crate::adapter::outbound::sqlite::{SqliteMapResultStore, SqliteWagerStore};
use crate::application::settlement::{
    Evaluator, ExtractMatcher, SettlementDriver, SettlementWriter, TotalsResolver,
};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::matcher::IdentityMatcher;

/// Open the wager database, ensuring its schema.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open_wager_store(config: &Config) -> Result<Arc<SqliteWagerStore>> {
    let pool = create_pool(&config.sources.bets_database)?;
    run_bets_migrations(&pool)?;
    debug!(path = %config.sources.bets_database, "Opened wager database");
    Ok(Arc::new(
        SqliteWagerStore::new(pool).with_default_stake(config.settlement.default_stake),
    ))
}

/// Open the history database, ensuring its schema.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open_result_store(config: &Config) -> Result<Arc<SqliteMapResultStore>> {
    let pool = create_pool(&config.sources.history_database)?;
    run_history_migrations(&pool)?;
    debug!(path = %config.sources.history_database, "Opened history database");
    Ok(Arc::new(SqliteMapResultStore::new(pool)))
}

/// Load the flat extract and wrap it in a matcher configured from `[matching]`.
///
/// # Errors
/// Returns an error if the extract exists but cannot be parsed.
pub fn build_matcher(config: &Config) -> Result<Arc<dyn IdentityMatcher>> {
    let extract = CsvExtract::load(&config.sources.player_extract)?;
    Ok(Arc::new(
        ExtractMatcher::new(Arc::new(extract))
            .with_aliases(config.matching.aliases())
            .with_tolerance_days(config.matching.date_tolerance_days),
    ))
}

/// Build a settlement driver over the configured sources.
///
/// # Errors
/// Returns an error if any source cannot be opened.
pub fn build_driver(config: &Config, dry_run: bool) -> Result<SettlementDriver> {
    let wagers = open_wager_store(config)?;
    let results = open_result_store(config)?;
    let matcher = build_matcher(config)?;
    let policy = &config.settlement;

    let mut totals = TotalsResolver::new(results).with_duration_unit(policy.duration_unit);
    if policy.totals_extract_fallback {
        totals = totals.with_extract_fallback(matcher.clone());
    }

    info!(
        bets = %config.sources.bets_database,
        history = %config.sources.history_database,
        extract = %config.sources.player_extract,
        dry_run,
        "Settlement sources ready"
    );

    Ok(SettlementDriver::new(
        wagers.clone(),
        wagers.clone(),
        totals,
        matcher,
        SettlementWriter::new(wagers).dry_run(dry_run),
    )
    .with_evaluator(Evaluator::new(policy.tie_policy))
    .with_age_policy(policy.age_policy())
    .with_default_stake(policy.default_stake)
    .skip_future_events(policy.skip_future_events))
}
