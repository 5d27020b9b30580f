//! Settlement run use case.

use chrono::{DateTime, Utc};

use crate::application::settlement::SettlementReport;
use crate::error::Result;

/// Parameters of one settlement run.
#[derive(Debug, Clone)]
pub struct SettleRequest {
    pub config_toml: String,
    pub dry_run: bool,
    pub now: DateTime<Utc>,
}

/// Settlement use cases for operator-facing adapters.
pub trait SettlementOperator: Send + Sync {
    /// Run one settlement pass over every open wager.
    fn settle(&self, request: &SettleRequest) -> Result<SettlementReport>;
}
