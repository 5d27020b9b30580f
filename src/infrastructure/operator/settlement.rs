//! Settlement operator implementation.

use crate::application::settlement::SettlementReport;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::settlement::{SettleRequest, SettlementOperator};

use super::entry::Operator;

impl SettlementOperator for Operator {
    fn settle(&self, request: &SettleRequest) -> Result<SettlementReport> {
        let config = Config::parse_toml(&request.config_toml)?;
        let driver = bootstrap::build_driver(&config, request.dry_run)?;
        driver.run(request.now)
    }
}
