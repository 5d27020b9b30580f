//! Unified operator capability surface for inbound adapters.

use super::config::ConfigurationOperator;
use super::report::ReportOperator;
use super::settlement::SettlementOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort: ConfigurationOperator + ReportOperator + SettlementOperator {}

impl<T> OperatorPort for T where T: ConfigurationOperator + ReportOperator + SettlementOperator {}
