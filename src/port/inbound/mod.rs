//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`operator`]: operator-facing use cases for settlement runs, reports,
//!   and configuration checks.

pub mod operator;
