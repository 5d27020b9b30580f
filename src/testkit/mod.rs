//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for wagers, events, extract rows and predicates.
//! - [`memory`] - In-memory implementations of every outbound port.
//! - [`config`] - Canonical configuration TOML pointing at given sources.

pub mod config;
pub mod domain;
pub mod memory;
