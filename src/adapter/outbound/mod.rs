//! Outbound adapters (driven side).
//!
//! - [`sqlite`] - wager store and concluded-map history, both SQLite via Diesel
//! - [`extract`] - per-player CSV extract
//! - [`timestamp`] - lenient timestamp parsing shared by the stores

pub mod extract;
pub mod sqlite;
pub mod timestamp;
