//! SQLite database modules.
//!
//! Connection management, schema definitions, and Diesel model types for
//! the wager database and the history database.

pub mod connection;
pub mod model;
pub mod schema;
