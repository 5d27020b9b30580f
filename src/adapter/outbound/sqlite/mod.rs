//! SQLite persistence adapters.
//!
//! Provides the wager store, event directory and structured result store
//! using Diesel ORM.

pub mod database;
pub mod history;
pub mod wager_store;

pub use history::SqliteMapResultStore;
pub use wager_store::SqliteWagerStore;
