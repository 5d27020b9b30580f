//! riftbet - settlement engine for League of Legends esports wagers.
//!
//! Reads open wagers from a SQLite wager store, works out what each one
//! predicts from its market and selection labels, finds the actual figure
//! in a concluded-match history database or a per-player CSV extract, and
//! records won/lost with the realized profit.
//!
//! # Modules
//!
//! - [`domain`] - Wagers, predicates, results and verdicts as pure data
//! - [`port`] - Traits the engine depends on and the operator surface it offers
//! - [`application`] - The settlement engine itself
//! - [`adapter`] - SQLite stores, the CSV extract and the CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use riftbet::infrastructure::bootstrap;
//! use riftbet::infrastructure::config::settings::Config;
//!
//! let config = Config::load("config.toml")?;
//! config.init_logging();
//! let report = bootstrap::build_driver(&config, true)?.run(chrono::Utc::now())?;
//! println!("{} won, {} lost", report.won(), report.lost());
//! # Ok::<(), riftbet::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
