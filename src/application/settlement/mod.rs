//! The settlement engine.
//!
//! One wager at a time: parse its labels into a [`Predicate`], resolve the
//! actual statistic from the matching result source, evaluate, and write.
//!
//! ```text
//! SettlementDriver ─▶ parse_predicate ─┬─▶ TotalsResolver ────────────────┐
//!                                      └─▶ ExtractMatcher ─▶ PlayerResolver ┤
//!                                                                           ▼
//!                                           SettlementWriter ◀─ Evaluator ◀─┘
//! ```
//!
//! [`Predicate`]: crate::domain::Predicate

pub mod driver;
pub mod evaluator;
pub mod grammar;
pub mod matcher;
pub mod parser;
pub mod player;
pub mod report;
pub mod totals;
pub mod writer;

pub use driver::SettlementDriver;
pub use evaluator::Evaluator;
pub use grammar::{MarketGrammar, Production};
pub use matcher::{ExtractMatcher, TeamAliases};
pub use parser::parse_predicate;
pub use player::PlayerResolver;
pub use report::{AgeBreakdown, PendingEntry, SettledEntry, SettlementReport};
pub use totals::TotalsResolver;
pub use writer::{SettlementWriter, WriteOutcome};
