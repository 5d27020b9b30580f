//! Exchange-agnostic settlement types.
//!
//! Everything in here is pure data: no I/O, no storage formats. Ports and
//! adapters translate to and from these types.

pub mod age;
pub mod event;
pub mod id;
pub mod market;
pub mod result;
pub mod summary;
pub mod verdict;
pub mod wager;

pub use age::{classify_age, AgePolicy, PendingAge};
pub use event::EventInfo;
pub use id::{EventId, WagerId};
pub use market::{Direction, MapIndex, MarketFamily, Predicate, StatKind};
pub use result::{GameHeader, MapResult, MatchedSeries, ParticipantRow, SideTotals};
pub use summary::PerformanceSummary;
pub use verdict::{
    DurationUnit, IdentityFailure, Outcome, ParseFailure, PendingReason, Resolution, TiePolicy,
    Verdict,
};
pub use wager::{SettlementRecord, Wager, WagerStatus};
