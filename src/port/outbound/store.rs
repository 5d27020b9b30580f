//! Wager persistence and event identity ports.

use crate::domain::{
    EventId, EventInfo, PerformanceSummary, SettlementRecord, Wager, WagerId,
};
use crate::error::Result;

/// Storage operations for wagers.
pub trait WagerStore: Send + Sync {
    /// All wagers whose status is `pending` or `to_verify`, oldest first.
    fn pending(&self) -> Result<Vec<Wager>>;

    /// Get a wager by id.
    fn get(&self, id: WagerId) -> Result<Option<Wager>>;

    /// Atomically write every settlement field of one wager.
    ///
    /// Only applies while the wager is still open. Returns `false` when the
    /// wager was already settled (or does not exist) and nothing changed.
    fn record_settlement(&self, record: &SettlementRecord) -> Result<bool>;

    /// Realized performance over every wager in the store.
    fn summary(&self) -> Result<PerformanceSummary>;
}

/// Event and team identity lookups.
pub trait EventDirectory: Send + Sync {
    /// Resolve an event to its team names and nominal start.
    fn event(&self, id: &EventId) -> Result<Option<EventInfo>>;
}
