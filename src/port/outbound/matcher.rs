//! Identity bridge between the wager store's events and the flat extract.

use crate::domain::{EventInfo, IdentityFailure, MatchedSeries};
use crate::error::Result;

/// Outcome of locating an event in the flat extract.
///
/// The outer `Result` of [`IdentityMatcher::locate`] carries source
/// failures; this one carries "not found" and "ambiguous", which keep the
/// wager pending.
pub type SeriesLookup = std::result::Result<MatchedSeries, IdentityFailure>;

/// Finds the extract rows that belong to an event.
pub trait IdentityMatcher: Send + Sync {
    fn locate(&self, event: &EventInfo) -> Result<SeriesLookup>;
}
