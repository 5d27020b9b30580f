//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the wager store, the event directory, and the
//! two read-only result sources the engine settles against.

pub mod matcher;
pub mod source;
pub mod store;
