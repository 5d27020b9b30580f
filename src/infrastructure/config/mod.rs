//! Infrastructure configuration modules.

pub mod logging;
pub mod matching;
pub mod settings;
pub mod settlement;
pub mod sources;
