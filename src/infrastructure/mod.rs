//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! settlement rules.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`operator`] - Operator use cases behind the CLI

pub mod bootstrap;
pub mod config;
pub mod operator;
