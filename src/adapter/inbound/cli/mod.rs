//! CLI module graph.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod operator;
pub mod output;
pub mod paths;
pub mod pending;
pub mod settle;
pub mod summary;
