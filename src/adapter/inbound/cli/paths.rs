//! Path utilities for riftbet.
//!
//! Configuration lives under `~/.riftbet/`:
//! - `~/.riftbet/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the riftbet home directory (`~/.riftbet/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".riftbet")
}

/// Returns the default config file path (`~/.riftbet/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
