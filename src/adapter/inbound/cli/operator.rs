//! Inbound operator accessor for CLI handlers.

use std::path::Path;
use std::sync::OnceLock;

use super::diagnostic::{self, ConfigDiagnostic};
use super::output;
use crate::error::{ConfigError, Error, Result};
use crate::port::inbound::operator::config::LogOverrides;
use crate::port::inbound::operator::port::OperatorPort;

static OPERATOR: OnceLock<Box<dyn OperatorPort>> = OnceLock::new();
static LOG_OVERRIDES: OnceLock<LogOverrides> = OnceLock::new();

/// Installs the operator implementation used by CLI handlers.
pub fn install(operator: Box<dyn OperatorPort>) -> std::result::Result<(), Box<dyn OperatorPort>> {
    OPERATOR.set(operator)
}

/// Records the logging flags given on the command line.
pub fn set_log_overrides(overrides: LogOverrides) {
    let _ = LOG_OVERRIDES.set(overrides);
}

/// Returns the configured operator capability surface for CLI handlers.
#[must_use]
pub fn operator() -> &'static dyn OperatorPort {
    OPERATOR
        .get()
        .expect("CLI operator not installed; call cli::operator::install from main")
        .as_ref()
}

/// Load config TOML from disk for operator-facing use-cases.
pub fn read_config_toml(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?)
}

/// Read the config file and start logging from it.
pub fn load_config(path: &Path) -> Result<String> {
    let config_toml = read_config_toml(path)?;
    let overrides = LOG_OVERRIDES.get().cloned().unwrap_or_default();
    with_source(&config_toml, operator().init_logging(&config_toml, &overrides))?;
    Ok(config_toml)
}

/// Print a source-annotated diagnostic for TOML syntax errors, then pass
/// the result through unchanged.
pub fn with_source<T>(config_toml: &str, result: Result<T>) -> Result<T> {
    if let Err(Error::Config(ConfigError::Parse(err))) = &result {
        if !output::is_json() {
            if let Some(found) = ConfigDiagnostic::from_toml(err, config_toml) {
                eprintln!("{}", diagnostic::render(&found));
            }
        }
    }
    result
}
