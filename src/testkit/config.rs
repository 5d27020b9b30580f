//! Canonical test configurations.

use std::path::Path;

/// Minimal configuration TOML pointing at the given sources.
pub fn config_toml(bets: &Path, history: &Path, extract: &Path) -> String {
    format!(
        r#"[logging]
level = "warn"
format = "pretty"

[sources]
bets_database = "{}"
history_database = "{}"
player_extract = "{}"
"#,
        toml_path(bets),
        toml_path(history),
        toml_path(extract),
    )
}

/// Same as [`config_toml`] with extra TOML appended (e.g. a `[settlement]`
/// table).
pub fn config_toml_with(bets: &Path, history: &Path, extract: &Path, extra: &str) -> String {
    format!("{}\n{extra}\n", config_toml(bets, history, extract))
}

fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}
