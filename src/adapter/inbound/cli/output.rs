//! Terminal output for CLI handlers.
//!
//! Every helper honours three global switches set once from the CLI flags:
//! JSON mode emits one `{"type", "payload"}` object per line, quiet mode
//! drops everything except warnings and errors, and the color switch
//! decides whether ANSI styling is applied at all.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
    /// Apply ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8, color: bool) -> Self {
        Self {
            json,
            quiet,
            verbose,
            color,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Render `text` through `style` only when colors are on.
fn styled(text: impl Display, style: impl FnOnce(&str) -> String) -> String {
    let text = text.to_string();
    if read_config().color {
        style(&text)
    } else {
        text
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json {
        emit_json_line(
            "header",
            json!({
                "app": "riftbet",
                "version": version,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!(
        "{} {}",
        styled("riftbet", |s| s.bold().to_string()),
        styled(version, |s| s.dimmed().to_string())
    );
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line(
            "field",
            json!({
                "label": label,
                "value": value,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    let label = format!("{label:<12}");
    println!("  {} {}", styled(label, |s| s.dimmed().to_string()), value);
}

pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", styled("✓", |s| s.green().to_string()), message);
}

/// Warnings print even in quiet mode.
pub fn warning(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    println!("  {} {}", styled("⚠", |s| s.yellow().to_string()), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    let config = read_config();

    if config.json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", styled("×", |s| s.red().to_string()), message);
}

pub fn section(title: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    println!("{}", styled(title, |s| s.bold().to_string()));
}

pub fn note(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}", styled(message, |s| s.dimmed().to_string()));
}

/// Print a hint with a "hint:" prefix.
pub fn hint(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("hint", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!(
        "  {}: {}",
        styled("hint", |s| s.cyan().dimmed().to_string()),
        styled(message, |s| s.dimmed().to_string())
    );
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("lines", json!({ "content": content }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a JSON value directly (for commands that need custom JSON output).
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a progress spinner. Hidden in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if config.json || config.quiet {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = indicatif::ProgressBar::new_spinner();
    let template = if config.color {
        "  {spinner:.cyan} {msg}"
    } else {
        "  {spinner} {msg}"
    };
    if let Ok(style) = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template(template)
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success checkmark.
pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if config.json || config.quiet {
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!("{} {}", styled("✓", |s| s.green().to_string()), message));
}

/// Finish a spinner with a failure mark.
pub fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if config.json {
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!("{} {}", styled("×", |s| s.red().to_string()), message));
}

pub fn positive(value: impl Display) -> String {
    styled(value, |s| s.green().to_string())
}

pub fn negative(value: impl Display) -> String {
    styled(value, |s| s.red().to_string())
}

pub fn highlight(value: impl Display) -> String {
    styled(value, |s| s.cyan().to_string())
}

pub fn muted(value: impl Display) -> String {
    styled(value, |s| s.dimmed().to_string())
}

/// Color a signed amount by its sign, shown to cents.
pub fn signed(value: rust_decimal::Decimal) -> String {
    let value = money(value);
    if value.is_sign_negative() && !value.is_zero() {
        negative(value)
    } else {
        positive(format!("+{value}"))
    }
}

/// Amount rounded to cents for display.
pub fn money(value: rust_decimal::Decimal) -> rust_decimal::Decimal {
    value.round_dp(2).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styling_is_plain_without_color() {
        configure(OutputConfig::new(false, false, 0, false));
        assert_eq!(positive("1.5"), "1.5");
        assert_eq!(muted("x"), "x");
        assert_eq!(signed(rust_decimal::Decimal::new(-25, 1)), "-2.5");
        assert_eq!(signed(rust_decimal::Decimal::new(15, 1)), "+1.5");
        assert_eq!(signed(rust_decimal::Decimal::new(2499, 3)), "+2.5");
    }
}
