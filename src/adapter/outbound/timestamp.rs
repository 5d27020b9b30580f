//! Lenient timestamp parsing for stored text columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Storage format for timestamps this crate writes.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FORMATS: &[&str] = &[
    STORAGE_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse RFC 3339, the common naive layouts, or a bare date (midnight).
///
/// Offsets are converted to UTC. Returns `None` for blank or unrecognised
/// text.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.naive_utc());
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
}

/// Format a timestamp in [`STORAGE_FORMAT`].
#[must_use]
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(STORAGE_FORMAT).to_string()
}
