use chrono::{DateTime, Utc};

/// Parse a GitHub timestamp such as `2026-01-10T12:34:56Z` into UTC.
///
/// Explicit offsets are accepted and normalised. Anything unparsable yields
/// `None` so callers can decide how to treat an unknown time.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
