//! Timestamp parsing for backend-provided time strings.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Parse a timestamp as written by Resque.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`, `2024-01-15T10:30:00+02:00`),
/// `2024-01-15 10:30:00 +0200`, and the failure format
/// `2024/01/15 10:30:00 UTC`. Naive times without an offset are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S %z", "%Y/%m/%d %H:%M:%S %z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = s
        .strip_suffix(" UTC")
        .or_else(|| s.strip_suffix('Z'))
        .unwrap_or(s);
    for format in ["%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Utc.from_local_datetime(&dt).single();
        }
    }

    None
}

/// Render a timestamp in the local time zone, falling back to the raw text.
pub fn format_local(s: &str) -> String {
    match parse_timestamp(s) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => s.to_string(),
    }
}
