use chrono::{DateTime, Utc};

/// ISO-8601 UTC timestamp with second precision, e.g. `2024-05-01T14:30:05Z`.
pub fn format_utc_iso(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
