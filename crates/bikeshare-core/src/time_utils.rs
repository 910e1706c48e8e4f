use chrono::{DateTime, NaiveDateTime};
use tracing::debug;

/// Naive layouts accepted for the `Start Time` / `End Time` columns.
const FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse a trip-log timestamp into a naive local [`NaiveDateTime`].
///
/// The city CSVs store wall-clock local times such as `2017-01-01 09:07:57`.
/// Fractional seconds and the ISO `T` separator are accepted too. A value
/// carrying an RFC 3339 offset keeps its local wall-clock reading.
///
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    debug!("could not parse timestamp \"{}\"", s);
    None
}

// ── Tests ──────────────────────────────────────────────────────────────────────
