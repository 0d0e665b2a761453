//! Human-readable ban lengths
//!
//! Renders at most two of the most significant non-zero units, e.g.
//! `1 day`, `2 weeks 3 days`, `1 hour 30 minutes`.

use chrono::TimeDelta;

const UNITS: [(&str, i64); 6] = [
    ("year", 365 * 24 * 60 * 60),
    ("week", 7 * 24 * 60 * 60),
    ("day", 24 * 60 * 60),
    ("hour", 60 * 60),
    ("minute", 60),
    ("second", 1),
];

const MAX_PARTS: usize = 2;

/// Literal used wherever a ban has no expiry
pub const PERMANENT: &str = "permanent";

/// Format a span of time for humans
///
/// The span is rounded to the nearest second. Negative spans are formatted by
/// magnitude; a zero span renders as `0 seconds`.
pub fn humanize(delta: TimeDelta) -> String {
    let mut remaining = (delta.num_milliseconds().abs() + 500) / 1000;
    if remaining == 0 {
        return "0 seconds".to_string();
    }

    let mut parts = Vec::with_capacity(MAX_PARTS);
    for (name, size) in UNITS {
        let count = remaining / size;
        if count > 0 {
            remaining -= count * size;
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{count} {name}{plural}"));
            if parts.len() == MAX_PARTS {
                break;
            }
        } else if !parts.is_empty() {
            // Only adjacent units; "1 day 30 seconds" reads as noise
            break;
        }
    }

    parts.join(" ")
}
