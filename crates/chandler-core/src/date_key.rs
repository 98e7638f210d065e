//! Sort keys for the "Created Date" text of listed orders.
//!
//! The platform renders date columns as display text, not a timestamp, so
//! ordering depends on parsing that text back. Recognised forms:
//!
//! - `2026-02-14 18:30:05` and `2026-02-14 18:30` (date column with time)
//! - RFC 3339, e.g. `2026-02-14T18:30:05Z`
//! - `2026-02-14` (date only, treated as midnight)
//!
//! Anything else has no key and sorts after every dated record.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::order::OrderRecord;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a rendered date into a comparable key.
pub fn date_key(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Most recent first. Undated records keep their relative order at the end.
pub fn sort_by_last_update_desc(records: &mut [OrderRecord]) {
    records.sort_by(|a, b| {
        match (date_key(&a.last_update_date), date_key(&b.last_update_date)) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
