//! Record and maintenance lists: search filter plus newest-first ordering.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::Report;

/// Records whose searchable fields contain `term` (case-insensitive), newest
/// first. Records without a readable timestamp go last, in input order.
pub fn filter_and_sort<R: Report>(records: &[R], term: &str) -> Vec<R> {
    let needle = term.to_lowercase();

    let mut matched: Vec<(Option<i64>, &R)> = records
        .iter()
        .filter(|r| {
            needle.is_empty()
                || r.search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .map(|r| (r.created_at().and_then(parse_timestamp), r))
        .collect();

    matched.sort_by(|(a, _), (b, _)| newest_first(*a, *b));
    matched.into_iter().map(|(_, r)| r.clone()).collect()
}

fn newest_first(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Milliseconds since the epoch for the timestamp shapes the gateway emits.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}
