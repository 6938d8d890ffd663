//! Arrival records and the selection pipeline: timestamp normalization,
//! expected-over-aimed resolution, and the upcoming-departures cut.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Upper bound on how many departures one run displays.
pub const MAX_SHOWN: usize = 5;

/// One arrival as returned by the stop endpoint. Every field is optional:
/// the feed omits whatever it does not know, and absence is data, not an
/// error. Timestamps stay raw text here so one malformed value cannot fail
/// the whole response decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArrivalRecord {
    pub destination: Option<String>,
    pub status: Option<String>,
    pub stops_to_destination: Option<u32>,
    pub expected_arrival: Option<String>,
    pub aimed_arrival: Option<String>,
}

/// An arrival paired with its best-known instant, always timezone-aware.
#[derive(Debug, Clone)]
pub struct ResolvedArrival {
    pub arrival: DateTime<FixedOffset>,
    pub record: ArrivalRecord,
}

/// Parse a loosely ISO-8601 timestamp into a timezone-aware instant.
///
/// A trailing `Z` is rewritten to an explicit `+00:00` offset first; the
/// RFC 3339 parser then rejects anything without an offset, so a successful
/// parse is always timezone-aware. Absent, empty, or malformed input yields
/// `None` — bad timestamps are dropped per record, never escalated.
pub fn parse_arrival_time(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    let explicit = match raw.strip_suffix('Z') {
        Some(prefix) => format!("{prefix}+00:00"),
        None => raw.to_string(),
    };
    DateTime::parse_from_rfc3339(&explicit).ok()
}

/// Best-known arrival instant for a record: the live estimate when present,
/// otherwise the scheduled time, otherwise nothing.
pub fn resolve_arrival(record: &ArrivalRecord) -> Option<DateTime<FixedOffset>> {
    parse_arrival_time(record.expected_arrival.as_deref())
        .or_else(|| parse_arrival_time(record.aimed_arrival.as_deref()))
}

/// Keep the records still ahead of `now`, soonest first, at most
/// [`MAX_SHOWN`]. The sort is stable, so simultaneous arrivals keep their
/// feed order.
pub fn select_upcoming(
    records: Vec<ArrivalRecord>,
    now: DateTime<FixedOffset>,
) -> Vec<ResolvedArrival> {
    let mut upcoming: Vec<ResolvedArrival> = records
        .into_iter()
        .filter_map(|record| {
            resolve_arrival(&record).map(|arrival| ResolvedArrival { arrival, record })
        })
        .filter(|resolved| resolved.arrival >= now)
        .collect();
    upcoming.sort_by_key(|resolved| resolved.arrival);
    upcoming.truncate(MAX_SHOWN);
    upcoming
}
