//! Timestamp utilities
//!
//! Show times are naive local wall-clock timestamps. "Upcoming" and "past"
//! are always decided against [`now`] taken once per query.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Accepted input layouts for submitted timestamps, most specific first
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a submitted timestamp (`YYYY-MM-DD HH:MM[:SS]`, `T` separator allowed)
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Plain text rendering used in show history rows
pub fn timestamp_text(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Medium locale-style rendering used by the show listing,
/// e.g. `Tue 05, 21, 2019 9:30PM`
pub fn format_medium(value: &NaiveDateTime) -> String {
    value.format("%a %m, %d, %Y %-I:%M%p").to_string()
}
