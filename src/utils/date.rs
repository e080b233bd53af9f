//! Date/time helpers shared by the CSV codec, the store and the CLI.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an ISO-8601 "internet date-time" (`2026-02-07T15:30:00Z`) into UTC.
/// Offsets other than `Z` are accepted and normalised.
pub fn parse_internet_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format as ISO-8601 UTC with second precision and a `Z` suffix.
pub fn format_internet_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Storage form: keeps sub-second precision so durations survive a round trip.
pub fn format_storage_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Elapsed hours from `start` to `end`, at millisecond precision.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

/// Hours with one decimal, rounding half away from zero (68.4667 → "68.5").
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 10.0).round() / 10.0;
    // avoid printing "-0.0" for tiny negative values
    if rounded == 0.0 {
        return "0.0".to_string();
    }
    format!("{:.1}", rounded)
}
