//! Date and time utility functions
//!
//! Timestamps arrive from the backend as RFC 3339 / ISO 8601 strings. This module
//! turns them into compact table text, human-readable "last synced" labels, and
//! the ISO dates used in date-range filters and export file names.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Weekday};

/// ISO calendar date format used by the backend filters and export names
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for timestamp cells in the data table
pub const TABLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, ISO_DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(ISO_DATE_FORMAT).to_string()
}

/// Format current local date to YYYY-MM-DD string
pub fn format_today() -> String {
    format_ymd(Local::now().date_naive())
}

/// Parse a backend timestamp into local time.
///
/// Accepts RFC 3339 (`2025-01-15T14:30:00Z`), naive ISO 8601
/// (`2025-01-15T14:30:00`, optionally with fractional seconds) and
/// space-separated (`2025-01-15 14:30:00`) forms.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| {
            Local
                .from_local_datetime(&naive)
                .single()
                .unwrap_or_else(|| Local.from_utc_datetime(&naive))
        })
}

/// Format a timestamp for a table cell. Unparseable input is returned verbatim.
pub fn format_timestamp(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format(TABLE_TIMESTAMP_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Format a date relative to `today` ("today", "yesterday", "last Monday", "Jan 15").
pub fn format_human_date_from(input_date: NaiveDate, today: NaiveDate) -> String {
    let days_diff = (input_date - today).num_days();

    match days_diff {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if (-7..-1).contains(&diff) => format!("last {}", weekday_name(input_date.weekday())),
        diff if (-30..-7).contains(&diff) => format!("{} days ago", -diff),
        _ => {
            if input_date.year() == today.year() {
                input_date.format("%b %d").to_string()
            } else {
                input_date.format("%b %d, %Y").to_string()
            }
        }
    }
}

/// Human-readable "last synced" label, e.g. `today at 14:30`.
pub fn format_last_synced(value: &str) -> String {
    match parse_timestamp(value) {
        Some(local_dt) => {
            let human_date = format_human_date_from(local_dt.date_naive(), Local::now().date_naive());
            format!("{} at {}", human_date, local_dt.format("%H:%M"))
        }
        None => value.to_string(),
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
