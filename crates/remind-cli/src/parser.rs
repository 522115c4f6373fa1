use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use chrono_english::{parse_date_string, Dialect};
use remind_core::date;

/// Parses a local calendar date: `YYYY-MM-DD` first, natural language
/// ("tomorrow", "next friday") as a fallback.
pub fn parse_local_date(date_str: &str) -> Result<NaiveDate> {
    if let Ok(parsed) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(parsed);
    }
    parse_date_string(date_str, Local::now(), Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}

/// Parses an `HH:MM` wall-clock time.
pub fn parse_clock_time(time_str: &str) -> Result<NaiveTime> {
    date::parse_time(time_str)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse time '{}', expected HH:MM", time_str))
}
