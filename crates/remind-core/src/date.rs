//! Local calendar-date arithmetic and wire formats.
//!
//! Every date in the engine is a plain local calendar date; clock times are
//! local wall-clock times at minute precision. Month and year stepping clamp
//! to the last valid day of the target month instead of overflowing into the
//! following month.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Signed number of days from `start` to `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Adds (or subtracts) whole days, failing on calendar overflow.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(chrono::Duration::days(days))
}

/// The last valid day number of the given month.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    // Day 1 of the following month, stepped back one day.
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Steps `date` by whole months, clamping the day-of-month to the target
/// month's length (Jan 31 + 1 month = Feb 28/29).
pub fn add_months_clamped(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = date.year() as i64 * 12 + (date.month() as i64 - 1) + months as i64;
    let year = total.div_euclid(12) as i32;
    let month = (total.rem_euclid(12) + 1) as u32;
    let day = date.day().min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Steps `date` by whole years, clamping Feb 29 to Feb 28 in non-leap
/// target years.
pub fn add_years_clamped(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year() + years;
    let day = date.day().min(last_day_of_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day)
}

/// First calendar day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Maps a wall-clock instant to its logical calendar day.
///
/// Callers with a non-midnight day boundary (e.g. "my day ends at 04:00")
/// treat times before `day_start` as belonging to the previous day. The
/// engine itself never calls this; past/future classification is a caller
/// concern.
pub fn logical_date(now: NaiveDateTime, day_start: NaiveTime) -> NaiveDate {
    if day_start != NaiveTime::MIN && now.time() < day_start {
        add_days(now.date(), -1).unwrap_or_else(|| now.date())
    } else {
        now.date()
    }
}

/// Parses a wall-clock time in `HH:MM` form (seconds tolerated).
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Formats a wall-clock time as `HH:MM`.
pub fn format_time(value: NaiveTime) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

/// Parses a local datetime in `YYYY-MM-DD HH:MM` form (seconds tolerated).
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Formats a local datetime as `YYYY-MM-DD HH:MM`.
pub fn format_local_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Serde codec for optional `YYYY-MM-DD HH:MM` local datetimes.
pub mod local_dt_opt {
    use super::{format_local_datetime, parse_local_datetime};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&format_local_datetime(*dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => parse_local_datetime(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime: {s}"))),
        }
    }
}

/// Serde codec for optional `HH:MM` wall-clock times.
pub mod hhmm_opt {
    use super::{format_time, parse_time};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_str(&format_time(*time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => parse_time(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time: {s}"))),
        }
    }
}
