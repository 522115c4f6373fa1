//! Lunar (Chinese lunisolar) calendar collaborator.
//!
//! The recurrence engine only needs two questions answered: "what lunar date
//! does this solar date carry" and "what is the next solar date on or after a
//! reference whose lunar value matches". Both sit behind [`LunarCalendar`] so
//! hosts with their own conversion service can plug it in;
//! [`TableLunarCalendar`] is the built-in provider, covering 1900-2100.

use chrono::NaiveDate;

/// A date in the lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    pub year: i32,
    /// Lunar month number, 1-12. Leap months carry the number of the month
    /// they repeat, with `is_leap_month` set.
    pub month: u8,
    /// Lunar day, 1-30.
    pub day: u8,
    pub is_leap_month: bool,
}

/// Conversion service between solar and lunar calendar values.
pub trait LunarCalendar {
    /// Lunar value of a solar date, or `None` outside the supported range.
    fn solar_to_lunar(&self, date: NaiveDate) -> Option<LunarDate>;

    /// Next solar date on or after `on_or_after` that falls on the given
    /// lunar day, in any month. Lunar months without the target day (a
    /// 29-day month has no day 30) are skipped naturally.
    fn next_monthly_match(&self, on_or_after: NaiveDate, lunar_day: u8) -> Option<NaiveDate> {
        scan_for_match(on_or_after, MONTHLY_SCAN_DAYS, |lunar| lunar.day == lunar_day, self)
    }

    /// Next solar date on or after `on_or_after` that falls on the given
    /// lunar month and day. Leap months do not match.
    fn next_yearly_match(
        &self,
        on_or_after: NaiveDate,
        lunar_month: u8,
        lunar_day: u8,
    ) -> Option<NaiveDate> {
        scan_for_match(
            on_or_after,
            YEARLY_SCAN_DAYS,
            |lunar| !lunar.is_leap_month && lunar.month == lunar_month && lunar.day == lunar_day,
            self,
        )
    }
}

// Two lunar months; enough to skip one short month without the target day.
const MONTHLY_SCAN_DAYS: u32 = 100;
// Three lunar years; a month/day pair absent this year and next (day 30 of a
// month that comes up short twice) is still found.
const YEARLY_SCAN_DAYS: u32 = 1130;

fn scan_for_match<C: LunarCalendar + ?Sized>(
    on_or_after: NaiveDate,
    limit: u32,
    matches: impl Fn(&LunarDate) -> bool,
    calendar: &C,
) -> Option<NaiveDate> {
    let mut cursor = on_or_after;
    for _ in 0..limit {
        let lunar = calendar.solar_to_lunar(cursor)?;
        if matches(&lunar) {
            return Some(cursor);
        }
        cursor = cursor.succ_opt()?;
    }
    None
}

/// Table-driven lunisolar conversion for 1900-2100.
///
/// Each year's entry encodes the twelve month lengths (bits 15..4, set bit =
/// 30 days), the leap month number (low nibble, 0 = none) and the leap month
/// length (bit 16, set = 30 days). Solar 1900-01-31 is lunar 1900-01-01.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLunarCalendar;

const FIRST_YEAR: i32 = 1900;
const LAST_YEAR: i32 = 2100;

#[rustfmt::skip]
const LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900-1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910-1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920-1929
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930-1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940-1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1990-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040-2049
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050-2059
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060-2069
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070-2079
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080-2089
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090-2099
    0x0d520,                                                                                   // 2100
];

fn year_info(year: i32) -> Option<u32> {
    if (FIRST_YEAR..=LAST_YEAR).contains(&year) {
        Some(LUNAR_INFO[(year - FIRST_YEAR) as usize])
    } else {
        None
    }
}

/// Leap month number of a lunar year, 0 when there is none.
fn leap_month(year: i32) -> u32 {
    year_info(year).map(|info| info & 0xf).unwrap_or(0)
}

/// Length of the leap month, 0 when the year has none.
fn leap_month_days(year: i32) -> u32 {
    match year_info(year) {
        Some(info) if info & 0xf != 0 => {
            if info & 0x10000 != 0 {
                30
            } else {
                29
            }
        }
        _ => 0,
    }
}

/// Length of a regular lunar month (1-12).
fn regular_month_days(year: i32, month: u32) -> u32 {
    match year_info(year) {
        Some(info) if info & (0x10000 >> month) != 0 => 30,
        Some(_) => 29,
        None => 0,
    }
}

/// Total days in a lunar year, leap month included.
fn lunar_year_days(year: i32) -> u32 {
    let mut days = leap_month_days(year);
    for month in 1..=12 {
        days += regular_month_days(year, month);
    }
    days
}

impl LunarCalendar for TableLunarCalendar {
    fn solar_to_lunar(&self, date: NaiveDate) -> Option<LunarDate> {
        let base = NaiveDate::from_ymd_opt(FIRST_YEAR, 1, 31)?;
        let mut offset = date.signed_duration_since(base).num_days();
        if offset < 0 {
            return None;
        }

        let mut year = FIRST_YEAR;
        loop {
            let days = lunar_year_days(year) as i64;
            if days == 0 {
                return None; // ran past the table
            }
            if offset < days {
                break;
            }
            offset -= days;
            year += 1;
        }

        let leap = leap_month(year);
        for month in 1..=12u32 {
            let days = regular_month_days(year, month) as i64;
            if offset < days {
                return Some(LunarDate {
                    year,
                    month: month as u8,
                    day: (offset + 1) as u8,
                    is_leap_month: false,
                });
            }
            offset -= days;

            // The leap month repeats its host month's number and follows it.
            if month == leap {
                let days = leap_month_days(year) as i64;
                if offset < days {
                    return Some(LunarDate {
                        year,
                        month: month as u8,
                        day: (offset + 1) as u8,
                        is_leap_month: true,
                    });
                }
                offset -= days;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lunar(date: NaiveDate) -> LunarDate {
        TableLunarCalendar.solar_to_lunar(date).unwrap()
    }

    #[test]
    fn test_new_year_boundaries() {
        // Spring Festival dates are fixed historical facts.
        let new_year = lunar(date(2024, 2, 10));
        assert_eq!((new_year.month, new_year.day), (1, 1));
        assert!(!new_year.is_leap_month);
        assert_eq!(new_year.year, 2024);

        let eve = lunar(date(2025, 1, 28));
        assert_eq!((eve.month, eve.day), (12, 29));
        assert_eq!(eve.year, 2024);

        let next = lunar(date(2025, 1, 29));
        assert_eq!((next.month, next.day), (1, 1));
        assert_eq!(next.year, 2025);
    }

    #[test]
    fn test_mid_autumn_festival() {
        let mid_autumn = lunar(date(2024, 9, 17));
        assert_eq!((mid_autumn.month, mid_autumn.day), (8, 15));
        assert!(!mid_autumn.is_leap_month);
    }

    #[test]
    fn test_leap_month_2025() {
        // 2025 repeats its sixth month; the leap month starts July 25.
        let first = lunar(date(2025, 7, 25));
        assert_eq!((first.month, first.day), (6, 1));
        assert!(first.is_leap_month);

        let day_before = lunar(date(2025, 7, 24));
        assert!(!day_before.is_leap_month);
        assert_eq!(day_before.month, 6);
    }

    #[test]
    fn test_out_of_range() {
        assert!(TableLunarCalendar.solar_to_lunar(date(1899, 6, 1)).is_none());
        assert!(TableLunarCalendar.solar_to_lunar(date(2150, 1, 1)).is_none());
    }

    #[test]
    fn test_next_monthly_match() {
        // Lunar day 15 around the 2024 Mid-Autumn window.
        let calendar = TableLunarCalendar;
        assert_eq!(
            calendar.next_monthly_match(date(2024, 9, 10), 15),
            Some(date(2024, 9, 17))
        );
        // On the match itself.
        assert_eq!(
            calendar.next_monthly_match(date(2024, 9, 17), 15),
            Some(date(2024, 9, 17))
        );
        // Day after: the eighth month has 30 days, so 9/15 lands 30 days on.
        assert_eq!(
            calendar.next_monthly_match(date(2024, 9, 18), 15),
            Some(date(2024, 10, 17))
        );
    }

    #[test]
    fn test_next_yearly_match() {
        let calendar = TableLunarCalendar;
        // Mid-Autumn 2025 falls on October 6.
        assert_eq!(
            calendar.next_yearly_match(date(2024, 10, 1), 8, 15),
            Some(date(2025, 10, 6))
        );
        assert_eq!(
            calendar.next_yearly_match(date(2024, 9, 1), 8, 15),
            Some(date(2024, 9, 17))
        );
    }

    #[test]
    fn test_yearly_match_skips_leap_month() {
        let calendar = TableLunarCalendar;
        // 2025 has a leap sixth month; 6/1 must resolve to the regular sixth
        // month (June 25), not the leap one (July 25).
        let found = calendar.next_yearly_match(date(2025, 2, 1), 6, 1).unwrap();
        let lunar = calendar.solar_to_lunar(found).unwrap();
        assert_eq!((lunar.month, lunar.day), (6, 1));
        assert!(!lunar.is_leap_month);
        assert!(found < date(2025, 7, 25));
    }
}
