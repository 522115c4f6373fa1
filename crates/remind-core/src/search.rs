//! Bounded search for the next actionable occurrence of a sparse rule.

use chrono::NaiveDate;

use crate::date;
use crate::error::CoreError;
use crate::lunar::LunarCalendar;
use crate::models::{RawOccurrence, RepeatKind, Series};
use crate::recurrence::RecurrenceEngine;

/// Widening-retry attempts before the search gives up.
const MAX_ATTEMPTS: u32 = 5;

/// Result of a future-occurrence search.
///
/// `exhausted` is a valid terminal state, not an error: a fully completed
/// finite series simply has no future-uncompleted occurrence within the
/// search bound, and callers must tolerate that.
#[derive(Debug, Clone)]
pub struct FutureScan {
    /// The last window expansion computed by the search.
    pub occurrences: Vec<RawOccurrence>,
    /// True when no future-uncompleted occurrence was found within the
    /// attempt bound.
    pub exhausted: bool,
}

/// Expands widening windows around `today` until the expansion contains at
/// least one occurrence that lies strictly in the future and is not marked
/// completed.
///
/// Sparse rules get a longer initial look-ahead: 3 months for monthly, 14
/// for yearly and the lunar kinds, 2 otherwise. Each miss widens the window
/// by 6 months (12 for yearly/lunar), up to 5 expansions total.
///
/// # Errors
/// `CoreError::NotRecurring` when the series has no enabled rule.
pub fn find_future_uncompleted(
    series: &Series,
    today: NaiveDate,
    lunar: &dyn LunarCalendar,
) -> Result<FutureScan, CoreError> {
    let engine = RecurrenceEngine::new(series, lunar)?;
    let rule = engine.rule();

    let sparse = matches!(
        rule.kind,
        RepeatKind::Yearly | RepeatKind::LunarMonthly | RepeatKind::LunarYearly
    );
    let mut window_months: i32 = match rule.kind {
        RepeatKind::Monthly => 3,
        _ if sparse => 14,
        _ => 2,
    };

    let mut occurrences = Vec::new();
    for attempt in 0..MAX_ATTEMPTS {
        let Some((window_start, window_end)) = search_window(today, window_months) else {
            break;
        };
        let max_instances = (window_months as usize).saturating_mul(50);
        occurrences = engine.expand(window_start, window_end, max_instances);

        let found = occurrences.iter().any(|occ| {
            let effective = rule
                .instance_modifications
                .get(&occ.original_key)
                .and_then(|m| m.date)
                .unwrap_or(occ.date);
            effective > today && !rule.is_completed(occ.original_key)
        });
        if found {
            return Ok(FutureScan {
                occurrences,
                exhausted: false,
            });
        }

        tracing::debug!(
            series_id = %series.id,
            attempt,
            window_months,
            "no future-uncompleted occurrence, widening window"
        );
        window_months += if sparse { 12 } else { 6 };
    }

    Ok(FutureScan {
        occurrences,
        exhausted: true,
    })
}

/// `[first day of last month, last day of the month `months` ahead)`.
fn search_window(today: NaiveDate, months: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = date::first_of_month(date::add_months_clamped(today, -1)?);
    let end = date::first_of_month(date::add_months_clamped(today, months)?).pred_opt()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunar::TableLunarCalendar;
    use crate::models::{RepeatRule, Series};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn yearly_series(anchor: NaiveDate) -> Series {
        Series {
            title: "Renew insurance".to_string(),
            date: anchor,
            repeat: Some(RepeatRule::new(RepeatKind::Yearly)),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_window_shape() {
        let (start, end) = search_window(date(2025, 6, 15), 2).unwrap();
        assert_eq!(start, date(2025, 5, 1));
        assert_eq!(end, date(2025, 7, 31));
    }

    #[test]
    fn test_finds_near_future_occurrence() {
        let series = Series {
            date: date(2025, 6, 1),
            repeat: Some(RepeatRule::new(RepeatKind::Daily)),
            title: "Stretch".to_string(),
            ..Default::default()
        };
        let scan = find_future_uncompleted(&series, date(2025, 6, 10), &TableLunarCalendar).unwrap();
        assert!(!scan.exhausted);
        assert!(scan.occurrences.iter().any(|o| o.date > date(2025, 6, 10)));
    }

    #[test]
    fn test_widens_past_completed_sparse_occurrences() {
        // A yearly rule whose next three occurrences are all done: the
        // 14-month initial window only sees completed instances, so the
        // search must widen until it reaches an uncompleted year.
        let mut series = yearly_series(date(2024, 3, 15));
        {
            let rule = series.repeat.as_mut().unwrap();
            rule.completed_instances.insert(date(2024, 3, 15));
            rule.completed_instances.insert(date(2025, 3, 15));
            rule.completed_instances.insert(date(2026, 3, 15));
        }
        let scan = find_future_uncompleted(&series, date(2025, 2, 1), &TableLunarCalendar).unwrap();
        assert!(!scan.exhausted);
        assert!(scan
            .occurrences
            .iter()
            .any(|o| o.original_key == date(2027, 3, 15)));
    }

    #[test]
    fn test_exhaustion_is_terminal_not_error() {
        // A finite series entirely in the past: every attempt comes up
        // empty and the search reports exhaustion after five rounds.
        let mut series = yearly_series(date(2020, 3, 15));
        series.repeat.as_mut().unwrap().end_date = Some(date(2021, 1, 1));
        let scan = find_future_uncompleted(&series, date(2025, 2, 1), &TableLunarCalendar).unwrap();
        assert!(scan.exhausted);
        assert!(scan.occurrences.is_empty());
    }

    #[test]
    fn test_moved_occurrence_counts_by_effective_date() {
        // The only future occurrence was dragged into the past; it must not
        // satisfy the search. (The rule is finite, so the search exhausts.)
        let mut series = Series {
            date: date(2025, 1, 10),
            repeat: Some(RepeatRule::new(RepeatKind::Monthly)),
            title: "Report".to_string(),
            ..Default::default()
        };
        {
            let rule = series.repeat.as_mut().unwrap();
            rule.end_date = Some(date(2025, 3, 31));
            rule.completed_instances.insert(date(2025, 1, 10));
            rule.completed_instances.insert(date(2025, 2, 10));
            rule.record_modification(
                date(2025, 3, 10),
                crate::models::InstanceOverride {
                    date: Some(date(2025, 2, 20)),
                    ..Default::default()
                },
            );
        }
        let scan = find_future_uncompleted(&series, date(2025, 2, 25), &TableLunarCalendar).unwrap();
        assert!(scan.exhausted);
    }

    #[test]
    fn test_non_recurring_rejected() {
        let series = Series::default();
        assert!(matches!(
            find_future_uncompleted(&series, date(2025, 1, 1), &TableLunarCalendar),
            Err(CoreError::NotRecurring(_))
        ));
    }
}
