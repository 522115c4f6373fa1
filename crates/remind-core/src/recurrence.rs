use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::date;
use crate::error::CoreError;
use crate::lunar::LunarCalendar;
use crate::models::{Instance, InstanceKey, RawOccurrence, RepeatKind, RepeatRule, Series};

/// Default hard bound on instances emitted by a single expansion. Guards
/// against unbounded loops for short-interval rules over huge windows.
pub const DEFAULT_MAX_INSTANCES: usize = 100;

/// Forward-scan bound for custom rules. A custom rule whose component sets
/// never match (e.g. month day 31 in a months set of {2}) terminates here
/// instead of spinning.
const CUSTOM_SCAN_LIMIT_DAYS: i64 = 1462;

/// Computes the next occurrence date strictly after `from`.
///
/// `anchor` is the series anchor; `from` is the previous occurrence (the
/// expansion cursor). The step-based kinds re-anchor from `from`, so monthly
/// and yearly clamping is evaluated per step: a series anchored Jan 31 runs
/// Jan 31, Feb 29, Mar 29 rather than drifting back to the 31st.
///
/// Returns `None` when the rule is exhausted or unable to advance: a zero
/// interval, a lunar rule missing its target day, an ebbinghaus pattern past
/// its last offset, or a custom rule with no match inside the scan bound.
pub fn next_occurrence(
    rule: &RepeatRule,
    anchor: NaiveDate,
    from: NaiveDate,
    lunar: &dyn LunarCalendar,
) -> Option<NaiveDate> {
    if rule.interval == 0 {
        return None;
    }
    match rule.kind {
        RepeatKind::Daily => date::add_days(from, rule.interval as i64),
        RepeatKind::Weekly => date::add_days(from, 7 * rule.interval as i64),
        RepeatKind::Monthly => date::add_months_clamped(from, rule.interval as i32),
        RepeatKind::Yearly => date::add_years_clamped(from, rule.interval as i32),
        RepeatKind::LunarMonthly => {
            let day = rule.lunar_day?;
            let reference = date::add_days(from, 1)?;
            // A failed conversion falls back to the reference day; callers
            // re-check every occurrence against the window.
            Some(lunar.next_monthly_match(reference, day).unwrap_or(reference))
        }
        RepeatKind::LunarYearly => {
            let month = rule.lunar_month?;
            let day = rule.lunar_day?;
            let reference = date::add_days(from, 1)?;
            Some(
                lunar
                    .next_yearly_match(reference, month, day)
                    .unwrap_or(reference),
            )
        }
        RepeatKind::Custom => next_custom_match(rule, from),
        RepeatKind::Ebbinghaus => rule
            .ebbinghaus_offsets()
            .iter()
            .filter_map(|&offset| date::add_days(anchor, offset as i64))
            .find(|&candidate| candidate > from),
    }
}

/// Whether the anchor date itself is an occurrence of the rule.
///
/// The step-based kinds always start at the anchor. The scan-based kinds
/// (custom, lunar) only include it when it matches their predicate, and an
/// ebbinghaus anchor is a study date, not a review date, unless the pattern
/// explicitly contains offset zero.
fn anchor_matches(rule: &RepeatRule, anchor: NaiveDate, lunar: &dyn LunarCalendar) -> bool {
    match rule.kind {
        RepeatKind::Daily | RepeatKind::Weekly | RepeatKind::Monthly | RepeatKind::Yearly => true,
        RepeatKind::Custom => custom_matches(rule, anchor),
        RepeatKind::Ebbinghaus => rule.ebbinghaus_offsets().contains(&0),
        RepeatKind::LunarMonthly => match (rule.lunar_day, lunar.solar_to_lunar(anchor)) {
            (Some(day), Some(value)) => value.day == day,
            _ => false,
        },
        RepeatKind::LunarYearly => {
            match (rule.lunar_month, rule.lunar_day, lunar.solar_to_lunar(anchor)) {
                (Some(month), Some(day), Some(value)) => {
                    !value.is_leap_month && value.month == month && value.day == day
                }
                _ => false,
            }
        }
    }
}

/// Whether `candidate` satisfies every non-empty component set of a custom
/// rule. With all sets empty the rule degenerates to daily.
fn custom_matches(rule: &RepeatRule, candidate: NaiveDate) -> bool {
    if !rule.week_days.is_empty() {
        let weekday = candidate.weekday().num_days_from_sunday() as u8;
        if !rule.week_days.contains(&weekday) {
            return false;
        }
    }
    if !rule.month_days.is_empty() && !rule.month_days.contains(&(candidate.day() as u8)) {
        return false;
    }
    if !rule.months.is_empty() && !rule.months.contains(&(candidate.month() as u8)) {
        return false;
    }
    true
}

fn next_custom_match(rule: &RepeatRule, from: NaiveDate) -> Option<NaiveDate> {
    let mut cursor = date::add_days(from, 1)?;
    for _ in 0..CUSTOM_SCAN_LIMIT_DAYS {
        if custom_matches(rule, cursor) {
            return Some(cursor);
        }
        cursor = cursor.succ_opt()?;
    }
    None
}

/// Recurrence engine for one series: expansion, override resolution, and the
/// combined window query.
///
/// Holds no cross-call cache; repeated calls with the same inputs recompute
/// from scratch.
pub struct RecurrenceEngine<'a> {
    series: &'a Series,
    rule: &'a RepeatRule,
    lunar: &'a dyn LunarCalendar,
}

impl<'a> RecurrenceEngine<'a> {
    /// Builds an engine over a recurring series.
    ///
    /// # Errors
    /// `CoreError::NotRecurring` when the series has no enabled rule; plain
    /// one-shot reminders are not handled by this engine.
    pub fn new(series: &'a Series, lunar: &'a dyn LunarCalendar) -> Result<Self, CoreError> {
        let rule = series
            .active_rule()
            .ok_or_else(|| CoreError::NotRecurring(series.id.to_string()))?;
        Ok(Self {
            series,
            rule,
            lunar,
        })
    }

    pub fn series(&self) -> &Series {
        self.series
    }

    pub fn rule(&self) -> &RepeatRule {
        self.rule
    }

    /// Generates the ordered raw occurrences inside `[window_start,
    /// window_end]`.
    ///
    /// # Behavior
    /// - Starts from the series anchor and re-anchors each step from the
    ///   previous occurrence.
    /// - Re-applies the series' multi-day span and time-of-day pair to every
    ///   occurrence.
    /// - Stops past `window_end`, past the rule's inclusive end date, after
    ///   `max_instances` emissions, or when the rule is exhausted.
    /// - Skips occurrences whose key sits in either exclusion table, still
    ///   advancing the cursor past them; skipped occurrences do not count
    ///   against `max_instances`.
    pub fn expand(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
        max_instances: usize,
    ) -> Vec<RawOccurrence> {
        let mut occurrences = Vec::new();
        if window_end < window_start || max_instances == 0 {
            return occurrences;
        }

        let anchor = self.series.date;
        let mut cursor = if anchor_matches(self.rule, anchor, self.lunar) {
            Some(anchor)
        } else {
            next_occurrence(self.rule, anchor, anchor, self.lunar)
        };

        while let Some(current) = cursor {
            if current > window_end || self.rule.is_ended_at(current) {
                break;
            }
            if current >= window_start && !self.rule.is_excluded(current) {
                occurrences.push(self.raw_occurrence(current));
                if occurrences.len() >= max_instances {
                    tracing::debug!(
                        series_id = %self.series.id,
                        max_instances,
                        "expansion truncated at instance cap"
                    );
                    break;
                }
            }
            cursor = next_occurrence(self.rule, anchor, current, self.lunar)
                .filter(|next| *next > current);
        }

        occurrences
    }

    /// Merges a raw occurrence with the override tables into a displayable
    /// instance. Pure and idempotent: resolving twice against an unchanged
    /// series yields identical output.
    pub fn resolve(&self, raw: &RawOccurrence) -> Instance {
        let modification = self.rule.instance_modifications.get(&raw.original_key);

        let effective_date = modification.and_then(|m| m.date).unwrap_or(raw.date);
        // A moved occurrence keeps the series' day span unless the edit set
        // an explicit end date.
        let effective_end = modification.and_then(|m| m.end_date).or_else(|| {
            self.series
                .span_days()
                .and_then(|span| date::add_days(effective_date, span))
        });

        Instance {
            key: InstanceKey {
                series_id: self.series.id,
                original_key: raw.original_key,
            },
            title: modification
                .and_then(|m| m.title.clone())
                .unwrap_or_else(|| self.series.title.clone()),
            date: effective_date,
            end_date: effective_end,
            time: modification.and_then(|m| m.time).or(raw.time),
            end_time: modification.and_then(|m| m.end_time).or(raw.end_time),
            note: modification
                .and_then(|m| m.note.clone())
                .or_else(|| self.series.note.clone()),
            priority: modification
                .and_then(|m| m.priority)
                .unwrap_or(self.series.priority),
            notified: modification.and_then(|m| m.notified).unwrap_or(false),
            completed: self.rule.is_completed(raw.original_key),
            completed_at: self.rule.completed_times.get(&raw.original_key).copied(),
        }
    }

    /// The full window query: rule-based expansion, overlays, and the
    /// edited-into-window sweep, ordered by effective date and time.
    ///
    /// An occurrence dragged into the window keeps showing up here even
    /// though the underlying rule never scheduled it there; an occurrence
    /// dragged out stops being in-window by its effective date and is left
    /// to the window it moved into. No original key is resolved twice.
    pub fn instances_between(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
        max_instances: usize,
    ) -> Vec<Instance> {
        let raws = self.expand(window_start, window_end, max_instances);
        let mut seen: BTreeSet<NaiveDate> = raws.iter().map(|r| r.original_key).collect();
        let mut instances: Vec<Instance> = raws.iter().map(|raw| self.resolve(raw)).collect();

        for (key, modification) in &self.rule.instance_modifications {
            if seen.contains(key) || self.rule.is_excluded(*key) {
                continue;
            }
            let effective = modification.date.unwrap_or(*key);
            if effective < window_start || effective > window_end {
                continue;
            }
            let raw = self.raw_occurrence(*key);
            instances.push(self.resolve(&raw));
            seen.insert(*key);
        }

        instances.sort_by(|a, b| {
            (a.date, a.time, a.key.original_key).cmp(&(b.date, b.time, b.key.original_key))
        });
        instances
    }

    fn raw_occurrence(&self, key: NaiveDate) -> RawOccurrence {
        RawOccurrence {
            original_key: key,
            date: key,
            end_date: self
                .series
                .span_days()
                .and_then(|span| date::add_days(key, span)),
            time: self.series.time,
            end_time: self.series.end_time,
        }
    }
}
