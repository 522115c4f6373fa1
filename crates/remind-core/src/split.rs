//! Splitting a recurring series into two independent series.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::date;
use crate::error::CoreError;
use crate::models::{Series, SplitEdits, SplitOutcome};

/// Splits `series` at the occurrence identified by `pivot_original_key`.
///
/// The pivot key is the occurrence's pre-edit scheduled date; a pivot that
/// has been dragged elsewhere still splits at its original position.
///
/// # Behavior
/// - Pivot at the anchor: no split is needed. The edits are applied in
///   place and the series keeps its id.
/// - Otherwise the original series' rule is terminated the calendar day
///   before the pivot, and a continuation series is created with a fresh id,
///   all override tables reset (those records belong to the bounded-off
///   original), the original's pre-split rule end date if one existed, and
///   its start fields taken from `edits`.
///
/// Both resulting series must be persisted together; see
/// [`crate::store::ReminderStore::save_split`].
///
/// # Errors
/// `CoreError::NotRecurring` when the series has no enabled rule.
pub fn split_series(
    series: &Series,
    pivot_original_key: NaiveDate,
    edits: SplitEdits,
) -> Result<SplitOutcome, CoreError> {
    let rule = series
        .active_rule()
        .ok_or_else(|| CoreError::NotRecurring(series.id.to_string()))?;
    let now = Utc::now();

    if pivot_original_key == series.date {
        let mut edited = series.clone();
        edited.date = edits.date;
        edited.time = edits.time;
        edited.end_date = edits.end_date;
        edited.end_time = edits.end_time;
        edited.updated_at = now;
        return Ok(SplitOutcome::EditedInPlace(edited));
    }

    let boundary = date::add_days(pivot_original_key, -1).ok_or_else(|| {
        CoreError::InvalidInput(format!("cannot bound series before {pivot_original_key}"))
    })?;
    let pre_split_end = rule.end_date;

    let mut bounded_rule = rule.clone();
    bounded_rule.end_date = Some(boundary);
    let mut original = series.clone();
    original.repeat = Some(bounded_rule);
    original.updated_at = now;

    let mut continuation_rule = rule.clone();
    // A user-set series termination survives the split; the boundary we just
    // introduced does not carry over.
    continuation_rule.end_date = pre_split_end;
    continuation_rule.exclude_dates.clear();
    continuation_rule.deleted_instances.clear();
    continuation_rule.instance_modifications.clear();
    continuation_rule.completed_instances.clear();
    continuation_rule.completed_times.clear();

    let continuation = Series {
        id: Uuid::now_v7(),
        title: series.title.clone(),
        note: series.note.clone(),
        priority: series.priority,
        date: edits.date,
        time: edits.time,
        end_date: edits.end_date,
        end_time: edits.end_time,
        repeat: Some(continuation_rule),
        completed: false,
        completed_at: None,
        created_at: now,
        updated_at: now,
    };

    Ok(SplitOutcome::Split {
        original,
        continuation,
    })
}
