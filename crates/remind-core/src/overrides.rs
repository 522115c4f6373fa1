//! Mutation operations on the per-occurrence override tables.
//!
//! Every write is keyed by the occurrence's original key — the date it would
//! carry under pure rule-based expansion. Repeated edits to the same logical
//! occurrence therefore overwrite one entry instead of accumulating a chain
//! of entries under its successive display dates.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{InstanceOverride, RepeatRule};

impl RepeatRule {
    /// Records (or overwrites) the modification entry for one occurrence.
    ///
    /// When the edit moves the display date, stale entries left by earlier
    /// edit chains — entries under a different key whose stored date points
    /// at the new display date — are removed, so the table never holds two
    /// entries describing the same displayed occurrence.
    pub fn record_modification(&mut self, original_key: NaiveDate, changes: InstanceOverride) {
        if let Some(new_date) = changes.date {
            if new_date != original_key {
                let stale: Vec<NaiveDate> = self
                    .instance_modifications
                    .iter()
                    .filter(|(key, existing)| {
                        **key != original_key && existing.date == Some(new_date)
                    })
                    .map(|(key, _)| *key)
                    .collect();
                for key in stale {
                    tracing::debug!(%key, %new_date, "dropping superseded modification entry");
                    self.instance_modifications.remove(&key);
                }
            }
        }
        self.instance_modifications.insert(original_key, changes);
    }

    /// Marks one occurrence done, recording when.
    pub fn set_completed(&mut self, key: NaiveDate, at: NaiveDateTime) {
        self.completed_instances.insert(key);
        self.completed_times.insert(key, at);
    }

    /// Reopens a completed occurrence.
    pub fn clear_completed(&mut self, key: NaiveDate) {
        self.completed_instances.remove(&key);
        self.completed_times.remove(&key);
    }

    /// Deletes one occurrence: hides it from every future expansion and
    /// scrubs its completion and modification records.
    pub fn remove_instance(&mut self, key: NaiveDate) {
        self.deleted_instances.insert(key);
        self.completed_instances.remove(&key);
        self.completed_times.remove(&key);
        self.instance_modifications.remove(&key);
    }

    /// Excludes one occurrence without touching its other records.
    pub fn exclude_instance(&mut self, key: NaiveDate) {
        self.exclude_dates.insert(key);
    }
}
