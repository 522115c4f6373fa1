//! Whole-document JSON persistence for the series collection.
//!
//! Load everything, mutate in memory, save everything; no field-level
//! locking. Callers serialize logically related mutations through a single
//! execution context. Saves go through a temp file and rename, so readers
//! never observe a torn document.

use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{Series, SplitOutcome};

/// The in-memory form of the persisted document: series id → record.
pub type SeriesMap = BTreeMap<Uuid, Series>;

pub struct ReminderStore {
    path: PathBuf,
}

impl ReminderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole document. A missing or empty file is an empty
    /// collection, not an error.
    ///
    /// Records that fail to decode are dropped with a warning so one corrupt
    /// series cannot take the rest of the collection down with it.
    pub fn load(&self) -> Result<SeriesMap, CoreError> {
        if !self.path.exists() {
            return Ok(SeriesMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(SeriesMap::new());
        }

        let document: BTreeMap<String, serde_json::Value> = serde_json::from_str(&raw)?;
        let mut map = SeriesMap::new();
        for (key, value) in document {
            let Ok(id) = key.parse::<Uuid>() else {
                tracing::warn!(key = %key, "skipping series record with malformed id key");
                continue;
            };
            match serde_json::from_value::<Series>(value) {
                Ok(series) => {
                    if series.id != id {
                        tracing::warn!(
                            key = %id,
                            record_id = %series.id,
                            "series record id disagrees with its document key; using the key"
                        );
                    }
                    let mut series = series;
                    series.id = id;
                    map.insert(id, series);
                }
                Err(err) => {
                    tracing::warn!(key = %id, error = %err, "skipping undecodable series record");
                }
            }
        }
        Ok(map)
    }

    /// Saves the whole document atomically.
    pub fn save(&self, map: &SeriesMap) -> Result<(), CoreError> {
        let document: BTreeMap<String, &Series> =
            map.iter().map(|(id, s)| (id.to_string(), s)).collect();
        let contents = serde_json::to_string_pretty(&document)?;
        self.atomic_write(&contents)
    }

    /// Inserts or replaces one series.
    pub fn insert(&self, series: Series) -> Result<(), CoreError> {
        let mut map = self.load()?;
        map.insert(series.id, series);
        self.save(&map)
    }

    pub fn find(&self, id: Uuid) -> Result<Option<Series>, CoreError> {
        Ok(self.load()?.remove(&id))
    }

    /// Loads, applies `apply` to one series, and saves.
    ///
    /// # Errors
    /// `CoreError::NotFound` when the series vanished between the caller's
    /// read and this write (e.g. deleted concurrently); the caller must
    /// surface the failure rather than silently dropping the edit.
    pub fn update<F>(&self, id: Uuid, apply: F) -> Result<Series, CoreError>
    where
        F: FnOnce(&mut Series),
    {
        let mut map = self.load()?;
        let series = map
            .get_mut(&id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        apply(series);
        series.updated_at = Utc::now();
        let snapshot = series.clone();
        self.save(&map)?;
        Ok(snapshot)
    }

    /// Removes one series and all of its override tables with it.
    pub fn remove(&self, id: Uuid) -> Result<Series, CoreError> {
        let mut map = self.load()?;
        let removed = map
            .remove(&id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        self.save(&map)?;
        Ok(removed)
    }

    /// Persists a split outcome in one document write. A split must never be
    /// half-applied: either both series land or neither does.
    ///
    /// # Errors
    /// `CoreError::NotFound` when the series being split no longer exists.
    pub fn save_split(&self, outcome: &SplitOutcome) -> Result<(), CoreError> {
        let mut map = self.load()?;
        match outcome {
            SplitOutcome::EditedInPlace(series) => {
                if !map.contains_key(&series.id) {
                    return Err(CoreError::NotFound(series.id.to_string()));
                }
                map.insert(series.id, series.clone());
            }
            SplitOutcome::Split {
                original,
                continuation,
            } => {
                if !map.contains_key(&original.id) {
                    return Err(CoreError::NotFound(original.id.to_string()));
                }
                map.insert(original.id, original.clone());
                map.insert(continuation.id, continuation.clone());
            }
        }
        self.save(&map)
    }

    fn atomic_write(&self, contents: &str) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Resolves a short id prefix against the loaded collection.
///
/// # Errors
/// - `InvalidInput` for prefixes shorter than 2 characters.
/// - `NotFound` when nothing matches.
/// - `AmbiguousId` listing the candidates when several match.
pub fn resolve_series_id(map: &SeriesMap, short_id: &str) -> Result<Uuid, CoreError> {
    if short_id.len() < 2 {
        return Err(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string(),
        ));
    }
    let prefix = short_id.to_lowercase();
    let matches: Vec<&Series> = map
        .values()
        .filter(|s| s.id.to_string().starts_with(&prefix))
        .collect();
    match matches.len() {
        1 => Ok(matches[0].id),
        0 => Err(CoreError::NotFound(format!(
            "No series found with ID prefix '{short_id}'"
        ))),
        _ => Err(CoreError::AmbiguousId(
            matches
                .into_iter()
                .map(|s| (s.id.to_string(), s.title.clone()))
                .collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RepeatKind, RepeatRule, SplitEdits};
    use crate::split::split_series;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_in(dir: &tempfile::TempDir) -> ReminderStore {
        ReminderStore::new(dir.path().join("reminders.json"))
    }

    fn sample_series(title: &str) -> Series {
        Series {
            title: title.to_string(),
            date: date(2025, 5, 1),
            repeat: Some(RepeatRule::new(RepeatKind::Daily)),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_is_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let series = sample_series("Journal");
        let id = series.id;
        store.insert(series).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[&id].title, "Journal");
        assert!(loaded[&id].is_recurring());
    }

    #[test]
    fn test_update_vanished_series_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.insert(sample_series("A")).unwrap();

        let ghost = Uuid::now_v7();
        let result = store.update(ghost, |s| s.title = "B".to_string());
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn test_update_persists_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let series = sample_series("Walk dog");
        let id = series.id;
        store.insert(series).unwrap();

        store
            .update(id, |s| {
                if let Some(rule) = s.active_rule_mut() {
                    rule.set_completed(date(2025, 5, 3), date(2025, 5, 3).and_hms_opt(7, 0, 0).unwrap());
                }
            })
            .unwrap();

        let loaded = store.find(id).unwrap().unwrap();
        assert!(loaded.active_rule().unwrap().is_completed(date(2025, 5, 3)));
    }

    #[test]
    fn test_corrupt_record_does_not_poison_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let good = sample_series("Good");
        let good_id = good.id;
        store.insert(good).unwrap();

        // Splice a corrupt record into the document by hand.
        let mut doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        doc.as_object_mut().unwrap().insert(
            Uuid::now_v7().to_string(),
            serde_json::json!({ "title": "no date field" }),
        );
        fs::write(store.path(), serde_json::to_string(&doc).unwrap()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key(&good_id));
    }

    #[test]
    fn test_save_split_writes_both_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let series = sample_series("Gym");
        let id = series.id;
        store.insert(series.clone()).unwrap();

        let outcome = split_series(
            &series,
            date(2025, 5, 10),
            SplitEdits {
                date: date(2025, 5, 11),
                time: None,
                end_date: None,
                end_time: None,
            },
        )
        .unwrap();
        store.save_split(&outcome).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded[&id].active_rule().unwrap().end_date,
            Some(date(2025, 5, 9))
        );
        let continuation = loaded.values().find(|s| s.id != id).unwrap();
        assert_eq!(continuation.date, date(2025, 5, 11));
    }

    #[test]
    fn test_save_split_rejects_vanished_original() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let series = sample_series("Gone");

        let outcome = split_series(
            &series,
            date(2025, 5, 10),
            SplitEdits {
                date: date(2025, 5, 11),
                time: None,
                end_date: None,
                end_time: None,
            },
        )
        .unwrap();
        // The series was never persisted (or was deleted concurrently).
        assert!(matches!(
            store.save_split(&outcome),
            Err(CoreError::NotFound(_))
        ));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_short_id() {
        let mut map = SeriesMap::new();
        let a = sample_series("A");
        let a_id = a.id;
        map.insert(a.id, a);

        let prefix = a_id.to_string()[..8].to_string();
        assert_eq!(resolve_series_id(&map, &prefix).unwrap(), a_id);
        assert!(matches!(
            resolve_series_id(&map, "x"),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_series_id(&map, "ffffffff"),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        // UUIDv7 ids share their leading timestamp bits when created
        // back-to-back, so a short common prefix is ambiguous.
        let mut map = SeriesMap::new();
        let a = sample_series("A");
        let b = sample_series("B");
        let common: String = {
            let a_str = a.id.to_string();
            let b_str = b.id.to_string();
            a_str
                .chars()
                .zip(b_str.chars())
                .take_while(|(x, y)| x == y)
                .map(|(x, _)| x)
                .collect()
        };
        map.insert(a.id, a);
        map.insert(b.id, b);
        if common.len() >= 2 {
            assert!(matches!(
                resolve_series_id(&map, &common),
                Err(CoreError::AmbiguousId(_))
            ));
        }
    }
}
