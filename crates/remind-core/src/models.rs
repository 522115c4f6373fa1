use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::date;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    None,
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::None
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Priority::None),
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::None => write!(f, "none"),
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Recurrence rule families supported by the engine.
///
/// All kinds share the single-anchor model: the series anchor date is the
/// first occurrence and later occurrences are derived from it. Multi-weekday
/// or multi-month-day selection is only expressible through `Custom`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    LunarMonthly,
    LunarYearly,
    Custom,
    Ebbinghaus,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid repeat kind: {0}")]
pub struct ParseRepeatKindError(String);

impl FromStr for RepeatKind {
    type Err = ParseRepeatKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(RepeatKind::Daily),
            "weekly" => Ok(RepeatKind::Weekly),
            "monthly" => Ok(RepeatKind::Monthly),
            "yearly" => Ok(RepeatKind::Yearly),
            "lunar-monthly" => Ok(RepeatKind::LunarMonthly),
            "lunar-yearly" => Ok(RepeatKind::LunarYearly),
            "custom" => Ok(RepeatKind::Custom),
            "ebbinghaus" => Ok(RepeatKind::Ebbinghaus),
            _ => Err(ParseRepeatKindError(s.to_string())),
        }
    }
}

impl fmt::Display for RepeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatKind::Daily => write!(f, "daily"),
            RepeatKind::Weekly => write!(f, "weekly"),
            RepeatKind::Monthly => write!(f, "monthly"),
            RepeatKind::Yearly => write!(f, "yearly"),
            RepeatKind::LunarMonthly => write!(f, "lunar-monthly"),
            RepeatKind::LunarYearly => write!(f, "lunar-yearly"),
            RepeatKind::Custom => write!(f, "custom"),
            RepeatKind::Ebbinghaus => write!(f, "ebbinghaus"),
        }
    }
}

/// Review-schedule offsets (in days from the anchor) used when an
/// ebbinghaus rule does not carry an explicit pattern.
pub const DEFAULT_EBBINGHAUS_PATTERN: [u32; 5] = [1, 2, 4, 7, 15];

/// Per-occurrence field overrides, keyed by original key in
/// [`RepeatRule::instance_modifications`].
///
/// Only fields that are present override the rule-generated occurrence;
/// absent fields fall through to the series values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(with = "date::hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(with = "date::hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<NaiveDate>,
}

/// A recurrence rule plus the per-occurrence override tables that belong to
/// it. This nests under the series exactly as the persisted document does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepeatRule {
    #[serde(rename = "type")]
    pub kind: RepeatKind,
    /// Disabled rules are kept on the wire but ignored by the engine.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Target lunar day (1-30) for the lunar kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunar_day: Option<u8>,
    /// Target lunar month (1-12) for `lunar-yearly`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunar_month: Option<u8>,
    /// Custom rule: weekdays that match, 0 = Sunday .. 6 = Saturday.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub week_days: BTreeSet<u8>,
    /// Custom rule: days of month that match (1-31).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub month_days: BTreeSet<u8>,
    /// Custom rule: months that match (1-12).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub months: BTreeSet<u8>,
    /// Ebbinghaus rule: day offsets from the anchor; empty means the
    /// default review pattern.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ebbinghaus_pattern: Vec<u32>,
    /// Inclusive series termination date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    // Override tables, all keyed by original key. Malformed entries are
    // dropped on load with a warning; they must never abort decoding of the
    // rest of the series.
    #[serde(
        default,
        deserialize_with = "lenient::date_set",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub exclude_dates: BTreeSet<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient::date_set",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub deleted_instances: BTreeSet<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient::override_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub instance_modifications: BTreeMap<NaiveDate, InstanceOverride>,
    #[serde(
        default,
        deserialize_with = "lenient::date_set",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub completed_instances: BTreeSet<NaiveDate>,
    #[serde(
        default,
        with = "lenient::completed_times",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub completed_times: BTreeMap<NaiveDate, NaiveDateTime>,
}

fn default_enabled() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_interval() -> u32 {
    1
}

impl RepeatRule {
    pub fn new(kind: RepeatKind) -> Self {
        Self {
            kind,
            enabled: true,
            interval: 1,
            lunar_day: None,
            lunar_month: None,
            week_days: BTreeSet::new(),
            month_days: BTreeSet::new(),
            months: BTreeSet::new(),
            ebbinghaus_pattern: Vec::new(),
            end_date: None,
            exclude_dates: BTreeSet::new(),
            deleted_instances: BTreeSet::new(),
            instance_modifications: BTreeMap::new(),
            completed_instances: BTreeSet::new(),
            completed_times: BTreeMap::new(),
        }
    }

    /// Whether `key` is omitted from expansion. The two exclusion tables
    /// overlap historically and are honored identically on read.
    pub fn is_excluded(&self, key: NaiveDate) -> bool {
        self.exclude_dates.contains(&key) || self.deleted_instances.contains(&key)
    }

    pub fn is_completed(&self, key: NaiveDate) -> bool {
        self.completed_instances.contains(&key)
    }

    /// The ebbinghaus offsets in effect for this rule.
    pub fn ebbinghaus_offsets(&self) -> &[u32] {
        if self.ebbinghaus_pattern.is_empty() {
            &DEFAULT_EBBINGHAUS_PATTERN
        } else {
            &self.ebbinghaus_pattern
        }
    }

    /// Whether the rule has terminated on or before `key`.
    pub fn is_ended_at(&self, key: NaiveDate) -> bool {
        matches!(self.end_date, Some(end) if key > end)
    }

    /// Human-readable rule summary for list/detail views.
    pub fn describe(&self) -> String {
        let mut description = match self.kind {
            RepeatKind::Daily if self.interval == 1 => "every day".to_string(),
            RepeatKind::Daily => format!("every {} days", self.interval),
            RepeatKind::Weekly if self.interval == 1 => "every week".to_string(),
            RepeatKind::Weekly => format!("every {} weeks", self.interval),
            RepeatKind::Monthly if self.interval == 1 => "every month".to_string(),
            RepeatKind::Monthly => format!("every {} months", self.interval),
            RepeatKind::Yearly if self.interval == 1 => "every year".to_string(),
            RepeatKind::Yearly => format!("every {} years", self.interval),
            RepeatKind::LunarMonthly => match self.lunar_day {
                Some(day) => format!("lunar day {} of every month", day),
                None => "every lunar month".to_string(),
            },
            RepeatKind::LunarYearly => match (self.lunar_month, self.lunar_day) {
                (Some(month), Some(day)) => format!("lunar {}/{} of every year", month, day),
                _ => "every lunar year".to_string(),
            },
            RepeatKind::Custom => "custom schedule".to_string(),
            RepeatKind::Ebbinghaus => "spaced-repetition review".to_string(),
        };
        if let Some(end) = self.end_date {
            description.push_str(&format!(", until {}", end));
        }
        description
    }
}

// ============================================================================
// Series
// ============================================================================

/// The persisted recurring reminder definition.
///
/// A series with `repeat` absent (or disabled) is a plain one-shot reminder;
/// the recurrence engine rejects those and the CLI displays them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// Anchor date: logically the first occurrence of the rule.
    pub date: NaiveDate,
    #[serde(default, with = "date::hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Last day of a multi-day span; the span length is re-applied to every
    /// generated occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "date::hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<RepeatRule>,
    /// One-shot completion state. Recurring series track completion
    /// per-occurrence in the override tables instead.
    #[serde(default, skip_serializing_if = "is_false")]
    pub completed: bool,
    #[serde(
        default,
        with = "date::local_dt_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Default for Series {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: String::new(),
            note: None,
            priority: Priority::None,
            date: now.date_naive(),
            time: None,
            end_date: None,
            end_time: None,
            repeat: None,
            completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Series {
    /// The enabled recurrence rule, if any.
    pub fn active_rule(&self) -> Option<&RepeatRule> {
        self.repeat.as_ref().filter(|r| r.enabled)
    }

    pub fn active_rule_mut(&mut self) -> Option<&mut RepeatRule> {
        self.repeat.as_mut().filter(|r| r.enabled)
    }

    pub fn is_recurring(&self) -> bool {
        self.active_rule().is_some()
    }

    /// Day span between anchor and end date, when the series covers
    /// multiple days.
    pub fn span_days(&self) -> Option<i64> {
        self.end_date
            .map(|end| date::days_between(self.date, end))
            .filter(|days| *days > 0)
    }

    /// Short id prefix used in CLI views and lookups.
    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}

// ============================================================================
// Derived occurrence types
// ============================================================================

/// Stable identity of one logical occurrence: the series plus the date the
/// occurrence would carry under pure rule-based expansion, before any edit.
/// Carried as structured data, never string-encoded and re-parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceKey {
    pub series_id: Uuid,
    pub original_key: NaiveDate,
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", &self.series_id.to_string()[..8], self.original_key)
    }
}

/// One rule-generated occurrence before overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOccurrence {
    /// The pre-override date, which doubles as the occurrence identity.
    pub original_key: NaiveDate,
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// A fully resolved, displayable occurrence. Never persisted as a whole;
/// recomputed on every query.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub key: InstanceKey,
    pub title: String,
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub note: Option<String>,
    pub priority: Priority,
    pub notified: bool,
    pub completed: bool,
    pub completed_at: Option<NaiveDateTime>,
}

// ============================================================================
// Data Transfer Objects for series operations
// ============================================================================

/// Start fields for the continuation series produced by a split.
#[derive(Debug, Clone)]
pub struct SplitEdits {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
}

/// Outcome of splitting a series at a pivot occurrence.
#[derive(Debug)]
pub enum SplitOutcome {
    /// The pivot was the anchor: the series was edited in place and keeps
    /// its id.
    EditedInPlace(Series),
    /// The series was bounded at the pivot and a continuation series was
    /// created. Both must be persisted together.
    Split {
        original: Series,
        continuation: Series,
    },
}

// ============================================================================
// Lenient override-table decoding
// ============================================================================

/// Deserializers that drop malformed override-table entries with a warning
/// instead of failing the whole series record.
mod lenient {
    use super::InstanceOverride;
    use crate::date::{format_local_datetime, parse_local_datetime};
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn date_set<'de, D>(deserializer: D) -> Result<BTreeSet<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Vec<String> = Vec::deserialize(deserializer)?;
        let mut out = BTreeSet::new();
        for value in raw {
            match value.parse::<NaiveDate>() {
                Ok(parsed) => {
                    out.insert(parsed);
                }
                Err(_) => {
                    tracing::warn!(value = %value, "skipping malformed date in override table");
                }
            }
        }
        Ok(out)
    }

    pub fn override_map<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<NaiveDate, InstanceOverride>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
        let mut out = BTreeMap::new();
        for (key, value) in raw {
            let Ok(parsed_key) = key.parse::<NaiveDate>() else {
                tracing::warn!(key = %key, "skipping instance modification with malformed key");
                continue;
            };
            match serde_json::from_value::<InstanceOverride>(value) {
                Ok(modification) => {
                    out.insert(parsed_key, modification);
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping malformed instance modification");
                }
            }
        }
        Ok(out)
    }

    pub mod completed_times {
        use super::*;

        pub fn serialize<S>(
            value: &BTreeMap<NaiveDate, NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(value.len()))?;
            for (key, time) in value {
                map.serialize_entry(&key.to_string(), &format_local_datetime(*time))?;
            }
            map.end()
        }

        pub fn deserialize<'de, D>(
            deserializer: D,
        ) -> Result<BTreeMap<NaiveDate, NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: BTreeMap<String, String> = BTreeMap::deserialize(deserializer)?;
            let mut out = BTreeMap::new();
            for (key, value) in raw {
                let (Ok(parsed_key), Some(parsed_time)) =
                    (key.parse::<NaiveDate>(), parse_local_datetime(&value))
                else {
                    tracing::warn!(key = %key, value = %value, "skipping malformed completion time");
                    continue;
                };
                out.insert(parsed_key, parsed_time);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_series_wire_shape() {
            let mut rule = RepeatRule::new(RepeatKind::Monthly);
            rule.end_date = Some(date(2025, 12, 31));
            rule.exclude_dates.insert(date(2025, 3, 15));
            rule.completed_instances.insert(date(2025, 2, 15));
            rule.completed_times.insert(
                date(2025, 2, 15),
                date(2025, 2, 15).and_hms_opt(9, 30, 0).unwrap(),
            );

            let series = Series {
                title: "Pay rent".to_string(),
                date: date(2025, 1, 15),
                time: crate::date::parse_time("09:00"),
                repeat: Some(rule),
                ..Default::default()
            };

            let json = serde_json::to_value(&series).unwrap();
            assert_eq!(json["date"], "2025-01-15");
            assert_eq!(json["time"], "09:00");
            assert_eq!(json["repeat"]["type"], "monthly");
            assert_eq!(json["repeat"]["enabled"], true);
            assert_eq!(json["repeat"]["endDate"], "2025-12-31");
            assert_eq!(json["repeat"]["excludeDates"][0], "2025-03-15");
            assert_eq!(
                json["repeat"]["completedTimes"]["2025-02-15"],
                "2025-02-15 09:30"
            );

            let round_tripped: Series = serde_json::from_value(json).unwrap();
            assert_eq!(round_tripped.repeat, series.repeat);
            assert_eq!(round_tripped.date, series.date);
        }

        #[test]
        fn test_disabled_rule_is_not_active() {
            let json = serde_json::json!({
                "id": Uuid::now_v7(),
                "title": "once",
                "date": "2025-05-01",
                "repeat": { "type": "daily", "enabled": false }
            });
            let series: Series = serde_json::from_value(json).unwrap();
            assert!(series.repeat.is_some());
            assert!(series.active_rule().is_none());
            assert!(!series.is_recurring());
        }

        #[test]
        fn test_malformed_override_entries_are_dropped() {
            let json = serde_json::json!({
                "type": "daily",
                "excludeDates": ["2025-06-01", "not-a-date", "2025-06-03"],
                "instanceModifications": {
                    "2025-06-02": { "date": "2025-06-05" },
                    "garbage": { "date": "2025-06-06" },
                    "2025-06-04": { "date": "also-garbage" }
                },
                "completedTimes": {
                    "2025-06-02": "2025-06-02 08:00",
                    "2025-06-09": "whenever"
                }
            });
            let rule: RepeatRule = serde_json::from_value(json).unwrap();
            assert_eq!(rule.exclude_dates.len(), 2);
            assert_eq!(rule.instance_modifications.len(), 1);
            assert!(rule.instance_modifications.contains_key(&date(2025, 6, 2)));
            assert_eq!(rule.completed_times.len(), 1);
        }

        #[test]
        fn test_rule_defaults() {
            let rule: RepeatRule = serde_json::from_value(serde_json::json!({
                "type": "weekly"
            }))
            .unwrap();
            assert!(rule.enabled);
            assert_eq!(rule.interval, 1);
            assert!(rule.exclude_dates.is_empty());
        }
    }

    mod model_tests {
        use super::*;

        #[test]
        fn test_span_days() {
            let series = Series {
                date: date(2025, 4, 10),
                end_date: Some(date(2025, 4, 12)),
                ..Default::default()
            };
            assert_eq!(series.span_days(), Some(2));

            let single_day = Series {
                date: date(2025, 4, 10),
                end_date: Some(date(2025, 4, 10)),
                ..Default::default()
            };
            assert_eq!(single_day.span_days(), None);
        }

        #[test]
        fn test_exclusion_tables_union() {
            let mut rule = RepeatRule::new(RepeatKind::Daily);
            rule.exclude_dates.insert(date(2025, 1, 2));
            rule.deleted_instances.insert(date(2025, 1, 3));
            assert!(rule.is_excluded(date(2025, 1, 2)));
            assert!(rule.is_excluded(date(2025, 1, 3)));
            assert!(!rule.is_excluded(date(2025, 1, 4)));
        }

        #[test]
        fn test_ebbinghaus_offsets_default() {
            let rule = RepeatRule::new(RepeatKind::Ebbinghaus);
            assert_eq!(rule.ebbinghaus_offsets(), &[1, 2, 4, 7, 15]);

            let mut custom = RepeatRule::new(RepeatKind::Ebbinghaus);
            custom.ebbinghaus_pattern = vec![1, 3, 9];
            assert_eq!(custom.ebbinghaus_offsets(), &[1, 3, 9]);
        }

        #[test]
        fn test_describe() {
            let mut rule = RepeatRule::new(RepeatKind::Daily);
            assert_eq!(rule.describe(), "every day");
            rule.interval = 3;
            assert_eq!(rule.describe(), "every 3 days");
            rule.end_date = Some(date(2025, 12, 31));
            assert_eq!(rule.describe(), "every 3 days, until 2025-12-31");

            let mut lunar = RepeatRule::new(RepeatKind::LunarYearly);
            lunar.lunar_month = Some(8);
            lunar.lunar_day = Some(15);
            assert_eq!(lunar.describe(), "lunar 8/15 of every year");
        }

        #[test]
        fn test_priority_round_trip() {
            for p in [Priority::None, Priority::Low, Priority::Medium, Priority::High] {
                assert_eq!(p.to_string().parse::<Priority>().unwrap(), p);
            }
            assert!("urgent".parse::<Priority>().is_err());
        }

        #[test]
        fn test_repeat_kind_round_trip() {
            let kinds = [
                RepeatKind::Daily,
                RepeatKind::Weekly,
                RepeatKind::Monthly,
                RepeatKind::Yearly,
                RepeatKind::LunarMonthly,
                RepeatKind::LunarYearly,
                RepeatKind::Custom,
                RepeatKind::Ebbinghaus,
            ];
            for kind in kinds {
                assert_eq!(kind.to_string().parse::<RepeatKind>().unwrap(), kind);
            }
        }
    }
}
