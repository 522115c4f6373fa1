//! # Remind Core Library
//!
//! The recurrence expansion and instance-override engine of a personal
//! reminder manager embedded in a note-taking host.
//!
//! ## Features
//!
//! - **Single-Anchor Recurrence**: daily/weekly/monthly/yearly rules with
//!   per-step month-length and leap-year clamping, plus lunar-calendar,
//!   custom component-set and spaced-repetition (ebbinghaus) rules
//! - **Stable Instance Identity**: every logical occurrence is addressed by
//!   its pre-edit date (the original key) no matter how often it is moved
//! - **Per-Occurrence Overrides**: modifications, exclusions, deletions and
//!   completion state merged into displayable instances at query time
//! - **Series Splitting**: "this and future" edits split a series into two
//!   independent series, preserving history on each side
//! - **Future Guarantee Search**: widening-window lookup that finds an
//!   actionable occurrence even for sparse yearly/lunar rules
//!
//! ## Core Modules
//!
//! - [`models`]: series, rules, override tables, derived instances
//! - [`recurrence`]: evaluator, window expansion and override resolution
//! - [`overrides`]: override-table mutation operations
//! - [`split`]: series splitting
//! - [`search`]: future-occurrence search
//! - [`lunar`]: lunar calendar collaborator
//! - [`store`]: whole-document JSON persistence
//! - [`date`]: local calendar-date arithmetic
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use remind_core::lunar::TableLunarCalendar;
//! use remind_core::models::{RepeatKind, RepeatRule, Series};
//! use remind_core::recurrence::RecurrenceEngine;
//!
//! let series = Series {
//!     title: "Pay rent".to_string(),
//!     date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
//!     repeat: Some(RepeatRule::new(RepeatKind::Monthly)),
//!     ..Default::default()
//! };
//!
//! let lunar = TableLunarCalendar;
//! let engine = RecurrenceEngine::new(&series, &lunar).unwrap();
//! let instances = engine.instances_between(
//!     NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
//!     100,
//! );
//!
//! // Month-end clamping: Jan 31 -> Feb 28 -> Mar 28.
//! assert_eq!(instances[0].date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
//! ```

pub mod date;
pub mod error;
pub mod lunar;
pub mod models;
pub mod overrides;
pub mod recurrence;
pub mod search;
pub mod split;
pub mod store;
