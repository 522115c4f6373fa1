use anyhow::{anyhow, Result};
use remind_core::error::CoreError;
use remind_core::models::{SplitEdits, SplitOutcome};
use remind_core::split::split_series;
use remind_core::store::ReminderStore;

use crate::cli::SplitCommand;
use crate::parser::{parse_clock_time, parse_local_date};
use crate::util::load_and_resolve;

pub fn split(store: &ReminderStore, command: SplitCommand) -> Result<()> {
    let (map, id) = load_and_resolve(store, &command.id)?;
    let series = &map[&id];

    let pivot = parse_local_date(&command.at)?;
    let edits = SplitEdits {
        date: match &command.date {
            Some(raw) => parse_local_date(raw)?,
            None => pivot,
        },
        time: match &command.time {
            Some(raw) => Some(parse_clock_time(raw)?),
            None => series.time,
        },
        end_date: command
            .end_date
            .as_deref()
            .map(parse_local_date)
            .transpose()?,
        end_time: match &command.end_time {
            Some(raw) => Some(parse_clock_time(raw)?),
            None => series.end_time,
        },
    };

    let outcome = split_series(series, pivot, edits).map_err(|e| anyhow!(e))?;
    // Both halves land in one document write; a half-applied split would
    // corrupt the collection.
    store.save_split(&outcome)?;

    match &outcome {
        SplitOutcome::EditedInPlace(edited) => {
            println!(
                "Pivot is the series anchor; edited '{}' in place [{}].",
                edited.title,
                edited.short_id()
            );
        }
        SplitOutcome::Split {
            original,
            continuation,
        } => {
            println!(
                "Split '{}': original [{}] now ends {}, new series [{}] starts {}.",
                original.title,
                original.short_id(),
                original
                    .active_rule()
                    .and_then(|r| r.end_date)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "never".to_string()),
                continuation.short_id(),
                continuation.date
            );
        }
    }
    Ok(())
}
