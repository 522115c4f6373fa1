use anyhow::{anyhow, Result};
use remind_core::error::CoreError;
use remind_core::models::InstanceOverride;
use remind_core::store::ReminderStore;

use crate::cli::EditCommand;
use crate::config::Config;
use crate::parser::{parse_clock_time, parse_local_date};
use crate::util::load_and_resolve;

pub fn edit(store: &ReminderStore, command: EditCommand, config: &Config) -> Result<()> {
    let (map, id) = load_and_resolve(store, &command.id)?;
    let series = &map[&id];

    match &command.on {
        Some(raw) => {
            // Occurrence edit: everything is written under the occurrence's
            // original key, no matter where it is currently displayed.
            if !series.is_recurring() {
                return Err(anyhow!(CoreError::NotRecurring(series.id.to_string())));
            }
            let key = parse_local_date(raw)?;
            let changes = InstanceOverride {
                title: command.title.clone(),
                date: command.date.as_deref().map(parse_local_date).transpose()?,
                end_date: command
                    .end_date
                    .as_deref()
                    .map(parse_local_date)
                    .transpose()?,
                time: command.time.as_deref().map(parse_clock_time).transpose()?,
                end_time: command
                    .end_time
                    .as_deref()
                    .map(parse_clock_time)
                    .transpose()?,
                note: command.note.clone(),
                priority: command.priority,
                notified: None,
                modified_at: Some(config.logical_today()),
            };
            store.update(id, |s| {
                if let Some(rule) = s.active_rule_mut() {
                    rule.record_modification(key, changes);
                }
            })?;
            println!("Updated occurrence {key} of '{}'.", series.title);
        }
        None => {
            let title = command.title.clone();
            let date = command.date.as_deref().map(parse_local_date).transpose()?;
            let end_date = command
                .end_date
                .as_deref()
                .map(parse_local_date)
                .transpose()?;
            let time = command.time.as_deref().map(parse_clock_time).transpose()?;
            let end_time = command
                .end_time
                .as_deref()
                .map(parse_clock_time)
                .transpose()?;
            let note = command.note.clone();
            let priority = command.priority;

            let updated = store.update(id, |s| {
                if let Some(title) = title {
                    s.title = title;
                }
                if let Some(date) = date {
                    s.date = date;
                }
                if let Some(end_date) = end_date {
                    s.end_date = Some(end_date);
                }
                if let Some(time) = time {
                    s.time = Some(time);
                }
                if let Some(end_time) = end_time {
                    s.end_time = Some(end_time);
                }
                if let Some(note) = note {
                    s.note = Some(note);
                }
                if let Some(priority) = priority {
                    s.priority = priority;
                }
            })?;
            println!("Updated '{}'.", updated.title);
        }
    }
    Ok(())
}
