use anyhow::Result;
use chrono::Local;
use remind_core::store::ReminderStore;

use crate::cli::{DoneCommand, UndoneCommand};
use crate::config::Config;
use crate::parser::parse_local_date;
use crate::util::load_and_resolve;

pub fn done(store: &ReminderStore, command: DoneCommand, config: &Config) -> Result<()> {
    let (map, id) = load_and_resolve(store, &command.id)?;
    let series = &map[&id];
    let now = Local::now().naive_local();

    if series.is_recurring() {
        let key = match &command.on {
            Some(raw) => parse_local_date(raw)?,
            None => config.logical_today(),
        };
        store.update(id, |s| {
            if let Some(rule) = s.active_rule_mut() {
                rule.set_completed(key, now);
            }
        })?;
        println!("Marked occurrence {key} of '{}' as done.", series.title);
    } else {
        store.update(id, |s| {
            s.completed = true;
            s.completed_at = Some(now);
        })?;
        println!("Marked '{}' as done.", series.title);
    }
    Ok(())
}

pub fn undone(store: &ReminderStore, command: UndoneCommand, config: &Config) -> Result<()> {
    let (map, id) = load_and_resolve(store, &command.id)?;
    let series = &map[&id];

    if series.is_recurring() {
        let key = match &command.on {
            Some(raw) => parse_local_date(raw)?,
            None => config.logical_today(),
        };
        store.update(id, |s| {
            if let Some(rule) = s.active_rule_mut() {
                rule.clear_completed(key);
            }
        })?;
        println!("Reopened occurrence {key} of '{}'.", series.title);
    } else {
        store.update(id, |s| {
            s.completed = false;
            s.completed_at = None;
        })?;
        println!("Reopened '{}'.", series.title);
    }
    Ok(())
}
