use anyhow::Result;
use remind_core::date::add_days;
use remind_core::lunar::TableLunarCalendar;
use remind_core::models::Series;
use remind_core::recurrence::RecurrenceEngine;
use remind_core::store::ReminderStore;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::parser::parse_local_date;
use crate::views::table::{display_instances, ViewInstance};

pub fn list_instances(store: &ReminderStore, command: ListCommand, config: &Config) -> Result<()> {
    let today = config.logical_today();
    let from = match &command.from {
        Some(raw) => parse_local_date(raw)?,
        None => today,
    };
    let to = match &command.to {
        Some(raw) => parse_local_date(raw)?,
        None => add_days(from, config.lookahead_days as i64).unwrap_or(from),
    };
    let limit = command.limit.unwrap_or(config.max_instances);

    let map = store.load()?;
    let lunar = TableLunarCalendar;
    let mut rows: Vec<ViewInstance> = Vec::new();

    for series in map.values() {
        match RecurrenceEngine::new(series, &lunar) {
            Ok(engine) => {
                let description = engine.rule().describe();
                for instance in engine.instances_between(from, to, limit) {
                    rows.push(ViewInstance {
                        series_short_id: series.short_id(),
                        original_key: Some(instance.key.original_key),
                        title: instance.title,
                        date: instance.date,
                        end_date: instance.end_date,
                        time: instance.time,
                        end_time: instance.end_time,
                        priority: instance.priority,
                        completed: instance.completed,
                        overdue: !instance.completed
                            && instance.end_date.unwrap_or(instance.date) < today,
                        repeat_description: Some(description.clone()),
                    });
                }
            }
            Err(_) => {
                // One-shot reminder: display it directly when in window.
                if series.date >= from && series.date <= to {
                    rows.push(one_shot_row(series, today));
                }
            }
        }
    }

    rows.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
    display_instances(&rows);
    Ok(())
}

fn one_shot_row(series: &Series, today: chrono::NaiveDate) -> ViewInstance {
    ViewInstance {
        series_short_id: series.short_id(),
        original_key: None,
        title: series.title.clone(),
        date: series.date,
        end_date: series.end_date,
        time: series.time,
        end_time: series.end_time,
        priority: series.priority,
        completed: series.completed,
        overdue: !series.completed && series.end_date.unwrap_or(series.date) < today,
        repeat_description: None,
    }
}
