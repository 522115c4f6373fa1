use anyhow::{anyhow, Result};
use remind_core::error::CoreError;
use remind_core::models::{RepeatKind, RepeatRule, Series};
use remind_core::store::ReminderStore;

use crate::cli::AddCommand;
use crate::config::Config;
use crate::parser::{parse_clock_time, parse_local_date};
use crate::util::{parse_number_set, parse_weekday_set};

pub fn add_series(store: &ReminderStore, command: AddCommand, config: &Config) -> Result<()> {
    let date = match &command.date {
        Some(raw) => parse_local_date(raw)?,
        None => config.logical_today(),
    };

    let repeat = build_rule(&command)?;
    let series = Series {
        title: command.title.clone(),
        note: command.note.clone(),
        priority: command.priority.unwrap_or_default(),
        date,
        time: command.time.as_deref().map(parse_clock_time).transpose()?,
        end_date: command
            .end_date
            .as_deref()
            .map(parse_local_date)
            .transpose()?,
        end_time: command
            .end_time
            .as_deref()
            .map(parse_clock_time)
            .transpose()?,
        repeat,
        ..Default::default()
    };

    let short_id = series.short_id();
    let description = series.active_rule().map(|r| r.describe());
    store.insert(series)?;

    match description {
        Some(description) => println!(
            "Added '{}' [{}] starting {}, repeating {}",
            command.title, short_id, date, description
        ),
        None => println!("Added '{}' [{}] on {}", command.title, short_id, date),
    }
    Ok(())
}

fn build_rule(command: &AddCommand) -> Result<Option<RepeatRule>> {
    let Some(every) = &command.every else {
        return Ok(None);
    };
    let kind: RepeatKind = every
        .parse()
        .map_err(|e| anyhow!(CoreError::InvalidInput(format!("{e}"))))?;

    let mut rule = RepeatRule::new(kind);
    rule.interval = command.interval.unwrap_or(1);
    rule.lunar_day = command.lunar_day;
    rule.lunar_month = command.lunar_month;
    if let Some(until) = &command.until {
        rule.end_date = Some(parse_local_date(until)?);
    }
    if let Some(on) = &command.on {
        rule.week_days = parse_weekday_set(on)?;
    }
    if let Some(month_days) = &command.month_days {
        rule.month_days = parse_number_set(month_days, 1, 31)?;
    }
    if let Some(months) = &command.months {
        rule.months = parse_number_set(months, 1, 12)?;
    }

    match kind {
        RepeatKind::LunarMonthly if rule.lunar_day.is_none() => Err(anyhow!(
            CoreError::InvalidInput("lunar-monthly repeats need --lunar-day".to_string())
        )),
        RepeatKind::LunarYearly if rule.lunar_day.is_none() || rule.lunar_month.is_none() => {
            Err(anyhow!(CoreError::InvalidInput(
                "lunar-yearly repeats need --lunar-month and --lunar-day".to_string()
            )))
        }
        _ => Ok(Some(rule)),
    }
}
