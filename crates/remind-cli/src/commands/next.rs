use anyhow::{anyhow, Result};
use chrono_humanize::HumanTime;
use remind_core::error::CoreError;
use remind_core::lunar::TableLunarCalendar;
use remind_core::search::find_future_uncompleted;
use remind_core::store::ReminderStore;

use crate::cli::NextCommand;
use crate::config::Config;
use crate::util::load_and_resolve;

pub fn next(store: &ReminderStore, command: NextCommand, config: &Config) -> Result<()> {
    let (map, id) = load_and_resolve(store, &command.id)?;
    let series = &map[&id];
    let Some(rule) = series.active_rule() else {
        return Err(anyhow!(CoreError::NotRecurring(series.id.to_string())));
    };
    let today = config.logical_today();
    let lunar = TableLunarCalendar;

    let scan = find_future_uncompleted(series, today, &lunar)?;

    let effective_date = |occ: &remind_core::models::RawOccurrence| {
        rule.instance_modifications
            .get(&occ.original_key)
            .and_then(|m| m.date)
            .unwrap_or(occ.date)
    };
    let upcoming = scan
        .occurrences
        .iter()
        .find(|occ| effective_date(occ) > today && !rule.is_completed(occ.original_key));

    match upcoming {
        Some(occ) => {
            let effective = effective_date(occ);
            println!(
                "Next '{}': {} ({})",
                series.title,
                effective,
                HumanTime::from(effective - today)
            );
        }
        None => {
            println!(
                "No upcoming occurrence of '{}' within the search bound.",
                series.title
            );
        }
    }
    Ok(())
}
