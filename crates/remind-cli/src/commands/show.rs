use anyhow::Result;
use owo_colors::OwoColorize;
use remind_core::store::ReminderStore;

use crate::cli::ShowCommand;
use crate::util::load_and_resolve;

pub fn show_series(store: &ReminderStore, command: ShowCommand) -> Result<()> {
    let (map, id) = load_and_resolve(store, &command.id)?;
    let series = &map[&id];

    println!("{} {}", "Title:".bold(), series.title);
    println!("{} {}", "ID:".bold(), series.id);
    print!("{} {}", "Starts:".bold(), series.date);
    if let Some(time) = series.time {
        print!(" {}", remind_core::date::format_time(time));
    }
    println!();
    if let Some(end_date) = series.end_date {
        println!("{} {}", "Ends:".bold(), end_date);
    }
    if let Some(note) = &series.note {
        println!("{} {}", "Note:".bold(), note);
    }
    println!("{} {}", "Priority:".bold(), series.priority);

    match series.active_rule() {
        Some(rule) => {
            println!("{} {}", "Repeats:".bold(), rule.describe());
            println!(
                "{} {} completed, {} modified, {} excluded",
                "Overrides:".bold(),
                rule.completed_instances.len(),
                rule.instance_modifications.len(),
                rule.exclude_dates.len() + rule.deleted_instances.len(),
            );
        }
        None => {
            let status = if series.completed { "done" } else { "open" };
            println!("{} one-shot, {}", "Repeats:".bold(), status);
        }
    }
    Ok(())
}
