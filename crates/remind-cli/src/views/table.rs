use chrono::{NaiveDate, NaiveTime};
use comfy_table::{Attribute, Cell, Color, Row, Table};
use remind_core::date::format_time;
use remind_core::models::Priority;

#[derive(Debug, Clone)]
pub struct ViewInstance {
    pub series_short_id: String,
    pub original_key: Option<NaiveDate>,
    pub title: String,
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub priority: Priority,
    pub completed: bool,
    pub overdue: bool,
    pub repeat_description: Option<String>,
}

pub fn display_instances(instances: &[ViewInstance]) {
    if instances.is_empty() {
        println!("No reminders found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "When", "Title", "Repeats", "Status"]);

    for instance in instances {
        let mut row = Row::new();

        let id_text = match instance.original_key {
            Some(key) => format!("{}@{}", instance.series_short_id, key),
            None => instance.series_short_id.clone(),
        };
        row.add_cell(Cell::new(id_text));

        let mut when = instance.date.to_string();
        if let Some(time) = instance.time {
            when.push(' ');
            when.push_str(&format_time(time));
        }
        if let Some(end_date) = instance.end_date {
            when.push_str(&format!(" → {}", end_date));
            if let Some(end_time) = instance.end_time {
                when.push(' ');
                when.push_str(&format_time(end_time));
            }
        }
        let when_cell = if instance.completed {
            Cell::new(when).fg(Color::DarkGrey)
        } else if instance.overdue {
            Cell::new(when).fg(Color::Red)
        } else {
            Cell::new(when)
        };
        row.add_cell(when_cell);

        let mut display_title = String::new();
        if instance.repeat_description.is_some() {
            display_title.push('↻');
            display_title.push(' ');
        }
        display_title.push_str(&instance.title);

        let mut title_cell = Cell::new(display_title);
        if instance.completed {
            title_cell = title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        } else {
            title_cell = match instance.priority {
                Priority::High => title_cell.fg(Color::Red).add_attribute(Attribute::Bold),
                Priority::Medium => title_cell.fg(Color::Yellow),
                Priority::Low => title_cell.fg(Color::Green),
                Priority::None => title_cell,
            };
        }
        row.add_cell(title_cell);

        row.add_cell(Cell::new(
            instance.repeat_description.as_deref().unwrap_or("-"),
        ));

        let status_cell = if instance.completed {
            Cell::new("done").fg(Color::Green)
        } else if instance.overdue {
            Cell::new("overdue").fg(Color::Red)
        } else {
            Cell::new("open")
        };
        row.add_cell(status_cell);

        table.add_row(row);
    }

    println!("{table}");
}
