use clap::{Parser, Subcommand};
use remind_core::models::Priority;

/// Reminder manager with recurring series, per-instance edits and series
/// splitting
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new reminder or recurring series
    Add(AddCommand),
    /// List occurrences in a date window
    List(ListCommand),
    /// Show one series in detail
    Show(ShowCommand),
    /// Mark an occurrence (or a one-shot reminder) as done
    Done(DoneCommand),
    /// Reopen a completed occurrence
    Undone(UndoneCommand),
    /// Edit a series, or one occurrence of it
    Edit(EditCommand),
    /// Delete a series, or hide one occurrence of it
    Delete(DeleteCommand),
    /// Split a recurring series at an occurrence ("this and future" edit)
    Split(SplitCommand),
    /// Find the next actionable occurrence
    Next(NextCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The reminder title
    pub title: String,
    /// A note attached to the reminder
    #[clap(short, long)]
    pub note: Option<String>,
    /// Start date (natural language or YYYY-MM-DD; defaults to today)
    #[clap(short, long)]
    pub date: Option<String>,
    /// Start time of day (HH:MM)
    #[clap(short, long)]
    pub time: Option<String>,
    /// End date for multi-day reminders
    #[clap(long)]
    pub end_date: Option<String>,
    /// End time of day (HH:MM)
    #[clap(long)]
    pub end_time: Option<String>,
    /// The priority of the reminder
    #[clap(long)]
    pub priority: Option<Priority>,
    /// Repeat frequency (daily, weekly, monthly, yearly, lunar-monthly,
    /// lunar-yearly, custom, ebbinghaus)
    #[clap(long)]
    pub every: Option<String>,
    /// Repeat interval (every N days/weeks/months/years)
    #[clap(long)]
    pub interval: Option<u32>,
    /// End date for the recurrence (inclusive)
    #[clap(long)]
    pub until: Option<String>,
    /// Target lunar day (1-30) for lunar repeats
    #[clap(long)]
    pub lunar_day: Option<u8>,
    /// Target lunar month (1-12) for lunar-yearly repeats
    #[clap(long)]
    pub lunar_month: Option<u8>,
    /// Weekdays for custom repeats (sun,mon,tue,wed,thu,fri,sat)
    #[clap(long)]
    pub on: Option<String>,
    /// Days of month for custom repeats (e.g. "1,15")
    #[clap(long)]
    pub month_days: Option<String>,
    /// Months for custom repeats (e.g. "3,6,9,12")
    #[clap(long)]
    pub months: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Window start (natural language or YYYY-MM-DD; defaults to today)
    #[clap(long)]
    pub from: Option<String>,
    /// Window end (defaults to the configured lookahead)
    #[clap(long)]
    pub to: Option<String>,
    /// Maximum occurrences per series
    #[clap(long)]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The series ID (short prefix accepted)
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The series ID (short prefix accepted)
    pub id: String,
    /// Which occurrence, by its original date (defaults to today)
    #[clap(long)]
    pub on: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct UndoneCommand {
    /// The series ID (short prefix accepted)
    pub id: String,
    /// Which occurrence, by its original date (defaults to today)
    #[clap(long)]
    pub on: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The series ID (short prefix accepted)
    pub id: String,
    /// Edit one occurrence, addressed by its original date, instead of the
    /// whole series
    #[clap(long)]
    pub on: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// New date (for an occurrence edit: where it is displayed)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long)]
    pub end_time: Option<String>,

    #[arg(long)]
    pub note: Option<String>,

    #[arg(long)]
    pub priority: Option<Priority>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The series ID (short prefix accepted)
    pub id: String,
    /// Delete only this occurrence, by its original date
    #[clap(long)]
    pub on: Option<String>,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SplitCommand {
    /// The series ID (short prefix accepted)
    pub id: String,
    /// Pivot occurrence, by its original date
    #[clap(long)]
    pub at: String,
    /// Start date of the new series (defaults to the pivot date)
    #[clap(long)]
    pub date: Option<String>,
    /// Start time of the new series (defaults to the series time)
    #[clap(long)]
    pub time: Option<String>,
    /// End date of the new series' first occurrence
    #[clap(long)]
    pub end_date: Option<String>,
    /// End time of the new series
    #[clap(long)]
    pub end_time: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// The series ID (short prefix accepted)
    pub id: String,
}
