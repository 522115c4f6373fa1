use anyhow::{anyhow, Result};
use remind_core::error::CoreError;
use remind_core::store::{resolve_series_id, ReminderStore, SeriesMap};
use uuid::Uuid;

/// Loads the collection and resolves a short id prefix against it.
pub fn load_and_resolve(store: &ReminderStore, short_id: &str) -> Result<(SeriesMap, Uuid)> {
    let map = store.load().map_err(|e| anyhow!(e))?;
    let id = resolve_series_id(&map, short_id).map_err(|e| anyhow!(e))?;
    Ok((map, id))
}

/// Parses a comma-separated weekday list ("mon,wed,fri") into the 0=Sunday
/// numbering the custom rule uses.
pub fn parse_weekday_set(value: &str) -> Result<std::collections::BTreeSet<u8>> {
    let mut out = std::collections::BTreeSet::new();
    for part in value.split(',') {
        let day = match part.trim().to_lowercase().as_str() {
            "sun" | "sunday" => 0,
            "mon" | "monday" => 1,
            "tue" | "tuesday" => 2,
            "wed" | "wednesday" => 3,
            "thu" | "thursday" => 4,
            "fri" | "friday" => 5,
            "sat" | "saturday" => 6,
            other => {
                return Err(anyhow!(CoreError::InvalidInput(format!(
                    "Unknown weekday '{other}'"
                ))))
            }
        };
        out.insert(day);
    }
    Ok(out)
}

/// Parses a comma-separated number list ("1,15") with an inclusive range
/// check.
pub fn parse_number_set(value: &str, min: u8, max: u8) -> Result<std::collections::BTreeSet<u8>> {
    let mut out = std::collections::BTreeSet::new();
    for part in value.split(',') {
        let number: u8 = part
            .trim()
            .parse()
            .map_err(|_| anyhow!(CoreError::InvalidInput(format!("Invalid number '{part}'"))))?;
        if number < min || number > max {
            return Err(anyhow!(CoreError::InvalidInput(format!(
                "{number} is outside {min}..={max}"
            ))));
        }
        out.insert(number);
    }
    Ok(out)
}
