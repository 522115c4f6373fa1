use anyhow::{anyhow, Result};
use remind_core::error::CoreError;
use remind_core::store::ReminderStore;
use uuid::Uuid;

use crate::parser::parse_local_date;

/// Hides one occurrence of a recurring series. The key lands in the
/// deleted-instances table and its completion/modification records are
/// scrubbed; the series itself is untouched.
pub fn delete_instance(store: &ReminderStore, id: Uuid, on: &str) -> Result<()> {
    let key = parse_local_date(on)?;
    let series = store
        .find(id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(id.to_string())))?;
    if !series.is_recurring() {
        return Err(anyhow!(CoreError::NotRecurring(id.to_string())));
    }
    store.update(id, |s| {
        if let Some(rule) = s.active_rule_mut() {
            rule.remove_instance(key);
        }
    })?;
    println!("Deleted occurrence {key} of '{}'.", series.title);
    Ok(())
}

/// Removes a series record entirely, discarding all of its override tables.
pub fn delete_series(store: &ReminderStore, id: Uuid) -> Result<()> {
    let removed = store.remove(id)?;
    println!("Deleted '{}'.", removed.title);
    Ok(())
}
