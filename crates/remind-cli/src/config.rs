use chrono::{Local, NaiveDate, NaiveTime};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use remind_core::date::{logical_date, parse_time};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Path of the JSON reminder document.
    pub data_file: String,
    /// Logical day boundary (HH:MM). Times before this count as the
    /// previous day when deciding what "today" means.
    pub day_start: String,
    /// Default list window length in days.
    pub lookahead_days: u32,
    /// Default per-series instance cap for expansions.
    pub max_instances: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: "reminders.json".to_string(),
            day_start: "00:00".to_string(),
            lookahead_days: 30,
            max_instances: 100,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("remind.toml"))
            .merge(Env::prefixed("REMIND_"))
            .extract()
    }

    /// The configured day boundary, falling back to midnight on a bad value.
    pub fn day_start_time(&self) -> NaiveTime {
        parse_time(&self.day_start).unwrap_or(NaiveTime::MIN)
    }

    /// Today as a logical day: the wall clock shifted by the configured day
    /// boundary.
    pub fn logical_today(&self) -> NaiveDate {
        logical_date(Local::now().naive_local(), self.day_start_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_file, "reminders.json");
        assert_eq!(config.day_start_time(), NaiveTime::MIN);
        assert_eq!(config.lookahead_days, 30);
    }

    #[test]
    fn test_bad_day_start_falls_back_to_midnight() {
        let config = Config {
            day_start: "whenever".to_string(),
            ..Default::default()
        };
        assert_eq!(config.day_start_time(), NaiveTime::MIN);
    }
}
