use crate::calendar::parse_day;
use crate::models::DateRange;
use std::{env, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATASET_PATH: &str = "data/hotel_bookings_1000.csv";

/// Range rendered when the page first loads.
const INITIAL_RANGE: &str = "2015-03-01..2015-07-31";
/// Range pre-filled in the date inputs.
const PICKER_RANGE: &str = "2015-06-01..2015-06-16";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must look like YYYY-MM-DD..YYYY-MM-DD, got '{value}'")]
    Range { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub dataset_path: PathBuf,
    pub initial_range: DateRange,
    pub picker_range: DateRange,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let dataset_path = env::var("APP_DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET_PATH));

        Ok(Self {
            port,
            dataset_path,
            initial_range: range_from_env("APP_INITIAL_RANGE", INITIAL_RANGE)?,
            picker_range: range_from_env("APP_PICKER_RANGE", PICKER_RANGE)?,
        })
    }
}

fn range_from_env(name: &'static str, default: &str) -> Result<DateRange, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    parse_range(&value).ok_or(ConfigError::Range { name, value })
}

/// Parses `start..end`. Does not require `start <= end`.
pub fn parse_range(value: &str) -> Option<DateRange> {
    let (start, end) = value.split_once("..")?;
    Some(DateRange::new(parse_day(start)?, parse_day(end)?))
}
