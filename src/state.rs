use crate::config::Config;
use crate::models::{BookingRecord, DateRange};
use std::{path::PathBuf, sync::Arc};

/// Shared by every request. The record set is loaded once and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub dataset_path: PathBuf,
    pub records: Arc<Vec<BookingRecord>>,
    pub initial_range: DateRange,
    pub picker_range: DateRange,
}

impl AppState {
    pub fn new(config: &Config, records: Vec<BookingRecord>) -> Self {
        Self {
            dataset_path: config.dataset_path.clone(),
            records: Arc::new(records),
            initial_range: config.initial_range,
            picker_range: config.picker_range,
        }
    }
}
