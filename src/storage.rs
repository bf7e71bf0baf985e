use crate::errors::{AppError, DatasetError};
use crate::models::BookingRecord;
use crate::parse::parse_bookings;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn read_bookings(path: &Path) -> Result<Vec<BookingRecord>, DatasetError> {
    let bytes = fs::read(path).await?;
    parse_bookings(bytes.as_slice())
}

/// Loads the dataset once at startup. Any failure is logged and leaves the
/// dashboard running on an empty record set.
pub async fn load_records(path: &Path) -> Vec<BookingRecord> {
    match read_bookings(path).await {
        Ok(records) => {
            let malformed = records
                .iter()
                .filter(|record| !record.invalid_fields().is_empty())
                .count();
            info!(
                path = %path.display(),
                rows = records.len(),
                malformed,
                "loaded bookings"
            );
            records
        }
        Err(err) => {
            error!(path = %path.display(), "failed to load dataset: {err}");
            Vec::new()
        }
    }
}

/// Raw dataset bytes for the static CSV route.
pub async fn read_dataset(path: &Path) -> Result<Vec<u8>, AppError> {
    Ok(fs::read(path).await?)
}
