use crate::calendar::month_index;
use crate::errors::DatasetError;
use crate::models::{BookingRecord, Field};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;
use tracing::warn;

/// A CSV row as text, mapped by header name. Columns the dashboard does not
/// use are ignored. Missing columns, short rows and empty cells come through
/// as `None`.
#[derive(Debug, Deserialize)]
struct RawBooking {
    hotel: Option<String>,
    #[serde(rename = "arrival_date_year")]
    arrival_year: Option<String>,
    #[serde(rename = "arrival_date_month")]
    arrival_month: Option<String>,
    #[serde(rename = "arrival_date_day_of_month")]
    arrival_day: Option<String>,
    adults: Option<String>,
    children: Option<String>,
    babies: Option<String>,
    country: Option<String>,
}

impl RawBooking {
    fn into_record(self) -> BookingRecord {
        BookingRecord {
            arrival_year: numeric(self.arrival_year.as_deref()),
            arrival_day: numeric(self.arrival_day.as_deref()),
            adults: numeric(self.adults.as_deref()),
            children: numeric(self.children.as_deref()),
            babies: numeric(self.babies.as_deref()),
            hotel: self.hotel.unwrap_or_default(),
            arrival_month: self.arrival_month.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
        }
    }
}

fn numeric<T: FromStr>(raw: Option<&str>) -> Field<T> {
    Field::parse(raw.unwrap_or_default())
}

pub fn parse_bookings<R: Read>(reader: R) -> Result<Vec<BookingRecord>, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    reader.headers()?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawBooking>().enumerate() {
        // header is line 1
        let line = index + 2;
        let record = match row {
            Ok(raw) => raw.into_record(),
            Err(err) => {
                warn!(line, "skipping unreadable booking row: {err}");
                continue;
            }
        };

        let invalid = record.invalid_fields();
        if !invalid.is_empty() {
            warn!(line, fields = ?invalid, "booking row has malformed numeric fields");
        }
        if month_index(&record.arrival_month).is_none() {
            warn!(line, month = %record.arrival_month, "booking row has unrecognized month name");
        }
        records.push(record);
    }

    Ok(records)
}
