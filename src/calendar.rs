use crate::models::BookingRecord;
use chrono::{Month, NaiveDate, NaiveTime};
use tracing::debug;

/// 0-based month index for an English month name or its three-letter
/// abbreviation, ignoring case. `None` for anything else.
pub fn month_index(name: &str) -> Option<u32> {
    name.trim()
        .parse::<Month>()
        .ok()
        .map(|month| month.number_from_month() - 1)
}

/// Calendar date of a booking's arrival, or `None` when any component is
/// malformed or the triple does not name a real day.
pub fn resolve_date(record: &BookingRecord) -> Option<NaiveDate> {
    let Some(year) = record.arrival_year.value() else {
        debug!(hotel = %record.hotel, "skipping record: malformed arrival year");
        return None;
    };
    let Some(month) = month_index(&record.arrival_month) else {
        debug!(month = %record.arrival_month, "skipping record: unrecognized month name");
        return None;
    };
    let Some(day) = record.arrival_day.value() else {
        debug!(hotel = %record.hotel, "skipping record: malformed arrival day");
        return None;
    };

    let date = NaiveDate::from_ymd_opt(year, month + 1, day);
    if date.is_none() {
        debug!(year, month = month + 1, day, "skipping record: not a calendar date");
    }
    date
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Midnight UTC of `date` as epoch milliseconds.
pub fn start_of_day_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}
