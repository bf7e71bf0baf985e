use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A numeric CSV field after coercion. Keeps the raw text when parsing fails
/// so the failure can be reported without guessing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Valid(T),
    Invalid(String),
}

impl<T: FromStr> Field<T> {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<T>() {
            Ok(value) => Field::Valid(value),
            Err(_) => Field::Invalid(raw.to_string()),
        }
    }
}

impl<T: Copy> Field<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Field::Valid(value) => Some(*value),
            Field::Invalid(_) => None,
        }
    }
}

impl<T> Field<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Field::Valid(_))
    }
}

/// One booking row, typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub hotel: String,
    pub arrival_year: Field<i32>,
    pub arrival_month: String,
    pub arrival_day: Field<u32>,
    pub adults: Field<u32>,
    pub children: Field<u32>,
    pub babies: Field<u32>,
    pub country: String,
}

impl BookingRecord {
    /// Names of the numeric fields that failed to parse, in column order.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.arrival_year.is_valid() {
            fields.push("arrival_date_year");
        }
        if !self.arrival_day.is_valid() {
            fields.push("arrival_date_day_of_month");
        }
        if !self.adults.is_valid() {
            fields.push("adults");
        }
        if !self.children.is_valid() {
            fields.push("children");
        }
        if !self.babies.is_valid() {
            fields.push("babies");
        }
        fields
    }
}

/// Inclusive calendar-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySeriesPoint {
    pub date: String,
    pub timestamp: i64,
    pub total_visitors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySeriesEntry {
    pub country: String,
    pub total_visitors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub start: String,
    pub end: String,
    pub record_count: usize,
    pub daily: Vec<DailySeriesPoint>,
    pub countries: Vec<CountrySeriesEntry>,
    pub adults: Vec<u64>,
    pub children: Vec<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}
