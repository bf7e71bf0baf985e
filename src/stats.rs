use crate::calendar::{day_key, resolve_date, start_of_day_millis};
use crate::models::{
    BookingRecord, CountrySeriesEntry, DailySeriesPoint, DashboardSnapshot, DateRange, Field,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Adults + children + babies, or 0 when any of them failed to parse.
pub fn occupant_total(record: &BookingRecord) -> u64 {
    match (
        record.adults.value(),
        record.children.value(),
        record.babies.value(),
    ) {
        (Some(adults), Some(children), Some(babies)) => {
            u64::from(adults) + u64::from(children) + u64::from(babies)
        }
        _ => 0,
    }
}

/// Records arriving within `range`, in input order. Records without a valid
/// arrival date never match.
pub fn filter_by_range(records: &[BookingRecord], range: DateRange) -> Vec<&BookingRecord> {
    if range.start > range.end {
        debug!(start = %range.start, end = %range.end, "inverted range matches nothing");
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| resolve_date(record).is_some_and(|date| range.contains(date)))
        .collect()
}

pub fn aggregate_by_day<'a, I>(records: I) -> Vec<DailySeriesPoint>
where
    I: IntoIterator<Item = &'a BookingRecord>,
{
    // NaiveDate orders the same way as its YYYY-MM-DD key.
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        let Some(date) = resolve_date(record) else {
            continue;
        };
        let total = days.entry(date).or_default();
        *total = total.saturating_add(occupant_total(record));
    }

    days.into_iter()
        .map(|(date, total_visitors)| DailySeriesPoint {
            date: day_key(date),
            timestamp: start_of_day_millis(date),
            total_visitors,
        })
        .collect()
}

pub fn aggregate_by_country<'a, I>(records: I) -> Vec<CountrySeriesEntry>
where
    I: IntoIterator<Item = &'a BookingRecord>,
{
    let mut entries: Vec<CountrySeriesEntry> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        let total = occupant_total(record);
        let position = *positions.entry(record.country.as_str()).or_insert_with(|| {
            entries.push(CountrySeriesEntry {
                country: record.country.clone(),
                total_visitors: 0,
            });
            entries.len() - 1
        });
        let entry = &mut entries[position];
        entry.total_visitors = entry.total_visitors.saturating_add(total);
    }

    entries
}

/// One count per record, in order, with malformed values drawn as 0.
pub fn sparkline<'a, I, F>(records: I, pick: F) -> Vec<u64>
where
    I: IntoIterator<Item = &'a BookingRecord>,
    F: Fn(&BookingRecord) -> &Field<u32>,
{
    records
        .into_iter()
        .map(|record| pick(record).value().map(u64::from).unwrap_or(0))
        .collect()
}

pub fn build_dashboard(records: &[BookingRecord], range: DateRange) -> DashboardSnapshot {
    let filtered = filter_by_range(records, range);
    debug!(
        start = %range.start,
        end = %range.end,
        matched = filtered.len(),
        total = records.len(),
        "filtered bookings"
    );

    DashboardSnapshot {
        start: day_key(range.start),
        end: day_key(range.end),
        record_count: filtered.len(),
        daily: aggregate_by_day(filtered.iter().copied()),
        countries: aggregate_by_country(filtered.iter().copied()),
        adults: sparkline(filtered.iter().copied(), |record| &record.adults),
        children: sparkline(filtered.iter().copied(), |record| &record.children),
    }
}
