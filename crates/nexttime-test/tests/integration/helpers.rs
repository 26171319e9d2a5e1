use chrono::{DateTime, TimeZone, Utc};
use nexttime_test::schedule::{Direction, ScheduleResolver};

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("Invalid UTC timestamp in test")
}

pub fn next(resolver: &ScheduleResolver, text: &str, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
    resolver
        .resolve(text, Some(reference), None, Direction::Next)
        .expect("Schedule should resolve")
}

pub fn previous(
    resolver: &ScheduleResolver,
    text: &str,
    reference: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    resolver
        .resolve(text, Some(reference), None, Direction::Previous)
        .expect("Schedule should resolve")
}

/// Hourly references from `from` (inclusive) for `hours` hours.
pub fn hourly(from: DateTime<Utc>, hours: i64) -> impl Iterator<Item = DateTime<Utc>> {
    (0..hours).map(move |hour| from + chrono::Duration::hours(hour))
}
