use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::TimeValue;

/// ## Summary
/// Returns whether `candidate` equals any entry of `set`.
///
/// Date-only entries match any instant on that day in `tz`. Date-time entries
/// match the exact instant, with floating entries read in `tz`.
#[must_use]
pub fn matches(candidate: DateTime<Utc>, set: &[TimeValue], tz: Tz) -> bool {
    let local_day = candidate.with_timezone(&tz).date_naive();

    set.iter().any(|entry| match entry {
        TimeValue::Date(day) => *day == local_day,
        TimeValue::DateTime { .. } => entry.to_utc(tz) == Some(candidate),
    })
}
