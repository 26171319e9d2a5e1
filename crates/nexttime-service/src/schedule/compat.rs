use chrono::{DateTime, Utc};

use super::{Direction, ScheduleResolver};

/// ## Summary
/// Resolves a schedule and reports the result as Unix seconds, `0` for
/// anything other than a found time.
///
/// Mirrors the SQL-callable form: `reference` defaults to now, `zone` is the
/// default timezone, and `periods_offset` defaults to `0` (next) with `-1`
/// meaning previous. Any other offset returns `0` without parsing the
/// calendar. Callers must read `0` as "never fires in that direction";
/// use [`ScheduleResolver::resolve`] to tell failures from "no occurrence".
#[must_use]
#[tracing::instrument(skip(resolver, text), fields(text_len = text.len()))]
pub fn next_time_ical(
    resolver: &ScheduleResolver,
    text: &str,
    reference: Option<i64>,
    zone: Option<&str>,
    periods_offset: Option<i32>,
) -> i64 {
    let direction = match Direction::try_from(periods_offset.unwrap_or(0)) {
        Ok(direction) => direction,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected direction");
            return 0;
        }
    };

    let reference = match reference {
        None => None,
        Some(seconds) => match DateTime::<Utc>::from_timestamp(seconds, 0) {
            Some(instant) => Some(instant),
            None => {
                tracing::warn!(seconds, "Reference time out of range");
                return 0;
            }
        },
    };

    match resolver.resolve(text, reference, zone, direction) {
        Ok(Some(instant)) => instant.timestamp(),
        Ok(None) => {
            tracing::debug!(%direction, "Schedule has no occurrence in that direction");
            0
        }
        Err(err) => {
            tracing::warn!(error = %err, "Could not resolve schedule");
            0
        }
    }
}
