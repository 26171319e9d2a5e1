use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use nexttime_rfc::rfc::ical::core::{Component, Value, names};
use nexttime_rfc::rfc::ical::expand::TimeZoneResolver;

use super::{
    DateSetKind, Direction, RecurrenceRule, TimeValue, anchor_candidates, collect, matches, merge,
    nearest, resolve_candidates,
};
use crate::error::{ServiceError, ServiceResult};

/// A schedule read from one VEVENT, ready to be resolved.
///
/// Built fresh for every resolution and owned by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// DTSTART, the recurrence anchor.
    pub start: TimeValue,
    /// RRULE text, if the event has a non-empty one.
    pub rule: Option<String>,
    /// EXDATE values in property order.
    pub exclusions: Vec<TimeValue>,
    /// RDATE values in property order, always date-times.
    pub additions: Vec<TimeValue>,
    /// The one timezone the whole schedule is resolved in.
    pub timezone: Tz,
}

impl Schedule {
    /// ## Summary
    /// Reads a schedule from `event`.
    ///
    /// The timezone is DTSTART's own (`Z` or a known TZID), else
    /// `default_timezone` when it resolves, else UTC.
    ///
    /// ## Errors
    /// - `UnexpectedComponent` if `event` is not a VEVENT.
    /// - `MissingStart` if DTSTART is absent or not a date or date-time.
    /// - `InvalidValue` or `ResourceExhausted` from collecting EXDATE/RDATE.
    pub fn from_event(
        event: &Component,
        zones: &TimeZoneResolver,
        default_timezone: Option<&str>,
    ) -> ServiceResult<Self> {
        let exclusions = collect(event, DateSetKind::Exclusion, zones)?;
        let additions = collect(event, DateSetKind::Addition, zones)?;

        let start = event
            .get_property(names::DTSTART)
            .and_then(|prop| match &prop.value {
                Value::DateTime(dt) => TimeValue::from_ical_datetime(dt, zones),
                Value::Date(date) => TimeValue::from_ical_date(*date),
                _ => None,
            })
            .ok_or(ServiceError::MissingStart)?;

        let rule = event.get_property(names::RRULE).and_then(|prop| {
            let text = prop.as_recur().unwrap_or(&prop.raw_value).trim();
            (!text.is_empty()).then(|| text.to_string())
        });

        let timezone = start
            .zone()
            .or_else(|| {
                let id = default_timezone?;
                let tz = zones.resolve(id);
                if tz.is_none() {
                    tracing::warn!(tzid = id, "Unknown default timezone, using UTC");
                }
                tz
            })
            .unwrap_or(Tz::UTC);

        tracing::debug!(
            %start,
            rule = rule.as_deref(),
            exclusions = exclusions.len(),
            additions = additions.len(),
            timezone = timezone.name(),
            "Read schedule"
        );

        Ok(Self {
            start,
            rule,
            exclusions,
            additions,
            timezone,
        })
    }

    /// ## Summary
    /// Resolves the occurrence nearest to `reference` in `direction`.
    ///
    /// Rule occurrences (or the start alone, without a rule or with one that
    /// never fires) and additions are searched separately, both skipping
    /// excluded instants, and the closer of the two results wins.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if the RRULE does not parse or validate.
    pub fn resolve(
        &self,
        reference: DateTime<Utc>,
        direction: Direction,
    ) -> ServiceResult<Option<DateTime<Utc>>> {
        let tz = self.timezone;
        let start = self
            .start
            .to_utc(tz)
            .ok_or_else(|| ServiceError::InvalidValue {
                property: names::DTSTART,
                value: self.start.to_string(),
            })?;

        tracing::trace!(
            reference = %reference.with_timezone(&tz),
            start = %start.with_timezone(&tz),
            "Resolving in schedule timezone"
        );

        let is_excluded = |instant: DateTime<Utc>| matches(instant, &self.exclusions, tz);

        let candidates = match &self.rule {
            None => anchor_candidates(start, reference, is_excluded),
            Some(text) => {
                let rule = RecurrenceRule::parse(text, start, tz)?;
                if rule.is_empty() {
                    tracing::debug!(rule = %text, "Rule has no occurrences, using the start alone");
                    anchor_candidates(start, reference, is_excluded)
                } else {
                    resolve_candidates(rule.occurrences(), reference, is_excluded)
                }
            }
        };

        let additions: Vec<TimeValue> = self
            .additions
            .iter()
            .copied()
            .filter(|value| value.to_utc(tz).is_none_or(|instant| !is_excluded(instant)))
            .collect();

        let from_rule = candidates.get(direction);
        let from_additions = nearest(&additions, reference, direction, tz);
        let resolved = merge(direction, from_rule, from_additions);

        tracing::debug!(
            %direction,
            from_rule = ?from_rule,
            from_additions = ?from_additions,
            resolved = ?resolved,
            "Merged schedule candidates"
        );
        Ok(resolved)
    }
}
