//! Date-set collection from a VEVENT's EXDATE and RDATE properties.

use nexttime_rfc::rfc::ical::core::{Component, ComponentKind, Property, Value, names};
use nexttime_rfc::rfc::ical::expand::TimeZoneResolver;

use super::TimeValue;
use crate::error::{ServiceError, ServiceResult};

/// Which date-list property to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSetKind {
    /// EXDATE: instants or whole days to skip.
    Exclusion,
    /// RDATE: extra one-off occurrences.
    Addition,
}

impl DateSetKind {
    /// The iCalendar property carrying this kind.
    #[must_use]
    pub const fn property_name(self) -> &'static str {
        match self {
            Self::Exclusion => names::EXDATE,
            Self::Addition => names::RDATE,
        }
    }
}

/// ## Summary
/// Collects every EXDATE or RDATE value of `event`, in property order.
///
/// Duplicates are kept. RDATE periods contribute their start; RDATE dates
/// become floating midnight, so additions are always date-times. EXDATE dates
/// stay date-only.
///
/// ## Errors
/// - `UnexpectedComponent` if `event` is not a VEVENT.
/// - `InvalidValue` for a value that is not a real calendar date.
/// - `ResourceExhausted` if the collection cannot be allocated; nothing
///   partial is returned.
#[tracing::instrument(skip(event, zones), fields(uid = event.uid()))]
pub fn collect(
    event: &Component,
    kind: DateSetKind,
    zones: &TimeZoneResolver,
) -> ServiceResult<Vec<TimeValue>> {
    if !event.is(ComponentKind::Event) {
        return Err(ServiceError::UnexpectedComponent(event.name.clone()));
    }

    let property = kind.property_name();
    let props: Vec<&Property> = event.get_properties(property).collect();
    let total = props.iter().map(|prop| entry_count(&prop.value)).sum();

    let mut values = Vec::new();
    values
        .try_reserve_exact(total)
        .map_err(|_reserve| ServiceError::ResourceExhausted(property))?;

    for prop in props {
        let before = values.len();
        push_values(&mut values, prop, zones)?;
        if values.len() == before {
            tracing::warn!(
                property,
                raw = %prop.raw_value,
                "Ignoring value that is not a date, date-time or period"
            );
        }
    }

    if kind == DateSetKind::Addition {
        for value in &mut values {
            *value = value.at_midnight();
        }
    }

    tracing::trace!(property, count = values.len(), "Collected date set");
    Ok(values)
}

fn entry_count(value: &Value) -> usize {
    match value {
        Value::Date(_) | Value::DateTime(_) | Value::Period(_) => 1,
        Value::DateList(list) => list.len(),
        Value::DateTimeList(list) => list.len(),
        Value::PeriodList(list) => list.len(),
        _ => 0,
    }
}

fn push_values(
    values: &mut Vec<TimeValue>,
    prop: &Property,
    zones: &TimeZoneResolver,
) -> ServiceResult<()> {
    let invalid = || ServiceError::InvalidValue {
        property: if prop.name == names::EXDATE {
            names::EXDATE
        } else {
            names::RDATE
        },
        value: prop.raw_value.clone(),
    };

    match &prop.value {
        Value::Date(date) => values.push(TimeValue::from_ical_date(*date).ok_or_else(invalid)?),
        Value::DateList(dates) => {
            for date in dates {
                values.push(TimeValue::from_ical_date(*date).ok_or_else(invalid)?);
            }
        }
        Value::DateTime(dt) => {
            values.push(TimeValue::from_ical_datetime(dt, zones).ok_or_else(invalid)?);
        }
        Value::DateTimeList(dts) => {
            for dt in dts {
                values.push(TimeValue::from_ical_datetime(dt, zones).ok_or_else(invalid)?);
            }
        }
        Value::Period(period) => {
            values.push(TimeValue::from_ical_datetime(period.start(), zones).ok_or_else(invalid)?);
        }
        Value::PeriodList(periods) => {
            for period in periods {
                values.push(
                    TimeValue::from_ical_datetime(period.start(), zones).ok_or_else(invalid)?,
                );
            }
        }
        _ => {}
    }

    Ok(())
}
