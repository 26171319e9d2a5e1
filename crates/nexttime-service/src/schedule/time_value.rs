//! Calendar instants that may be date-only, floating, UTC or zoned.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use nexttime_rfc::rfc::ical::core::{Date, DateTime as IcalDateTime, DateTimeForm};
use nexttime_rfc::rfc::ical::expand::{TimeZoneResolver, to_utc};

/// Timezone binding of a date-time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Wall-clock time, read in whatever timezone the schedule resolves to.
    Floating,
    /// Absolute UTC time.
    Utc,
    /// Wall-clock time in a named zone.
    Named(Tz),
}

/// A schedule instant as written in the calendar.
///
/// Absence is modelled with `Option<TimeValue>`; there is no null value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeValue {
    /// A whole day. Compared at date granularity, ignoring time and zone.
    Date(NaiveDate),
    /// A date and time of day with its zone binding.
    DateTime { local: NaiveDateTime, zone: Zone },
}

impl TimeValue {
    /// A UTC date-time at the given instant.
    #[must_use]
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self::DateTime {
            local: instant.naive_utc(),
            zone: Zone::Utc,
        }
    }

    /// A floating date-time.
    #[must_use]
    pub fn floating(local: NaiveDateTime) -> Self {
        Self::DateTime {
            local,
            zone: Zone::Floating,
        }
    }

    /// ## Summary
    /// Converts a parsed DATE-TIME.
    ///
    /// A TZID the resolver does not know degrades to floating time, which is
    /// then read in the schedule's timezone.
    ///
    /// Returns `None` if the value is not a real calendar date.
    #[must_use]
    pub fn from_ical_datetime(dt: &IcalDateTime, zones: &TimeZoneResolver) -> Option<Self> {
        let local = dt.to_naive()?;
        let zone = match &dt.form {
            DateTimeForm::Utc => Zone::Utc,
            DateTimeForm::Floating => Zone::Floating,
            DateTimeForm::Zoned { tzid } => zones.resolve(tzid).map_or_else(
                || {
                    tracing::warn!(tzid = %tzid, "Unknown TZID, reading time as floating");
                    Zone::Floating
                },
                Zone::Named,
            ),
        };
        Some(Self::DateTime { local, zone })
    }

    /// Converts a parsed DATE. Returns `None` if the date does not exist.
    #[must_use]
    pub fn from_ical_date(date: Date) -> Option<Self> {
        date.to_naive().map(Self::Date)
    }

    /// Returns whether this is a date-only value.
    #[must_use]
    pub fn is_date_only(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// The calendar date as written.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime { local, .. } => local.date(),
        }
    }

    /// The timezone this value carries, if any. Date-only and floating values
    /// carry none.
    #[must_use]
    pub fn zone(&self) -> Option<Tz> {
        match self {
            Self::DateTime {
                zone: Zone::Utc, ..
            } => Some(Tz::UTC),
            Self::DateTime {
                zone: Zone::Named(tz),
                ..
            } => Some(*tz),
            _ => None,
        }
    }

    /// Promotes a date-only value to floating midnight; date-times are unchanged.
    #[must_use]
    pub fn at_midnight(self) -> Self {
        match self {
            Self::Date(date) => Self::floating(date.and_time(NaiveTime::MIN)),
            other => other,
        }
    }

    /// ## Summary
    /// Resolves this value to an absolute instant.
    ///
    /// Date-only values mean local midnight. Date-only and floating values are
    /// read in `tz`; UTC and named zones ignore it.
    ///
    /// Returns `None` only if the local time cannot be placed in the zone.
    #[must_use]
    pub fn to_utc(&self, tz: Tz) -> Option<DateTime<Utc>> {
        match *self {
            Self::Date(date) => to_utc(date.and_time(NaiveTime::MIN), tz),
            Self::DateTime {
                local,
                zone: Zone::Utc,
            } => Some(local.and_utc()),
            Self::DateTime {
                local,
                zone: Zone::Floating,
            } => to_utc(local, tz),
            Self::DateTime {
                local,
                zone: Zone::Named(named),
            } => to_utc(local, named),
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y%m%d")),
            Self::DateTime { local, zone } => {
                write!(f, "{}", local.format("%Y%m%dT%H%M%S"))?;
                match zone {
                    Zone::Floating => Ok(()),
                    Zone::Utc => write!(f, "Z"),
                    Zone::Named(tz) => write!(f, " ({})", tz.name()),
                }
            }
        }
    }
}
