//! iCalendar DATE and PERIOD value types (RFC 5545 §3.3.4, §3.3.9).

use std::fmt;

use chrono::NaiveDate;

use super::DateTime;

/// DATE value (RFC 5545 §3.3.4).
///
/// A calendar date without time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    /// Year (e.g., 2026).
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
}

impl Date {
    /// Creates a new date.
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Returns the date as a `chrono::NaiveDate`, or `None` if it does not exist.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// End of a PERIOD value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodEnd {
    /// Explicit end DATE-TIME.
    Explicit(DateTime),
    /// Duration from the start, kept as written (e.g. `PT2H`).
    Duration(String),
}

/// PERIOD value (RFC 5545 §3.3.9).
///
/// A precise period of time, defined by a start DATE-TIME and either an
/// explicit end or a duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    /// Start of the period (must be DATE-TIME, not DATE).
    pub start: DateTime,
    /// End of the period.
    pub end: PeriodEnd,
}

impl Period {
    /// Returns the start of the period.
    #[must_use]
    pub fn start(&self) -> &DateTime {
        &self.start
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            PeriodEnd::Explicit(end) => write!(f, "{}/{end}", self.start),
            PeriodEnd::Duration(duration) => write!(f, "{}/{duration}", self.start),
        }
    }
}

/// Value types (RFC 5545 §3.3).
///
/// This enum represents the parsed value of a property. The raw string
/// is preserved separately on the property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// DATE value.
    Date(Date),
    /// Comma-separated DATE values (EXDATE, RDATE).
    DateList(Vec<Date>),
    /// DATE-TIME value.
    DateTime(DateTime),
    /// Comma-separated DATE-TIME values (EXDATE, RDATE).
    DateTimeList(Vec<DateTime>),
    /// PERIOD value.
    Period(Period),
    /// Comma-separated PERIOD values (RDATE, FREEBUSY).
    PeriodList(Vec<Period>),
    /// RECUR value, kept verbatim for the recurrence-rule engine.
    Recur(String),
    /// TEXT value (unescaped).
    Text(String),
    /// URI or CAL-ADDRESS value.
    Uri(String),
    /// Unknown or unparsed value.
    Unknown(String),
}

impl Value {
    /// Returns this value as text, if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns this value as a date-time, if it is a date-time value.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns this value as a date, if it is a date value.
    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Returns this value as a list of date-times, if it is one.
    #[must_use]
    pub fn as_datetime_list(&self) -> Option<&[DateTime]> {
        match self {
            Self::DateTimeList(list) => Some(list),
            _ => None,
        }
    }

    /// Returns this value as a list of dates, if it is one.
    #[must_use]
    pub fn as_date_list(&self) -> Option<&[Date]> {
        match self {
            Self::DateList(list) => Some(list),
            _ => None,
        }
    }

    /// Returns this value as a list of periods, if it is one.
    #[must_use]
    pub fn as_period_list(&self) -> Option<&[Period]> {
        match self {
            Self::PeriodList(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the rule text, if this is a recur value.
    #[must_use]
    pub fn as_recur(&self) -> Option<&str> {
        match self {
            Self::Recur(r) => Some(r),
            _ => None,
        }
    }

    /// Returns whether this is an unknown/unparsed value.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}
