//! Typed value parsers for the RFC 5545 §3.3 forms schedules use.
//!
//! `line`/`col` only position errors.
#![expect(
    clippy::map_err_ignore,
    reason = "Integer parse errors carry no detail beyond the position already reported"
)]

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{Date, DateTime, DateTimeForm, Period, PeriodEnd, Time};

/// Parses a fixed-width run of ASCII digits.
fn digits<T: std::str::FromStr>(
    s: &str,
    kind: ParseErrorKind,
    line: usize,
    col: usize,
) -> ParseResult<T> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(kind, line, col));
    }
    s.parse::<T>().map_err(|_| ParseError::new(kind, line, col))
}

/// `YYYYMMDD`.
///
/// ## Errors
/// `InvalidDate` for a wrong shape or a day the calendar does not have
/// (`20230229`).
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    if s.len() != 8 || !s.is_ascii() {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col));
    }

    let kind = ParseErrorKind::InvalidDate;
    let year = digits::<u16>(&s[0..4], kind, line, col)?;
    let month = digits::<u8>(&s[4..6], kind, line, col)?;
    let day = digits::<u8>(&s[6..8], kind, line, col)?;

    let date = Date { year, month, day };
    if date.to_naive().is_none() {
        return Err(ParseError::new(kind, line, col).with_context(format!("no such date {s}")));
    }

    Ok(date)
}

/// `HHMMSS` with an optional UTC `Z`.
///
/// ## Errors
/// `InvalidTime` for a wrong shape or an out-of-range field.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<Time> {
    let (time_str, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if time_str.len() != 6 || !time_str.is_ascii() {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col));
    }

    let kind = ParseErrorKind::InvalidTime;
    let hour = digits::<u8>(&time_str[0..2], kind, line, col)?;
    let minute = digits::<u8>(&time_str[2..4], kind, line, col)?;
    let second = digits::<u8>(&time_str[4..6], kind, line, col)?;

    // 60 is a leap second
    if hour > 23 || minute > 59 || second > 60 {
        return Err(ParseError::new(kind, line, col));
    }

    Ok(Time::new(hour, minute, second, is_utc))
}

/// `YYYYMMDD"T"HHMMSS[Z]`.
///
/// `tzid` comes from the property's parameter; a trailing `Z` wins over it.
///
/// ## Errors
/// `InvalidDateTime` without the `T`, otherwise the date or time error.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let (date_str, time_str) = s
        .split_once('T')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let date = parse_date(date_str, line, col)?;
    let time = parse_time(time_str, line, col + date_str.len() + 1)?;

    let form = match (time.is_utc, tzid) {
        (true, _) => DateTimeForm::Utc,
        (false, Some(tz)) => DateTimeForm::Zoned {
            tzid: tz.to_string(),
        },
        (false, None) => DateTimeForm::Floating,
    };

    Ok(DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
        form,
    })
}

/// `start "/" (end | duration)`. Schedules only read the start, so a
/// duration is kept as written.
///
/// ## Errors
/// `InvalidPeriod` without the `/` or with a truncated duration, otherwise the
/// date-time error of either side.
pub fn parse_period(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<Period> {
    let (start_str, end_str) = s
        .split_once('/')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidPeriod, line, col))?;

    let start = parse_datetime(start_str, tzid, line, col)?;
    let end_col = col + start_str.len() + 1;

    let end = if end_str.starts_with(['P', '+', '-']) {
        if end_str.len() < 3 {
            return Err(ParseError::new(ParseErrorKind::InvalidPeriod, line, end_col));
        }
        PeriodEnd::Duration(end_str.to_string())
    } else {
        PeriodEnd::Explicit(parse_datetime(end_str, tzid, line, end_col)?)
    };

    Ok(Period { start, end })
}

/// Undoes TEXT escaping (`\\`, `\,`, `\;`, `\n`/`\N`); unknown escapes stay as written.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(escaped @ (',' | ';' | '\\')) => out.push(escaped),
            None => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}
