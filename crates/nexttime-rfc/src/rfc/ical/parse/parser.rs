//! Builds the component tree from unfolded content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use super::values::{parse_date, parse_datetime, parse_period, unescape_text};
use crate::rfc::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Property, Value};

/// Parses an iCalendar document whose root must be a single VCALENDAR.
///
/// ## Errors
/// Returns the first lexing, nesting or value error, with its line. Content
/// after `END:VCALENDAR` is an error as well.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let lines = split_lines(input);
    tracing::trace!(count = lines.len(), "Unfolded content lines");

    // Components whose END has not been seen yet, innermost last
    let mut open: Vec<Component> = Vec::new();
    let mut root: Option<Component> = None;
    let mut last_line = 1;

    for (line_num, text) in lines {
        last_line = line_num;
        let cl = parse_content_line(&text, line_num)?;

        if root.is_some() {
            return Err(ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                .with_context("content after END:VCALENDAR"));
        }

        match cl.name.as_str() {
            "BEGIN" => open.push(Component::named(cl.raw_value.trim().to_ascii_uppercase())),
            "END" => {
                let end_name = cl.raw_value.trim().to_ascii_uppercase();
                let Some(closed) = open.pop() else {
                    return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                        .with_context(format!("END:{end_name} without BEGIN")));
                };
                if closed.name != end_name {
                    let expected = &closed.name;
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!("expected END:{expected}, got END:{end_name}")),
                    );
                }
                match open.last_mut() {
                    Some(parent) => parent.add_child(closed),
                    None => root = Some(closed),
                }
            }
            _ => {
                let Some(current) = open.last_mut() else {
                    return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                        .with_context(format!("{} outside any component", cl.name)));
                };
                current.add_property(parse_property(cl, line_num)?);
            }
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(ParseError::new(ParseErrorKind::MissingEnd, last_line, 1)
            .with_context(format!("missing END:{}", unclosed.name)));
    }

    let root = root.ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))?;
    if !root.is(ComponentKind::Calendar) {
        tracing::warn!(root = %root.name, "Root component is not VCALENDAR");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1)
            .with_context("expected VCALENDAR"));
    }

    tracing::debug!(children = root.children.len(), "Parsed iCalendar document");
    Ok(ICalendar { root })
}

fn parse_property(cl: ContentLine, line_num: usize) -> ParseResult<Property> {
    let kind = ValueKind::for_line(&cl);
    let value = kind.parse(&cl.raw_value, cl.tzid(), line_num)?;
    Ok(cl.into_property(value))
}

/// How a raw value is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Date,
    DateTime,
    Period,
    Recur,
    Text,
    Uri,
    Unknown,
}

impl ValueKind {
    /// `VALUE=` wins; otherwise the property's default, with DATE/DATE-TIME
    /// properties typed leniently by the shape of their (first) value.
    fn for_line(cl: &ContentLine) -> Self {
        if let Some(explicit) = cl.value_type() {
            return match explicit.to_ascii_uppercase().as_str() {
                "DATE" => Self::Date,
                "DATE-TIME" => Self::DateTime,
                "PERIOD" => Self::Period,
                "RECUR" => Self::Recur,
                "TEXT" => Self::Text,
                "URI" | "CAL-ADDRESS" => Self::Uri,
                _ => Self::Unknown,
            };
        }

        let first = cl.raw_value.split(',').next().unwrap_or_default().trim();
        let date_shaped = first.len() == 8 && !first.contains('T');

        match cl.name.as_str() {
            "DTSTART" | "DTEND" | "DUE" | "DTSTAMP" | "CREATED" | "LAST-MODIFIED"
            | "RECURRENCE-ID" => {
                if date_shaped {
                    Self::Date
                } else {
                    Self::DateTime
                }
            }
            "EXDATE" | "RDATE" if first.contains('/') => Self::Period,
            "EXDATE" | "RDATE" if date_shaped => Self::Date,
            "EXDATE" | "RDATE" => Self::DateTime,
            "RRULE" | "EXRULE" => Self::Recur,
            "URL" | "TZURL" | "SOURCE" | "ATTENDEE" | "ORGANIZER" => Self::Uri,
            _ => Self::Text,
        }
    }

    /// Types `raw`; DATE, DATE-TIME and PERIOD values with commas become lists.
    fn parse(self, raw: &str, tzid: Option<&str>, line_num: usize) -> ParseResult<Value> {
        match self {
            Self::Date => one_or_list(
                raw,
                |s| parse_date(s, line_num, 1),
                Value::Date,
                Value::DateList,
            ),
            Self::DateTime => one_or_list(
                raw,
                |s| parse_datetime(s, tzid, line_num, 1),
                Value::DateTime,
                Value::DateTimeList,
            ),
            Self::Period => one_or_list(
                raw,
                |s| parse_period(s, tzid, line_num, 1),
                Value::Period,
                Value::PeriodList,
            ),
            Self::Recur => Ok(Value::Recur(raw.trim().to_string())),
            Self::Text => Ok(Value::Text(unescape_text(raw))),
            Self::Uri => Ok(Value::Uri(raw.to_string())),
            Self::Unknown => Ok(Value::Unknown(raw.to_string())),
        }
    }
}

fn one_or_list<T>(
    raw: &str,
    parse_one: impl Fn(&str) -> ParseResult<T>,
    one: fn(T) -> Value,
    list: fn(Vec<T>) -> Value,
) -> ParseResult<Value> {
    if raw.contains(',') {
        raw.split(',')
            .map(|part| parse_one(part.trim()))
            .collect::<ParseResult<Vec<T>>>()
            .map(list)
    } else {
        parse_one(raw.trim()).map(one)
    }
}
