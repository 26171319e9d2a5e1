//! iCalendar RFC 5545 support for schedule definitions.
//!
//! - `core`: Type definitions for iCalendar structures
//! - `parse`: Parsers for iCalendar content
//! - `expand`: Timezone resolution and local-to-UTC conversion
//!
//! ## Example
//!
//! ```rust
//! use nexttime_rfc::rfc::ical::parse;
//!
//! let input = "BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! BEGIN:VEVENT\r\n\
//! DTSTART:20240101T090000Z\r\n\
//! RRULE:FREQ=DAILY\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let ical = parse(input).unwrap();
//! assert_eq!(ical.events().len(), 1);
//! ```

pub mod core;
pub mod expand;
pub mod parse;

#[cfg(test)]
mod tests;

pub use self::core::{Component, ComponentKind, ICalendar, Parameter, Property};
pub use parse::{ParseError, ParseResult, parse};
