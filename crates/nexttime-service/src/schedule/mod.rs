//! Next/previous fire time resolution for calendar-based schedules.
//!
//! A schedule is the first VEVENT of an iCalendar document: its DTSTART anchors
//! an optional RRULE, EXDATE values remove occurrences and RDATE values add
//! one-off ones. [`ScheduleResolver`] turns such a document and a reference
//! instant into the nearest occurrence before or after it.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use nexttime_service::schedule::{Direction, ScheduleResolver};
//!
//! let calendar = "BEGIN:VCALENDAR\r\n\
//! BEGIN:VEVENT\r\n\
//! DTSTART:20240101T090000Z\r\n\
//! RRULE:FREQ=DAILY\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let resolver = ScheduleResolver::builtin();
//! let reference = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
//! let next = resolver
//!     .resolve(calendar, Some(reference), None, Direction::Next)
//!     .unwrap();
//! assert_eq!(next, Some(Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap()));
//! ```

mod additions;
mod collect;
mod compat;
mod definition;
mod direction;
mod matcher;
mod recurrence;
mod resolver;
mod time_value;

pub use additions::{merge, nearest};
pub use collect::{DateSetKind, collect};
pub use compat::next_time_ical;
pub use definition::Schedule;
pub use direction::Direction;
pub use matcher::matches;
pub use recurrence::{Candidates, RecurrenceRule, anchor_candidates, resolve_candidates};
pub use resolver::ScheduleResolver;
pub use time_value::{TimeValue, Zone};
