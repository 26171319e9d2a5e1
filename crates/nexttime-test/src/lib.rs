//! nexttime - integration test support.
//!
//! Re-exports the workspace crates under one path and provides a small
//! builder for schedule calendars.

pub use nexttime_core::config;
pub use nexttime_rfc as rfc;
pub use nexttime_service::schedule;

/// Builds a one-event calendar from raw property lines.
///
/// Each line is written as given (`"DTSTART:20240101T090000Z"`), CRLF
/// terminated, inside `VCALENDAR`/`VEVENT`.
#[derive(Debug, Clone, Default)]
pub struct CalendarBuilder {
    lines: Vec<String>,
}

impl CalendarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a calendar with the given DTSTART line.
    #[must_use]
    pub fn starting(dtstart: &str) -> Self {
        Self::new().line(dtstart)
    }

    #[must_use]
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    #[must_use]
    pub fn rule(self, rule: &str) -> Self {
        self.line(&format!("RRULE:{rule}"))
    }

    #[must_use]
    pub fn exclude(self, value: &str) -> Self {
        self.line(&format!("EXDATE:{value}"))
    }

    #[must_use]
    pub fn exclude_day(self, value: &str) -> Self {
        self.line(&format!("EXDATE;VALUE=DATE:{value}"))
    }

    #[must_use]
    pub fn add(self, value: &str) -> Self {
        self.line(&format!("RDATE:{value}"))
    }

    #[must_use]
    pub fn build(&self) -> String {
        let mut text = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n");
        text.push_str("PRODID:-//nexttime//tests//EN\r\nBEGIN:VEVENT\r\n");
        for line in &self.lines {
            text.push_str(line);
            text.push_str("\r\n");
        }
        text.push_str("END:VEVENT\r\nEND:VCALENDAR\r\n");
        text
    }
}
