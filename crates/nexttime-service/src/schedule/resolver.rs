use std::sync::Arc;

use chrono::{DateTime, Utc};
use nexttime_core::config::Settings;
use nexttime_rfc::rfc::ical::expand::TimeZoneResolver;
use nexttime_rfc::rfc::ical::parse::parse;

use super::{Direction, Schedule};
use crate::error::{ServiceError, ServiceResult};

/// Resolves schedule documents against a shared, read-only timezone table.
///
/// Holds no per-call state; one resolver can serve any number of callers.
#[derive(Debug, Clone)]
pub struct ScheduleResolver {
    zones: Arc<TimeZoneResolver>,
    default_timezone: Option<String>,
}

impl ScheduleResolver {
    /// Creates a resolver over an existing timezone table.
    #[must_use]
    pub fn new(zones: Arc<TimeZoneResolver>) -> Self {
        Self {
            zones,
            default_timezone: None,
        }
    }

    /// Creates a resolver over the bundled timezone database.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Arc::new(TimeZoneResolver::builtin()))
    }

    /// ## Summary
    /// Creates a resolver using the configured default timezone.
    ///
    /// ## Errors
    /// Returns `CoreError` if the settings do not validate.
    pub fn from_settings(zones: Arc<TimeZoneResolver>, settings: &Settings) -> ServiceResult<Self> {
        settings.validate()?;
        Ok(Self::new(zones).with_default_timezone(settings.schedule.default_timezone.clone()))
    }

    /// Sets the timezone used when neither DTSTART nor the caller names one.
    #[must_use]
    pub fn with_default_timezone(mut self, default_timezone: Option<String>) -> Self {
        self.default_timezone = default_timezone;
        self
    }

    /// The timezone table this resolver reads.
    #[must_use]
    pub fn zones(&self) -> &TimeZoneResolver {
        &self.zones
    }

    /// ## Summary
    /// Parses `text` and reads the schedule from its first VEVENT.
    ///
    /// `default_timezone` overrides the resolver's configured default.
    ///
    /// ## Errors
    /// - `RfcError` if the text is not valid iCalendar.
    /// - `MissingEvent` if the calendar has no VEVENT.
    /// - Anything [`Schedule::from_event`] reports.
    pub fn schedule(&self, text: &str, default_timezone: Option<&str>) -> ServiceResult<Schedule> {
        let calendar = parse(text)?;
        let event = calendar.first_event().ok_or(ServiceError::MissingEvent)?;
        let default_timezone = default_timezone.or(self.default_timezone.as_deref());

        Schedule::from_event(event, &self.zones, default_timezone)
    }

    /// ## Summary
    /// Resolves the fire time of the schedule in `text` nearest to `reference`.
    ///
    /// `reference` defaults to now. Returns `Ok(None)` when the schedule never
    /// fires in `direction`.
    ///
    /// ## Errors
    /// Returns an error for malformed calendars, a missing VEVENT or DTSTART,
    /// and invalid recurrence rules.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn resolve(
        &self,
        text: &str,
        reference: Option<DateTime<Utc>>,
        default_timezone: Option<&str>,
        direction: Direction,
    ) -> ServiceResult<Option<DateTime<Utc>>> {
        let reference = reference.unwrap_or_else(Utc::now);
        let schedule = self.schedule(text, default_timezone)?;
        schedule.resolve(reference, direction)
    }
}

impl Default for ScheduleResolver {
    fn default() -> Self {
        Self::builtin()
    }
}
