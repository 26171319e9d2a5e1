//! Parser tests against schedule-shaped calendars.
