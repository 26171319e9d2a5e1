//! Timezone resolution and local-to-UTC conversion.

mod timezone;

pub use timezone::{TimeZoneResolver, localize, normalize_tzid, to_utc};
