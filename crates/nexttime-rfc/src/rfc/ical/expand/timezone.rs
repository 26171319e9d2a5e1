//! Timezone resolution and UTC conversion for iCalendar date-times.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and timezone canonicalization,
//! and the `chrono-tz` database for the zones themselves.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::{TZ_VARIANTS, Tz};
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

/// Immutable lookup table from timezone identifiers and city names to zones.
///
/// Built once with [`TimeZoneResolver::builtin`] and shared read-only, usually
/// behind an `Arc`. Lookups never mutate the table, so concurrent callers need
/// no locking.
#[derive(Debug, Clone)]
pub struct TimeZoneResolver {
    /// Lowercased IANA identifier to zone.
    by_name: HashMap<String, Tz>,
    /// Lowercased city name (last identifier segment, `_` as space) to zone.
    by_city: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    /// ## Summary
    /// Builds the resolver from the bundled IANA database.
    ///
    /// When two identifiers share a city name the alphabetically first one wins.
    #[must_use]
    pub fn builtin() -> Self {
        let mut by_name = HashMap::with_capacity(TZ_VARIANTS.len());
        let mut by_city = HashMap::with_capacity(TZ_VARIANTS.len());

        for tz in TZ_VARIANTS {
            let name = tz.name();
            by_name.insert(name.to_ascii_lowercase(), tz);
            if let Some((_, city)) = name.rsplit_once('/') {
                by_city.entry(city_key(city)).or_insert(tz);
            }
        }

        tracing::debug!(
            zones = by_name.len(),
            cities = by_city.len(),
            "Built timezone table"
        );

        Self { by_name, by_city }
    }

    /// ## Summary
    /// Resolves a timezone identifier or city name.
    ///
    /// Tries, in order: the exact IANA identifier, the identifier ignoring
    /// case, the ICU-normalized identifier (vendor prefixes, Windows names and
    /// aliases), and finally a city name such as `new york` or `Tokyo`.
    ///
    /// Returns `None` when nothing matches; callers choose the fallback.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<Tz> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        if let Ok(tz) = Tz::from_str(id) {
            return Some(tz);
        }

        if let Some(tz) = self.by_name.get(&id.to_ascii_lowercase()) {
            return Some(*tz);
        }

        let normalized = normalize_tzid(id);
        if let Some(tz) = self.by_name.get(&normalized.to_ascii_lowercase()) {
            tracing::trace!(tzid = id, normalized = %normalized, "Resolved normalized timezone");
            return Some(*tz);
        }

        let city = self.by_city.get(&city_key(&normalized)).copied();
        if city.is_none() {
            tracing::debug!(tzid = id, "Unknown timezone");
        }
        city
    }
}

impl Default for TimeZoneResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

fn city_key(city: &str) -> String {
    city.trim().replace('_', " ").to_lowercase()
}

/// Normalizes common iCalendar timezone identifiers to IANA names.
///
/// Strips the `/mozilla.org/` and `/softwarestudio.org/` prefixes, maps Windows
/// zone names through ICU4X and canonicalizes IANA aliases. Unrecognized input
/// is returned without the prefix.
#[must_use]
pub fn normalize_tzid(tzid: &str) -> String {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    let iana_parser = IanaParserExtended::new();

    if let Some(tz) = WindowsParser::new().parse(stripped, None) {
        // Map the BCP-47 zone back to its canonical IANA name
        if let Some(entry) = iana_parser.iter().find(|entry| entry.time_zone == tz) {
            return entry.canonical.to_string();
        }
    }

    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Attaches a timezone to a wall-clock time.
///
/// A time inside a DST fold takes the earlier of the two instants. A time
/// inside a DST gap is shifted forward by one hour.
#[must_use]
pub fn localize(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => {
            let shifted = local + chrono::Duration::hours(1);
            tracing::trace!(%local, %shifted, tz = tz.name(), "Shifted time out of DST gap");
            tz.from_local_datetime(&shifted).earliest()
        }
    }
}

/// Converts a wall-clock time in `tz` to UTC, with the DST handling of [`localize`].
#[must_use]
pub fn to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    localize(local, tz).map(|dt| dt.with_timezone(&Utc))
}
