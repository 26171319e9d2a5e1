//! Rule-driven candidate search around a reference instant.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use nexttime_rfc::rfc::ical::expand::to_utc;
use nexttime_rfc::rfc::ical::parse::{parse_date, parse_datetime};
use rrule::{RRule, RRuleError, RRuleSet, Unvalidated, ValidationError};

use super::Direction;
use crate::error::{ServiceError, ServiceResult};

/// A validated recurrence rule anchored at a start instant.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    start: DateTime<Utc>,
    /// `None` for a valid rule that can never fire (UNTIL before DTSTART).
    rule_set: Option<RRuleSet>,
}

impl RecurrenceRule {
    /// ## Summary
    /// Parses `text` (an RRULE value such as `FREQ=DAILY;COUNT=5`) and anchors
    /// it at `start`, expanding wall-clock times in `tz`.
    ///
    /// A DATE or floating UNTIL is read as a wall-clock time in `tz` (a DATE
    /// as the last second of that day).
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidRule` if the rule does not parse or does
    /// not validate against the start. An invalid rule is never treated as an
    /// absent one.
    pub fn parse(text: &str, start: DateTime<Utc>, tz: Tz) -> ServiceResult<Self> {
        let invalid = |reason: String| ServiceError::InvalidRule {
            rule: text.to_string(),
            reason,
        };

        let (text_without_until, local_until) = split_local_until(text);
        let mut rule = text_without_until
            .parse::<RRule<Unvalidated>>()
            .map_err(|err| invalid(err.to_string()))?;
        if let Some(until) = local_until {
            let until = local_until_to_utc(until, tz)
                .ok_or_else(|| invalid(format!("invalid UNTIL value {until:?}")))?;
            rule = rule.until(until.with_timezone(&rrule::Tz::UTC));
        }

        let rule_set = match rule.build(start.with_timezone(&rrule::Tz::Tz(tz))) {
            Ok(rule_set) => Some(rule_set),
            Err(RRuleError::ValidationError(ValidationError::UntilBeforeStart { until, .. })) => {
                tracing::debug!(%until, %start, "Rule ends before it starts");
                None
            }
            Err(err) => return Err(invalid(err.to_string())),
        };

        if let Some(rule_set) = &rule_set {
            tracing::trace!(rule = %rule_set, "Built recurrence rule");
        }
        Ok(Self { start, rule_set })
    }

    /// Returns a fresh ascending iterator over the occurrences, from the first.
    ///
    /// The start is always the first occurrence, even when the rule itself
    /// would not select it. The sequence may be infinite; callers bound it.
    /// The engine gives up on rules that stop producing matches, which ends
    /// the iterator.
    pub fn occurrences(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        let start = self.start;
        let matches = self
            .rule_set
            .iter()
            .flatten()
            .map(|occurrence| occurrence.with_timezone(&Utc))
            .filter(move |&occurrence| occurrence != start);
        self.rule_set
            .is_some()
            .then_some(start)
            .into_iter()
            .chain(matches)
    }

    /// True when the rule generates nothing at all (`COUNT=0`, UNTIL before
    /// the start). Such a rule falls back to the start alone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rule_set
            .as_ref()
            .is_none_or(|rule_set| rule_set.into_iter().next().is_none())
    }
}

/// Removes a UNTIL part without a trailing `Z` from `text`, returning the
/// remaining rule and the removed value.
fn split_local_until(text: &str) -> (String, Option<&str>) {
    let mut local_until = None;
    let rest: Vec<&str> = text
        .split(';')
        .filter(|&part| match part.split_once('=') {
            Some((key, value))
                if key.trim().eq_ignore_ascii_case("UNTIL")
                    && !value.trim().ends_with(['Z', 'z']) =>
            {
                local_until = Some(value.trim());
                false
            }
            _ => true,
        })
        .collect();
    (rest.join(";"), local_until)
}

/// A `YYYYMMDD` or floating `YYYYMMDDTHHMMSS` UNTIL as an instant in `tz`.
fn local_until_to_utc(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let local = if value.contains(['T', 't']) {
        parse_datetime(&value.to_ascii_uppercase(), None, 0, 0)
            .ok()?
            .to_naive()?
    } else {
        parse_date(value, 0, 0)
            .ok()?
            .to_naive()?
            .and_time(NaiveTime::from_hms_opt(23, 59, 59)?)
    };
    to_utc(local, tz)
}

/// The nearest acceptable occurrences on each side of a reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Latest occurrence at or before the reference.
    pub previous: Option<DateTime<Utc>>,
    /// Earliest occurrence strictly after the reference.
    pub next: Option<DateTime<Utc>>,
}

impl Candidates {
    /// The candidate for `direction`.
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<DateTime<Utc>> {
        match direction {
            Direction::Previous => self.previous,
            Direction::Next => self.next,
        }
    }
}

/// ## Summary
/// Candidates for a schedule without a rule: the start itself.
///
/// The start is the previous candidate when strictly before `reference` and the
/// next candidate when strictly after it. A start equal to the reference, or
/// excluded, is neither.
#[must_use]
pub fn anchor_candidates(
    start: DateTime<Utc>,
    reference: DateTime<Utc>,
    is_excluded: impl Fn(DateTime<Utc>) -> bool,
) -> Candidates {
    if is_excluded(start) {
        tracing::trace!(%start, "Start is excluded");
        return Candidates::default();
    }

    Candidates {
        previous: (start < reference).then_some(start),
        next: (start > reference).then_some(start),
    }
}

/// ## Summary
/// Walks an ascending occurrence sequence around `reference`.
///
/// Excluded occurrences are skipped. Every remaining occurrence at or before
/// `reference` replaces the previous candidate; the first one strictly after it
/// becomes the next candidate and ends the walk, so the work is bounded by the
/// occurrences up to the reference even for infinite rules.
pub fn resolve_candidates<I>(
    occurrences: I,
    reference: DateTime<Utc>,
    is_excluded: impl Fn(DateTime<Utc>) -> bool,
) -> Candidates
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut candidates = Candidates::default();
    let mut visited = 0_usize;

    for occurrence in occurrences {
        visited += 1;
        if is_excluded(occurrence) {
            tracing::trace!(%occurrence, "Skipping excluded occurrence");
            continue;
        }
        if occurrence <= reference {
            candidates.previous = Some(occurrence);
        } else {
            candidates.next = Some(occurrence);
            break;
        }
    }

    tracing::debug!(
        visited,
        previous = ?candidates.previous,
        next = ?candidates.next,
        "Resolved rule candidates"
    );
    candidates
}
