use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::{Direction, TimeValue};

/// ## Summary
/// Finds the addition closest to `reference` on the requested side.
///
/// `Previous` takes the latest addition at or before `reference`; `Next` the
/// earliest strictly after it. The scan is linear and ignores list order. Of
/// several entries at the same instant the first one is kept, which makes no
/// difference to the result.
#[must_use]
pub fn nearest(
    additions: &[TimeValue],
    reference: DateTime<Utc>,
    direction: Direction,
    tz: Tz,
) -> Option<DateTime<Utc>> {
    let mut closest: Option<DateTime<Utc>> = None;

    for instant in additions.iter().filter_map(|value| value.to_utc(tz)) {
        let better = match direction {
            Direction::Previous => {
                instant <= reference && closest.is_none_or(|best| instant > best)
            }
            Direction::Next => instant > reference && closest.is_none_or(|best| instant < best),
        };
        if better {
            closest = Some(instant);
        }
    }

    closest
}

/// ## Summary
/// Combines the rule result with the additions result.
///
/// Both sides already lie on the requested side of the reference, so the
/// closer one is the later for `Previous` and the earlier for `Next`. A
/// missing side defers to the other.
#[must_use]
pub fn merge(
    direction: Direction,
    from_rule: Option<DateTime<Utc>>,
    from_additions: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match (from_rule, from_additions) {
        (Some(rule), Some(addition)) => Some(match direction {
            Direction::Previous => rule.max(addition),
            Direction::Next => rule.min(addition),
        }),
        (rule, addition) => rule.or(addition),
    }
}
