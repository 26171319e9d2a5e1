use std::fmt;

use crate::error::ServiceError;

/// Which side of the reference instant to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Latest occurrence at or before the reference.
    Previous,
    /// Earliest occurrence strictly after the reference.
    #[default]
    Next,
}

impl Direction {
    /// The periods offset this direction is written as: `0` next, `-1` previous.
    #[must_use]
    pub const fn offset(self) -> i32 {
        match self {
            Self::Previous => -1,
            Self::Next => 0,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = ServiceError;

    fn try_from(offset: i32) -> Result<Self, Self::Error> {
        match offset {
            0 => Ok(Self::Next),
            -1 => Ok(Self::Previous),
            other => Err(ServiceError::InvalidDirection(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Previous => "previous",
            Self::Next => "next",
        })
    }
}
