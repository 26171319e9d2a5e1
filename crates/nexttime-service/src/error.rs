use thiserror::Error;

/// Schedule resolution errors.
///
/// "The schedule never fires in that direction" is not an error; resolvers
/// report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] nexttime_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] nexttime_core::error::CoreError),

    #[error("Calendar has no VEVENT component")]
    MissingEvent,

    #[error("VEVENT has no usable DTSTART")]
    MissingStart,

    #[error("Expected a VEVENT component, got {0}")]
    UnexpectedComponent(String),

    #[error("Unsupported direction offset {0}, expected 0 (next) or -1 (previous)")]
    InvalidDirection(i32),

    #[error("Invalid recurrence rule {rule:?}: {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("Invalid {property} value: {value}")]
    InvalidValue {
        property: &'static str,
        value: String,
    },

    #[error("Out of memory collecting {0} values")]
    ResourceExhausted(&'static str),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

impl From<nexttime_rfc::rfc::ical::ParseError> for ServiceError {
    fn from(err: nexttime_rfc::rfc::ical::ParseError) -> Self {
        Self::RfcError(err.into())
    }
}
