use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// Calendar collaborator errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
