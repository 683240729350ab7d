//! Error types for timespan resolution.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimespanError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing parameters: expected 'interval' or both 'start' and 'end'")]
    MissingParameters,

    #[error("Out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, TimespanError>;
