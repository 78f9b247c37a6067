//! Error types for moment construction, conversion and parsing

use thiserror::Error;

/// Errors raised by the throwing-style moment operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MomentError {
    #[error("Value cannot be null: {0}")]
    NullInput(&'static str),

    #[error("String was not recognized as a valid date/time: {0}")]
    Format(String),

    #[error("Value out of range: {0}")]
    Range(String),

    #[error("Offset must be within plus or minus 14 hours, got {0} minutes")]
    OffsetRange(i32),

    #[error("Culture is not supported: {0}")]
    UnknownCulture(String),
}

impl MomentError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        MomentError::Format(reason.into())
    }

    pub(crate) fn range(reason: impl Into<String>) -> Self {
        MomentError::Range(reason.into())
    }
}

pub type MomentResult<T> = std::result::Result<T, MomentError>;
