//! Error types for anker-timerange operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// No grammar accepted the input. Carries the input exactly as the caller passed it.
    #[error("unsupported time specification: {0}")]
    UnsupportedSpec(String),

    #[error("invalid week_start: {0} (must be 'monday' or 'sunday')")]
    InvalidWeekStart(String),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

pub type Result<T> = std::result::Result<T, TimeRangeError>;
