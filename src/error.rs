//! Error taxonomy for the crate.
//!
//! One umbrella [`Error`] wraps focused per-subsystem enums, each derived with
//! `thiserror`. Every fallible entry point in the crate returns [`Result`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error(transparent)]
    Ndframe(#[from] NdframeError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// Errors raised by the named-kernel dispatcher and the columnar layer.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("kernel '{0}' is not registered")]
    UnsupportedKernel(String),

    #[error("type mismatch in kernel '{kernel}': {detail}")]
    TypeMismatch { kernel: String, detail: String },

    #[error("length mismatch: left has {left} rows, right has {right} rows")]
    LengthMismatch { left: usize, right: usize },

    #[error("null input where a value was required: {0}")]
    NullPointer(String),

    #[error("columnar backend error: {0}")]
    Backend(String),
}

/// Errors raised by the NDFrame kernel.
#[derive(Debug, Error)]
pub enum NdframeError {
    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error("index mismatch: {0}")]
    IndexMismatch(String),

    #[error("label not found: {0}")]
    LabelNotFound(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),
}

/// Errors raised by the holiday rule engine, business-day calendar, and market calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error(transparent)]
    Ndframe(#[from] NdframeError),

    #[error("special time registered against undefined market-time type '{0}'")]
    InvalidOverride(String),

    #[error("unknown market-time type '{0}'")]
    UnknownMarketTime(String),

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("invalid range: end {end} before start {start}")]
    InvalidRange { start: String, end: String },

    #[error("not implemented for dates before 1952")]
    PreHistoricalNotSupported,

    #[error("date {0} is not a business day")]
    NotABusinessDay(String),
}

impl From<polars::error::PolarsError> for ComputeError {
    fn from(e: polars::error::PolarsError) -> Self {
        ComputeError::Backend(e.to_string())
    }
}

impl From<ComputeError> for CalendarError {
    fn from(e: ComputeError) -> Self {
        CalendarError::Ndframe(NdframeError::from(e))
    }
}
