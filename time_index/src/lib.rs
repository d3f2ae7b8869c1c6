//! # Time Index
//!
//! Calendar primitives for time-indexed data.
//! This crate provides the index flavours a forecasting adapter has to
//! translate between:
//!
//! - [`Frequency`]: the spacing between consecutive keys
//! - [`Period`]: a calendar span such as a month or a quarter
//! - [`TimeIndex`]: an ordered sequence of period, timestamp or positional keys
//! - [`date_range`]: every timestamp between two bounds at a frequency

use thiserror::Error;

pub mod frequency;
pub mod index;
pub mod period;
pub mod range;

pub use crate::frequency::Frequency;
pub use crate::index::{DatetimeIndex, IndexKind, PeriodIndex, TimeIndex};
pub use crate::period::Period;
pub use crate::range::{date_range, period_range};

/// Errors that can occur while building or converting time indices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),
}

/// Result type for time index operations
pub type Result<T> = std::result::Result<T, IndexError>;
