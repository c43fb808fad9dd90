//! Schedule generation errors.

use kestrel_core::types::{Date, DateError};
use thiserror::Error;

/// Errors raised while generating a payment schedule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// End date is not strictly after the start date.
    #[error("Schedule end {end} must be after start {start}")]
    InvalidRange {
        /// Schedule start date
        start: Date,
        /// Schedule end date
        end: Date,
    },

    /// Date arithmetic left the supported calendar range.
    #[error("Date arithmetic failed: {0}")]
    Date(#[from] DateError),
}
