//! Error types for date construction and parsing.

use thiserror::Error;

/// Date construction and parsing errors.
///
/// # Examples
///
/// ```
/// use kestrel_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert!(format!("{}", err).contains("2024"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Calendar components do not form a valid date.
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component
        day: u32,
    },

    /// String is not a parseable ISO 8601 date.
    #[error("Cannot parse date from '{input}' (expected YYYY-MM-DD)")]
    Parse {
        /// The unparseable input
        input: String,
    },

    /// Serial number falls before the start of the epoch.
    #[error("Serial number {serial} is outside the supported range (>= 1)")]
    SerialOutOfRange {
        /// The offending serial number
        serial: i64,
    },
}
