//! Instrument construction errors.

use kestrel_core::types::Date;
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Configuration and precondition errors raised when an instrument is
/// constructed. These are fatal for the affected instrument and surface
/// immediately, before any pricing happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Principal or notional must be strictly positive.
    #[error("Principal must be positive, got {value}")]
    InvalidPrincipal {
        /// The offending amount
        value: f64,
    },

    /// Option strike must be strictly positive.
    #[error("Strike must be positive, got {value}")]
    InvalidStrike {
        /// The offending strike
        value: f64,
    },

    /// A periodic leg needs a usable payment frequency.
    #[error("Unsupported payment frequency: {per_year} payments per year")]
    InvalidFrequency {
        /// Requested payments per year
        per_year: u32,
    },

    /// Maturity must follow the effective/issue date.
    #[error("Maturity {maturity} must be after start {start}")]
    InvalidMaturity {
        /// Instrument start date
        start: Date,
        /// Instrument maturity date
        maturity: Date,
    },

    /// Schedule generation failed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
