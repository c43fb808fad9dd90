//! CLI error types.

use kestrel_core::types::DateError;
use kestrel_models::instruments::InstrumentError;
use kestrel_pricing::PricingError;
use thiserror::Error;

/// Driver-level errors.
#[derive(Error, Debug)]
pub enum CliError {
    /// File system access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited file could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration file is present but unreadable.
    #[error("Cannot parse config '{path}': {message}")]
    Config {
        /// Config file path
        path: String,
        /// Underlying parse failure
        message: String,
    },

    /// Date parsing or arithmetic failed.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Instrument construction failed.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Pricing failed for a reason the driver cannot isolate.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Unparseable tenor label in a curve file.
    #[error("Cannot parse tenor label '{label}' (expected ON, <n>M or <n>Y)")]
    Tenor {
        /// The offending label
        label: String,
    },

    /// Unparseable numeric value.
    #[error("Cannot parse numeric value '{text}'")]
    Value {
        /// The offending text
        text: String,
    },

    /// Portfolio row names an unsupported trade type.
    #[error("Unknown trade type '{kind}'")]
    UnknownTradeType {
        /// The offending type label
        kind: String,
    },

    /// Portfolio row carries an unusable payment frequency.
    #[error("Unusable payment frequency {value} (year fraction between payments)")]
    Frequency {
        /// The offending raw frequency
        value: f64,
    },
}

/// Convenience alias used throughout the driver.
pub type Result<T> = std::result::Result<T, CliError>;
