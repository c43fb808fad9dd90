//! Market data error types.

use thiserror::Error;

/// Market data lookup failures.
///
/// These are raised when a pricing operation requires a curve that the
/// snapshot does not carry or that carries no pillars. Lookups that can
/// fall back to a documented default (spot prices, curve values on an
/// empty curve) do not raise; they warn and return the default, and the
/// caller observes the condition through `is_empty` / `Option` accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// Named rate curve is absent from the snapshot.
    #[error("Rate curve '{name}' not found in market")]
    CurveNotFound {
        /// The requested curve name
        name: String,
    },

    /// Named volatility curve is absent from the snapshot.
    #[error("Vol curve '{name}' not found in market")]
    VolCurveNotFound {
        /// The requested curve name
        name: String,
    },

    /// The curve exists but holds no pillars, so it cannot calibrate or
    /// discount anything.
    #[error("Curve '{name}' is empty")]
    EmptyCurve {
        /// The offending curve name
        name: String,
    },
}
