//! Market data model.
//!
//! This module provides:
//! - [`RateCurve`] / [`VolCurve`]: date-keyed term structures with linear
//!   interpolation, flat extrapolation and parallel-shock support
//! - [`Market`]: a value-typed snapshot of all market data as of one
//!   valuation date
//! - [`MarketDataError`]: structured lookup failures raised at pricing
//!   entry points

mod curve;
mod error;
mod market;

pub use curve::{RateCurve, VolCurve};
pub use error::MarketDataError;
pub use market::Market;
