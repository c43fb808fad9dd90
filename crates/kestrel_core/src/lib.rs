//! Kestrel foundation layer.
//!
//! This crate provides the building blocks shared by every other layer of
//! the Kestrel valuation engine:
//!
//! - [`types`]: serial-number dates, day count conventions, and the
//!   structured error types they raise
//! - [`math`]: numerical utilities (standard normal distribution)
//! - [`market_data`]: rate and volatility term structures and the
//!   [`market_data::Market`] snapshot they live in
//!
//! # Design
//!
//! Market snapshots are value types: cloning a [`market_data::Market`]
//! deep-copies every curve, so a shocked clone can never perturb the
//! snapshot it was derived from. The finite-difference risk layer relies on
//! this invariant.

pub mod market_data;
pub mod math;
pub mod types;
