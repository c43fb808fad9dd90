//! Numerical utilities shared across the pricing layers.

mod distributions;

pub use distributions::{norm_cdf, norm_pdf};
