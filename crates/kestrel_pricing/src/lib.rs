//! Kestrel pricing layer.
//!
//! Valuation engines for the instrument layer:
//!
//! - [`tree`]: the Cox-Ross-Rubinstein binomial lattice pricer for
//!   option-style instruments, with early exercise delegated to the
//!   instrument's node-value rule
//! - [`analytic`]: Black-Scholes closed form, used for analysis output and
//!   convergence testing
//! - [`Pricer`]: the facade that routes cashflow instruments to their
//!   direct discounted PV and tree products to the lattice
//!
//! All pricing is synchronous and side-effect free: tree parameters are
//! computed per call and threaded through explicitly, so a single pricer
//! value can serve any number of concurrent repricings of independent
//! market snapshots.

pub mod analytic;
mod error;
mod pricer;
pub mod tree;

pub use analytic::BlackScholes;
pub use error::PricingError;
pub use pricer::Pricer;
pub use tree::{CrrTreePricer, TreeParams};
