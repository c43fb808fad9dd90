//! Kestrel risk layer.
//!
//! Finite-difference sensitivities of instrument PV to market inputs:
//!
//! - [`perturbation`]: pure functions building paired up/down-shocked
//!   deep copies of a market snapshot
//! - [`RiskEngine`]: central-difference DV01 and vega, orchestrating the
//!   pricer over the perturbed snapshots
//!
//! The base snapshot is never mutated; every bump scenario is an
//! independent clone-and-reprice operation. Scenarios run sequentially by
//! design, but nothing is shared between them, so a parallel schedule
//! would need no changes to the data model.

pub mod engine;
pub mod perturbation;

pub use engine::RiskEngine;
pub use perturbation::{perturb_rate_curve, perturb_vol_curve, CurveShock};
