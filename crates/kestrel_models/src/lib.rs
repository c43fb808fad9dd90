//! Kestrel instrument layer.
//!
//! Defines the tradeable instruments and the capability contract the
//! pricing layer consumes:
//!
//! - [`instruments`]: the [`instruments::Instrument`] and
//!   [`instruments::TreeProduct`] traits, the concrete instrument types
//!   (bond, swap, European and American options) and the [`instruments::Trade`]
//!   dispatch enum
//! - [`schedules`]: payment frequencies and schedule generation for
//!   cashflow instruments
//!
//! Cashflow instruments (bond, swap) price themselves by discounting
//! against a market snapshot; option instruments expose only payoff,
//! expiry and a node-value rule and rely on the lattice pricer in the
//! pricing layer.

pub mod instruments;
pub mod schedules;
