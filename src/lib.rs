//! # u-york
//!
//! Straight-line regression with errors in both variables, using the
//! iteratively reweighted "New York" method of York (1966) as revised by
//! Mahon (1996).
//!
//! The estimator operates on raw `f64` slices: measured X and Y, optional
//! per-point inverse-variance weights for each axis, and the correlation
//! between each point's X and Y errors.
//!
//! ## Modules
//!
//! - [`york`] — The estimator (weights, weighted means, slope iteration)
//! - [`pipeline`] — Read → fit → report → plot wiring via [`pipeline::SampleSource`]
//!   and [`pipeline::FitSink`]
//! - [`io`] — Interactive input, example/JSON datasets, text report, SVG plot
//! - [`error`] — [`YorkError`] and [`YorkResult`]
//!
//! ## Design Philosophy
//!
//! - **Pure core**: [`york`] has no I/O and no shared state; fits are re-entrant
//! - **Loud failures**: degenerate weights are reported, never turned into NaN
//! - **Research-backed**: formulas follow the published method exactly

pub mod error;
pub mod io;
pub mod pipeline;
pub mod york;

pub use error::{YorkError, YorkResult};
