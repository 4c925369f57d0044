//! York ("New York") regression.
//!
//! Straight-line fitting Y = B·X + A when both variables carry measurement
//! error, possibly heteroscedastic and correlated between X and Y. Ordinary
//! least squares assumes error-free X; this estimator instead weights each
//! point by its combined uncertainty projected onto the current line and
//! refines the slope by fixed-point iteration.
//!
//! # Types
//!
//! - [`YorkRegression`] — Estimator holding validated [`FitOptions`]
//! - [`YorkFit`] — Slope, intercept, convergence flag and final weighted means
//! - [`PointErrors`] — Per-point σx, σy derived from inverse-variance weights
//!
//! # Examples
//!
//! ```
//! use u_york::york::{FitOptions, YorkRegression};
//!
//! let x = [0.0, 0.9, 1.8, 2.6, 3.3, 4.4, 5.2, 6.1, 6.5, 7.4];
//! let y = [5.9, 5.4, 4.4, 4.6, 3.5, 3.7, 2.8, 2.8, 2.4, 1.5];
//! let est = YorkRegression::new(FitOptions::default().with_correlation(0.0)).unwrap();
//! let fit = est.fit(&x, &y).unwrap();
//! assert!(fit.converged);
//! assert!((fit.slope + 0.5456).abs() < 1e-3);
//! assert!((fit.intercept - 5.784).abs() < 1e-3);
//! ```
//!
//! # References
//!
//! - York, D. (1966). "Least-squares fitting of a straight line",
//!   *Canadian Journal of Physics* 44, pp. 1079-1086.
//! - Mahon, K.I. (1996). "The New 'York' Regression: Application of an
//!   Improved Statistical Method to Geochemistry", *International Geology
//!   Review* 38(4), pp. 293-303.

mod estimator;
mod options;
mod weights;

pub use estimator::{york_regression, YorkFit, YorkRegression};
pub use options::{
    Correlation, FitOptions, InitialSlope, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
pub use weights::{weighted_mean, PointErrors};
