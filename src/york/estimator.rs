//! Iteratively reweighted York estimator.
//!
//! # Algorithm
//!
//! Starting from b₀ (0 by default), repeat until |b_prev − b| < tol or the
//! iteration budget is spent:
//!
//! ```text
//! W_i = 1 / (σy_i² + b² σx_i² − 2 b r_i σx_i σy_i)
//! X̄   = Σ W_i X_i / Σ W_i          Ȳ = Σ W_i Y_i / Σ W_i
//! U_i = X_i − X̄                    V_i = Y_i − Ȳ
//! b   = Σ W_i² V_i (U_i σy_i + b V_i σx_i − r_i V_i σx_i σy_i)
//!     / Σ W_i² U_i (U_i σy_i + b V_i σx_i − b r_i U_i σx_i σy_i)
//! ```
//!
//! After the loop the weights and means are recomputed once more at the
//! final b, and a = Ȳ − b X̄, so the intercept always belongs to the
//! returned slope.

use log::{debug, trace, warn};

use crate::error::{YorkError, YorkResult};

use super::options::{Correlation, FitOptions};
use super::weights::{weighted_mean, PointErrors};

/// Result of a York regression: Y = slope · X + intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct YorkFit {
    /// Slope (B).
    pub slope: f64,
    /// Intercept (A).
    pub intercept: f64,
    /// `true` iff the loop stopped on the tolerance check.
    pub converged: bool,
    /// Number of slope refinements performed.
    pub iterations: usize,
    /// Weighted mean of X at the final slope.
    pub x_bar: f64,
    /// Weighted mean of Y at the final slope.
    pub y_bar: f64,
}

impl YorkFit {
    /// Evaluates the fitted line at each of `x_new`.
    pub fn predict(&self, x_new: &[f64]) -> Vec<f64> {
        x_new
            .iter()
            .map(|&xi| self.slope * xi + self.intercept)
            .collect()
    }
}

/// York regression estimator with validated options.
#[derive(Debug, Clone, Default)]
pub struct YorkRegression {
    options: FitOptions,
}

impl YorkRegression {
    /// Creates an estimator, rejecting out-of-domain options
    /// (`max_iterations < 1`, negative tolerance, r outside [-1, 1]).
    pub fn new(options: FitOptions) -> YorkResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Options this estimator was built with.
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fits with unit weights on both axes.
    pub fn fit(&self, x: &[f64], y: &[f64]) -> YorkResult<YorkFit> {
        self.fit_weighted(x, y, None, None)
    }

    /// Fits with optional per-point X and Y weights (inverse variances).
    ///
    /// # Errors
    ///
    /// - [`YorkError::InvalidInput`] for mismatched lengths, fewer than two
    ///   points, non-finite samples, non-positive weights or a per-point
    ///   correlation of the wrong length or range.
    /// - [`YorkError::DivisionByZero`] when a point's weight denominator
    ///   vanishes.
    /// - [`YorkError::DegenerateSlope`] when the slope update is undefined,
    ///   e.g. all X equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_york::york::{FitOptions, YorkRegression};
    ///
    /// let x = [1.0, 3.0];
    /// let y = [2.0, 8.0];
    /// let est = YorkRegression::new(FitOptions::default()).unwrap();
    /// let fit = est.fit_weighted(&x, &y, Some(&[5.0, 1.0]), Some(&[1.0, 9.0])).unwrap();
    /// assert!((fit.slope - 3.0).abs() < 1e-12);
    /// assert!((fit.intercept + 1.0).abs() < 1e-12);
    /// ```
    pub fn fit_weighted(
        &self,
        x: &[f64],
        y: &[f64],
        weights_x: Option<&[f64]>,
        weights_y: Option<&[f64]>,
    ) -> YorkResult<YorkFit> {
        let n = x.len();
        if n != y.len() {
            return Err(YorkError::invalid(format!(
                "x has {n} values but y has {}",
                y.len()
            )));
        }
        if n < 2 {
            return Err(YorkError::invalid(format!(
                "at least 2 points are required, got {n}"
            )));
        }
        check_finite("x", x)?;
        check_finite("y", y)?;

        let errors = PointErrors::from_weights(n, weights_x, weights_y)?;
        let correlation = &self.options.correlation;
        correlation.validate(n)?;

        let mut b = self.options.initial_slope.resolve(x, y)?;
        let mut prev_b = f64::INFINITY;
        let mut iterations = 0;
        let mut converged = false;
        debug!(
            "york fit: n = {n}, b0 = {b}, max_iterations = {}, tolerance = {:e}",
            self.options.max_iterations, self.options.tolerance
        );

        while iterations < self.options.max_iterations {
            if (prev_b - b).abs() < self.options.tolerance {
                converged = true;
                break;
            }
            prev_b = b;
            b = refine_slope(x, y, &errors, correlation, b, iterations + 1)?;
            iterations += 1;
            trace!("iteration {iterations}: b = {b}");
        }

        // Weights and means at the final slope, whichever way the loop exited.
        let w = errors.weights(b, correlation)?;
        let x_bar = weighted_mean(x, &w);
        let y_bar = weighted_mean(y, &w);
        let intercept = y_bar - b * x_bar;

        if converged {
            debug!("york fit converged after {iterations} iterations: b = {b}, a = {intercept}");
        } else {
            warn!(
                "york fit did not converge within {} iterations (last change {:e})",
                self.options.max_iterations,
                (prev_b - b).abs()
            );
        }

        Ok(YorkFit {
            slope: b,
            intercept,
            converged,
            iterations,
            x_bar,
            y_bar,
        })
    }
}

/// Fits Y = B·X + A with unit weights, uncorrelated errors and the default
/// iteration budget.
///
/// # Examples
///
/// ```
/// use u_york::york::york_regression;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [3.0, 5.0, 7.0, 9.0];
/// let fit = york_regression(&x, &y).unwrap();
/// assert!(fit.converged);
/// assert!((fit.slope - 2.0).abs() < 1e-10);
/// assert!((fit.intercept - 1.0).abs() < 1e-10);
/// ```
pub fn york_regression(x: &[f64], y: &[f64]) -> YorkResult<YorkFit> {
    YorkRegression::default().fit(x, y)
}

fn check_finite(axis: &str, values: &[f64]) -> YorkResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(YorkError::invalid(format!(
            "{axis} value {} at point {i} is not finite",
            values[i]
        ))),
        None => Ok(()),
    }
}

/// One fixed-point update of the slope.
fn refine_slope(
    x: &[f64],
    y: &[f64],
    errors: &PointErrors,
    correlation: &Correlation,
    b: f64,
    iteration: usize,
) -> YorkResult<f64> {
    let w = errors.weights(b, correlation)?;
    let x_bar = weighted_mean(x, &w);
    let y_bar = weighted_mean(y, &w);

    // The update is homogeneous in W², so W is scaled to max 1 to keep W²
    // finite for large weights.
    let w_max = w.iter().fold(0.0_f64, |m, &wi| m.max(wi));

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..x.len() {
        let (sx, sy, r) = (errors.x[i], errors.y[i], correlation.at(i));
        let u = x[i] - x_bar;
        let v = y[i] - y_bar;
        let wi = w[i] / w_max;
        let w2 = wi * wi;
        numerator += w2 * v * (u * sy + b * v * sx - r * v * sx * sy);
        denominator += w2 * u * (u * sy + b * v * sx - b * r * u * sx * sy);
    }

    let next = numerator / denominator;
    if denominator == 0.0 || !next.is_finite() {
        return Err(YorkError::DegenerateSlope {
            iteration,
            denominator,
        });
    }
    Ok(next)
}
