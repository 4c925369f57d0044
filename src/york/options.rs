//! Tuning knobs for [`YorkRegression`](super::YorkRegression).

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use crate::error::{YorkError, YorkResult};

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Default convergence tolerance on successive slope estimates.
pub const DEFAULT_TOLERANCE: f64 = 1e-15;

/// Correlation between each point's X error and Y error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correlation {
    /// The same coefficient for every point.
    Uniform(f64),
    /// One coefficient per point, indexed like the samples.
    PerPoint(Vec<f64>),
}

impl Default for Correlation {
    fn default() -> Self {
        Correlation::Uniform(0.0)
    }
}

impl Correlation {
    /// Coefficient for point `i`. Assumes [`validate`](Self::validate) passed.
    pub(crate) fn at(&self, i: usize) -> f64 {
        match self {
            Correlation::Uniform(r) => *r,
            Correlation::PerPoint(rs) => rs[i],
        }
    }

    pub(crate) fn validate(&self, n: usize) -> YorkResult<()> {
        match self {
            Correlation::Uniform(r) => check_coefficient(*r, None),
            Correlation::PerPoint(rs) => {
                if rs.len() != n {
                    return Err(YorkError::invalid(format!(
                        "correlation has {} entries, expected {n}",
                        rs.len()
                    )));
                }
                rs.iter()
                    .enumerate()
                    .try_for_each(|(i, &r)| check_coefficient(r, Some(i)))
            }
        }
    }
}

fn check_coefficient(r: f64, index: Option<usize>) -> YorkResult<()> {
    if r.is_finite() && (-1.0..=1.0).contains(&r) {
        return Ok(());
    }
    let at = index.map(|i| format!(" at point {i}")).unwrap_or_default();
    Err(YorkError::invalid(format!(
        "correlation coefficient {r}{at} outside [-1, 1]"
    )))
}

/// Starting point of the slope iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialSlope {
    /// b₀ = 0.
    #[default]
    Zero,
    /// A caller-supplied starting slope.
    Value(f64),
    /// The ordinary least-squares slope of Y on X.
    OrdinaryLeastSquares,
}

impl InitialSlope {
    pub(crate) fn resolve(&self, x: &[f64], y: &[f64]) -> YorkResult<f64> {
        match *self {
            InitialSlope::Zero => Ok(0.0),
            InitialSlope::Value(b) if b.is_finite() => Ok(b),
            InitialSlope::Value(b) => Err(YorkError::invalid(format!(
                "initial slope {b} is not finite"
            ))),
            InitialSlope::OrdinaryLeastSquares => {
                let x_var = stats::variance(x).unwrap_or(0.0);
                if !x_var.is_finite() || x_var < 1e-300 {
                    return Err(YorkError::invalid(
                        "x has zero variance, no least-squares starting slope",
                    ));
                }
                let cov = stats::covariance(x, y)
                    .ok_or_else(|| YorkError::invalid("covariance of x and y is undefined"))?;
                Ok(cov / x_var)
            }
        }
    }
}

impl FromStr for InitialSlope {
    type Err = YorkError;

    /// Parses `zero`, `ols` or a number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "0" => Ok(InitialSlope::Zero),
            "ols" => Ok(InitialSlope::OrdinaryLeastSquares),
            other => other
                .parse::<f64>()
                .map(InitialSlope::Value)
                .map_err(|e| YorkError::parse(format!("initial slope {s:?}: {e}"))),
        }
    }
}

/// Options for a York fit. Defaults match the reference behavior:
/// 500 iterations, tolerance 1e-15, uncorrelated errors, b₀ = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Maximum number of slope refinements (≥ 1).
    pub max_iterations: usize,
    /// The loop stops once |b_prev − b| < tolerance (strict).
    pub tolerance: f64,
    /// Error correlation coefficient(s).
    pub correlation: Correlation,
    /// Starting slope.
    pub initial_slope: InitialSlope,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            correlation: Correlation::default(),
            initial_slope: InitialSlope::default(),
        }
    }
}

impl FitOptions {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance on successive slopes.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Uses the same correlation coefficient `r` for every point.
    pub fn with_correlation(mut self, r: f64) -> Self {
        self.correlation = Correlation::Uniform(r);
        self
    }

    /// Uses one correlation coefficient per point.
    pub fn with_point_correlations(mut self, r: Vec<f64>) -> Self {
        self.correlation = Correlation::PerPoint(r);
        self
    }

    /// Sets the starting slope of the iteration.
    pub fn with_initial_slope(mut self, initial_slope: InitialSlope) -> Self {
        self.initial_slope = initial_slope;
        self
    }

    /// Checks everything that does not depend on the sample count.
    pub(crate) fn validate(&self) -> YorkResult<()> {
        if self.max_iterations < 1 {
            return Err(YorkError::invalid("max_iterations must be at least 1"));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(YorkError::invalid(format!(
                "tolerance {} must be non-negative",
                self.tolerance
            )));
        }
        if let Correlation::Uniform(r) = self.correlation {
            check_coefficient(r, None)?;
        }
        if let InitialSlope::Value(b) = self.initial_slope {
            if !b.is_finite() {
                return Err(YorkError::invalid(format!(
                    "initial slope {b} is not finite"
                )));
            }
        }
        Ok(())
    }
}
