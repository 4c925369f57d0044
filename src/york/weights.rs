//! Per-point uncertainties and the slope-dependent York weights.
//!
//! Each point carries an X weight ωx and a Y weight ωy (inverse variances),
//! from which the standard-deviation proxies are derived:
//!
//! ```text
//! σx_i = ωx_i^(-1/2)        σy_i = ωy_i^(-1/2)
//! ```
//!
//! For a slope estimate b, the weight of point i along the fitted line is
//!
//! ```text
//! W_i = 1 / (σy_i² + b² σx_i² − 2 b r_i σx_i σy_i)
//! ```
//!
//! # Reference
//!
//! Mahon, K.I. (1996). "The New 'York' Regression: Application of an Improved
//! Statistical Method to Geochemistry", *International Geology Review* 38(4),
//! pp. 293-303.

use crate::error::{YorkError, YorkResult};

use super::options::Correlation;

/// Standard-deviation proxies for each point's X and Y measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct PointErrors {
    /// σx per point.
    pub x: Vec<f64>,
    /// σy per point.
    pub y: Vec<f64>,
}

impl PointErrors {
    /// Derives σ = ω^(-1/2) from the X and Y weights.
    ///
    /// Missing weights default to 1 for every point. Each weight must be
    /// finite and strictly positive; the offending index is reported
    /// otherwise.
    pub fn from_weights(
        n: usize,
        weights_x: Option<&[f64]>,
        weights_y: Option<&[f64]>,
    ) -> YorkResult<Self> {
        Ok(Self {
            x: derive_errors("x", n, weights_x)?,
            y: derive_errors("y", n, weights_y)?,
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` when there are no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Computes W_i for every point at slope `b`.
    ///
    /// Fails with [`YorkError::DivisionByZero`] when a denominator is zero,
    /// negative or not finite, or so small that W_i overflows.
    pub fn weights(&self, b: f64, correlation: &Correlation) -> YorkResult<Vec<f64>> {
        self.x
            .iter()
            .zip(&self.y)
            .enumerate()
            .map(|(i, (&sx, &sy))| {
                let r = correlation.at(i);
                let denominator = sy * sy + b * b * (sx * sx) - 2.0 * b * r * sx * sy;
                let w = 1.0 / denominator;
                if !denominator.is_finite() || denominator <= 0.0 || !w.is_finite() {
                    return Err(YorkError::DivisionByZero {
                        index: i,
                        denominator,
                    });
                }
                Ok(w)
            })
            .collect()
    }
}

fn derive_errors(axis: &str, n: usize, weights: Option<&[f64]>) -> YorkResult<Vec<f64>> {
    let Some(weights) = weights else {
        return Ok(vec![1.0; n]);
    };
    if weights.len() != n {
        return Err(YorkError::invalid(format!(
            "{axis} weights have {} entries, expected {n}",
            weights.len()
        )));
    }
    weights
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            if !w.is_finite() || w <= 0.0 {
                return Err(YorkError::invalid(format!(
                    "{axis} weight {w} at point {i} must be finite and positive"
                )));
            }
            Ok(1.0 / w.sqrt())
        })
        .collect()
}

/// Weighted mean Σ(Wᵢ·vᵢ) / Σ(Wᵢ).
///
/// Both slices must be non-empty and of equal length, with positive weights.
/// Weights are scaled by their maximum first, so Σ(Wᵢ) stays finite for
/// weights near `f64::MAX`.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let w_max = weights.iter().fold(0.0_f64, |m, &w| m.max(w));
    let (sum, sum_w) = values
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(s, sw), (&v, &w)| {
            let w = w / w_max;
            (s + w * v, sw + w)
        });
    sum / sum_w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_weights_by_default() {
        let e = PointErrors::from_weights(3, None, None).unwrap();
        assert_eq!(e.x, vec![1.0; 3]);
        assert_eq!(e.y, vec![1.0; 3]);
        assert_eq!(e.len(), 3);
    }

    #[test]
    fn errors_are_inverse_sqrt_of_weights() {
        let e = PointErrors::from_weights(2, Some(&[4.0, 100.0]), Some(&[0.25, 1.0])).unwrap();
        assert!((e.x[0] - 0.5).abs() < 1e-15);
        assert!((e.x[1] - 0.1).abs() < 1e-15);
        assert!((e.y[0] - 2.0).abs() < 1e-15);
        assert!((e.y[1] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn rejects_bad_weights() {
        let err = PointErrors::from_weights(3, Some(&[1.0, 0.0, 1.0]), None).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("at point 1"), "{err}");

        assert!(PointErrors::from_weights(2, None, Some(&[1.0, -2.0])).is_err());
        assert!(PointErrors::from_weights(2, Some(&[1.0, f64::NAN]), None).is_err());
        assert!(PointErrors::from_weights(2, Some(&[1.0]), None).is_err());
    }

    #[test]
    fn weight_at_zero_slope_is_y_weight() {
        // W = 1/σy² = ωy when b = 0
        let e = PointErrors::from_weights(2, Some(&[3.0, 5.0]), Some(&[4.0, 16.0])).unwrap();
        let w = e.weights(0.0, &Correlation::Uniform(0.7)).unwrap();
        assert!((w[0] - 4.0).abs() < 1e-12);
        assert!((w[1] - 16.0).abs() < 1e-12);
    }

    #[test]
    fn weight_with_slope_and_correlation() {
        // σx = σy = 1, b = 2, r = 0.5: 1 + 4 - 2 = 3
        let e = PointErrors::from_weights(1, None, None).unwrap();
        let w = e.weights(2.0, &Correlation::Uniform(0.5)).unwrap();
        assert!((w[0] - 1.0 / 3.0).abs() < 1e-15);

        let w = e.weights(2.0, &Correlation::PerPoint(vec![-0.5])).unwrap();
        assert!((w[0] - 1.0 / 7.0).abs() < 1e-15);
    }

    #[test]
    fn vanishing_denominator_is_reported() {
        // r = 1 and b = σy/σx make the quadratic form vanish.
        let e = PointErrors::from_weights(2, None, None).unwrap();
        match e.weights(1.0, &Correlation::Uniform(1.0)) {
            Err(YorkError::DivisionByZero { index, denominator }) => {
                assert_eq!(index, 0);
                assert_eq!(denominator, 0.0);
            }
            other => panic!("expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn subnormal_denominator_is_reported() {
        // σy² underflows to a subnormal whose reciprocal is infinite.
        let e = PointErrors {
            x: vec![1.0],
            y: vec![1e-160],
        };
        match e.weights(0.0, &Correlation::Uniform(0.0)) {
            Err(YorkError::DivisionByZero { index, denominator }) => {
                assert_eq!(index, 0);
                assert!(denominator > 0.0);
            }
            other => panic!("expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn weighted_mean_basic() {
        assert!((weighted_mean(&[1.0, 3.0], &[1.0, 1.0]) - 2.0).abs() < 1e-15);
        assert!((weighted_mean(&[1.0, 3.0], &[3.0, 1.0]) - 1.5).abs() < 1e-15);
        assert!((weighted_mean(&[7.0], &[0.1]) - 7.0).abs() < 1e-15);
        let huge = [f64::MAX / 2.0; 3];
        assert!((weighted_mean(&[1.0, 2.0, 6.0], &huge) - 3.0).abs() < 1e-12);
    }
}
