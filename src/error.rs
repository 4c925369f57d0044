//! Error type shared by the estimator and the I/O stages.

use thiserror::Error;

pub type YorkResult<T> = Result<T, YorkError>;

/// Failure of a fit or of one of the pipeline stages around it.
///
/// Non-convergence is not represented here: an exhausted iteration budget
/// is a normal return with [`YorkFit::converged`](crate::york::YorkFit) set
/// to `false`.
#[derive(Debug, Error)]
pub enum YorkError {
    /// Malformed or out-of-domain arguments, detected before iterating.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A per-point weight denominator vanished (or went negative).
    #[error("division by zero: weight denominator {denominator} at point {index}")]
    DivisionByZero { index: usize, denominator: f64 },
    /// The global slope-update denominator vanished or the update is not finite.
    #[error("degenerate slope update at iteration {iteration}: denominator {denominator}")]
    DegenerateSlope { iteration: usize, denominator: f64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl YorkError {
    pub fn invalid(message: impl Into<String>) -> Self {
        YorkError::InvalidInput(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        YorkError::Parse(message.into())
    }

    /// Returns `true` for precondition violations caught before iterating.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, YorkError::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = YorkError::DivisionByZero {
            index: 3,
            denominator: 0.0,
        };
        assert_eq!(
            e.to_string(),
            "division by zero: weight denominator 0 at point 3"
        );
        assert!(YorkError::invalid("r = 1.5").to_string().contains("r = 1.5"));
        assert!(YorkError::invalid("x").is_invalid_input());
        assert!(!YorkError::parse("x").is_invalid_input());
    }
}
