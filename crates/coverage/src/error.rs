//! Error types for coverage evaluation.

use geo_common::DirectPosition;
use thiserror::Error;

/// Result type alias for evaluation operations.
pub type EvaluateResult<T> = Result<T, EvaluateError>;

/// Why a coverage could not be evaluated at a position.
///
/// `PointOutsideCoverage` is an expected outcome, not a defect: coverage
/// domains are bounded, and callers probe them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluateError {
    /// The queried position lies outside the coverage domain. Carries the
    /// offending position for diagnostics.
    #[error("point {position:?} is outside the coverage domain")]
    PointOutsideCoverage { position: DirectPosition },

    /// Any other evaluation failure: singular interpolation, ambiguous
    /// nearest-object search, missing control values.
    #[error("cannot evaluate coverage '{}': {reason}", .coverage.as_deref().unwrap_or("<unnamed>"))]
    CannotEvaluate {
        reason: String,
        coverage: Option<String>,
    },
}

impl EvaluateError {
    pub fn outside(position: DirectPosition) -> Self {
        EvaluateError::PointOutsideCoverage { position }
    }

    pub fn cannot_evaluate(reason: impl Into<String>) -> Self {
        EvaluateError::CannotEvaluate {
            reason: reason.into(),
            coverage: None,
        }
    }

    pub fn cannot_evaluate_in(coverage: impl Into<String>, reason: impl Into<String>) -> Self {
        EvaluateError::CannotEvaluate {
            reason: reason.into(),
            coverage: Some(coverage.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let outside = EvaluateError::outside(DirectPosition::new_2d(1.0, 2.0));
        assert!(outside.to_string().contains("outside"));

        let failed = EvaluateError::cannot_evaluate_in("elevation", "singular interpolation");
        assert!(failed.to_string().contains("elevation"));
        assert!(failed.to_string().contains("singular interpolation"));
    }
}
