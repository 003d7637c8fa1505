//! Error types for SPD geometry and estimation.
//!
//! Geometry operations (matrix functions, metrics, manifold checks) fail with
//! [`GeometryError`]. Estimators built on top of them (Fréchet mean, tangent
//! space embedding) fail with [`EstimatorError`], which wraps geometry errors.

use thiserror::Error;

/// Errors that can occur during geometric operations on symmetric matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Input violates the symmetric / positive-definite precondition.
    ///
    /// This is the domain error raised by every matrix function and metric
    /// operation. It is never corrected silently.
    #[error("Input outside the domain: {reason}")]
    Domain {
        /// Description of the violated precondition
        reason: String,
    },

    /// Dimension mismatch between matrices or vectors.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// Invalid construction parameter.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the parameter problem
        reason: String,
    },

    /// Numerical breakdown (non-finite intermediate result).
    #[error("Numerical instability detected: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },
}

impl GeometryError {
    /// Create a Domain error with a custom reason.
    pub fn domain<S: Into<String>>(reason: S) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S: Into<String>>(reason: S) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Returns true for the domain (precondition) variant.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}

/// Errors raised by estimators (Fréchet mean, tangent space embedding).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    /// No samples were supplied; no mean exists.
    #[error("Empty dataset: at least one sample is required")]
    EmptyDataset,

    /// `transform` was called before `fit`.
    #[error("Estimator is not fitted: call fit before {operation}")]
    NotFitted {
        /// Operation that required a fitted estimator
        operation: String,
    },

    /// Points and labels have different lengths.
    #[error("Label mismatch: {points} points but {labels} labels")]
    LabelMismatch {
        /// Number of points
        points: usize,
        /// Number of labels
        labels: usize,
    },

    /// Sample weights are unusable.
    #[error("Invalid weights: {reason}")]
    InvalidWeights {
        /// Description of the weight problem
        reason: String,
    },

    /// Invalid estimator configuration.
    #[error("Invalid configuration: {parameter} = {value} ({reason})")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Propagated geometry error.
    #[error("Geometry operation failed: {0}")]
    Geometry(#[from] GeometryError),
}

impl EstimatorError {
    /// Create a NotFitted error for the given operation.
    pub fn not_fitted<S: Into<String>>(operation: S) -> Self {
        Self::NotFitted {
            operation: operation.into(),
        }
    }

    /// Create an InvalidWeights error.
    pub fn invalid_weights<S: Into<String>>(reason: S) -> Self {
        Self::InvalidWeights {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Result type alias for estimator operations.
pub type EstimatorResult<T> = std::result::Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_creation() {
        let err = GeometryError::domain("eigenvalue is zero");
        assert!(err.is_domain());
        assert_eq!(err.to_string(), "Input outside the domain: eigenvalue is zero");

        let err = GeometryError::dimension_mismatch("3x3", "3x4");
        assert!(matches!(err, GeometryError::DimensionMismatch { .. }));
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3x3, got 3x4");
        assert!(!err.is_domain());
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            GeometryError::domain("not symmetric"),
            GeometryError::dimension_mismatch("square matrix", "rectangular matrix"),
            GeometryError::invalid_parameter("n must be positive"),
            GeometryError::numerical_error("non-finite eigenvalue"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_estimator_error_creation() {
        let err = EstimatorError::not_fitted("transform");
        assert_eq!(
            err.to_string(),
            "Estimator is not fitted: call fit before transform"
        );

        let err = EstimatorError::LabelMismatch { points: 4, labels: 3 };
        assert!(err.to_string().contains("4 points"));

        let err = EstimatorError::invalid_configuration("must be positive", "tolerance", "-1");
        assert!(err.to_string().contains("tolerance"));
    }

    #[test]
    fn test_geometry_error_propagation() {
        let geometry_err = GeometryError::domain("not positive definite");
        let estimator_err: EstimatorError = geometry_err.clone().into();

        assert_eq!(estimator_err, EstimatorError::Geometry(geometry_err));
        assert!(estimator_err.to_string().contains("Geometry operation failed"));
        assert!(estimator_err.to_string().contains("not positive definite"));
    }
}
