//! Core types and symmetric matrix algebra for SPD geometry.
//!
//! This crate provides the foundations shared by the manifold and estimator
//! crates: the scalar abstraction, the error types, and the eigendecomposition
//! based matrix functions (log, exp, powers) together with the isometric
//! vectorization of symmetric matrices.
//!
//! # Modules
//!
//! - [`error`]: Error types for geometry and estimation
//! - [`numerical`]: Spectral matrix functions and stability helpers
//! - [`types`]: Scalar trait, type aliases and numerical constants

pub mod error;
pub mod numerical;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{EstimatorError, EstimatorResult, GeometryError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use spdtangent_core::prelude::*;
///
/// let m = DMatrix::<f64>::identity(2, 2) * 2.0;
/// let log_m = matrix_log(&m).unwrap();
/// assert!((log_m[(0, 0)] - 2f64.ln()).abs() < 1e-12);
/// ```
pub mod prelude {
    pub use crate::error::{EstimatorError, EstimatorResult, GeometryError, Result};
    pub use crate::numerical::symmetric::{
        devectorize, frobenius_inner, is_symmetric, matrix_exp, matrix_log, matrix_power,
        matrix_sqrt, matrix_sqrt_inv, symmetrize, vectorize, vectorized_len,
    };
    pub use crate::types::{constants, DMatrix, DVector, Scalar};
}
