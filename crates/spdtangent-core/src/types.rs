//! Type definitions and aliases for SPD geometry.
//!
//! This module provides the scalar abstraction shared by every crate in the
//! workspace, the matrix/vector aliases, and a handful of numerical constants.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in manifold computations (f32 or f64).
///
/// This trait combines all the numeric traits required by the eigendecomposition
/// based matrix functions and the iterative estimators.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Tolerance for checking if a point is on the manifold.
    const MANIFOLD_TOLERANCE: Self;

    /// Relative tolerance used when a matrix function requires a symmetric input.
    const SYMMETRY_TOLERANCE: Self;

    /// Smallest eigenvalue kept when projecting onto the SPD cone.
    const MIN_EIGENVALUE: Self;

    /// Convert from f64 (for constants).
    fn from_f64(v: f64) -> Self;

    /// Convert to f64 (for logging/display).
    fn to_f64(self) -> f64;

    /// Convert from usize (for sample counts).
    fn from_usize(v: usize) -> Self;
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const MANIFOLD_TOLERANCE: Self = 1e-5;
    const SYMMETRY_TOLERANCE: Self = 1e-4;
    const MIN_EIGENVALUE: Self = 1e-6;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as f32
    }
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const MANIFOLD_TOLERANCE: Self = 1e-10;
    const SYMMETRY_TOLERANCE: Self = 1e-10;
    const MIN_EIGENVALUE: Self = 1e-12;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as f64
    }
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Square root of 2, the off-diagonal weight of the symmetric vectorization.
    pub fn sqrt_2<T: Scalar>() -> T {
        <T as Scalar>::from_f64(std::f64::consts::SQRT_2)
    }
}
