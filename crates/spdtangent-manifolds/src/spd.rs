//! # Symmetric Positive Definite Manifold S⁺⁺(n)
//!
//! The manifold S⁺⁺(n) of n×n symmetric positive definite (SPD) matrices is the
//! natural home of covariance and correlation matrices, e.g. functional brain
//! connectivity estimated per subject.
//!
//! ## Mathematical Definition
//!
//! ```text
//! S⁺⁺(n) = {P ∈ ℝⁿˣⁿ : P = Pᵀ, xᵀ P x > 0 ∀x ≠ 0}
//! ```
//!
//! Equivalently, P ∈ S⁺⁺(n) if and only if P is symmetric with all positive
//! eigenvalues. S⁺⁺(n) is an open convex cone: the arithmetic mean of SPD
//! matrices is SPD.
//!
//! ## Tangent Space
//!
//! The tangent space at every P consists of all symmetric matrices:
//! ```text
//! T_P S⁺⁺(n) = {V ∈ ℝⁿˣⁿ : V = Vᵀ} ≅ ℝ^{n(n+1)/2}
//! ```
//!
//! The geometry itself (distance, exponential and logarithm maps) lives in
//! [`crate::metric`]; this type only describes the set and validates
//! membership.
//!
//! ## Example Usage
//!
//! ```rust
//! use spdtangent_manifolds::SPD;
//! use nalgebra::DMatrix;
//!
//! let spd = SPD::<f64>::new(2)?;
//! assert_eq!(spd.dimension(), 3);
//!
//! let p = DMatrix::from_row_slice(2, 2, &[2.0, 0.5, 0.5, 1.0]);
//! assert!(spd.belongs(&p, 1e-10));
//!
//! let not_pd = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
//! assert!(!spd.belongs(&not_pd, 1e-10));
//! # Ok::<(), spdtangent_core::GeometryError>(())
//! ```

use nalgebra::DMatrix;
use num_traits::Float;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use spdtangent_core::{
    error::{GeometryError, Result},
    numerical::{
        stability::{is_finite_matrix, max_abs_entry, regularize_spd},
        symmetric::{apply_spectral, symmetrize, symmetry_error, vectorized_len},
    },
    types::Scalar,
};
use std::fmt::{self, Debug};

/// Intrinsic dimension n(n+1)/2 of S⁺⁺(n).
#[inline]
pub fn spd_dimension(n: usize) -> usize {
    vectorized_len(n)
}

/// The manifold S⁺⁺(n) of symmetric positive definite matrices.
///
/// # Invariants
///
/// - `n ≥ 1`
/// - `tolerance > 0`, used both for the symmetry check and as the eigenvalue floor
#[derive(Clone, PartialEq)]
pub struct SPD<T = f64> {
    /// Matrix dimension n
    n: usize,
    /// Numerical tolerance for validations
    tolerance: T,
    /// Eigenvalue floor used by [`SPD::project_point`]
    min_eigenvalue: T,
}

impl<T: Scalar> Debug for SPD<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SPD S⁺⁺({}) (tolerance {})", self.n, self.tolerance)
    }
}

impl<T: Scalar> SPD<T> {
    /// Creates a new SPD manifold S⁺⁺(n) with the default tolerance.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidParameter` if n = 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use spdtangent_manifolds::SPD;
    /// // S⁺⁺(1) is the positive real line
    /// let spd1 = SPD::<f64>::new(1)?;
    /// assert_eq!(spd1.dimension(), 1);
    /// # Ok::<(), spdtangent_core::GeometryError>(())
    /// ```
    pub fn new(n: usize) -> Result<Self> {
        Self::with_tolerance(n, T::MANIFOLD_TOLERANCE)
    }

    /// Creates an SPD manifold with an explicit validation tolerance.
    pub fn with_tolerance(n: usize, tolerance: T) -> Result<Self> {
        if n == 0 {
            return Err(GeometryError::invalid_parameter(
                "SPD manifold requires n ≥ 1",
            ));
        }
        if !(tolerance > T::zero()) || !<T as Float>::is_finite(tolerance) {
            return Err(GeometryError::invalid_parameter(format!(
                "Tolerance must be positive and finite, got {tolerance}"
            )));
        }
        Ok(Self {
            n,
            tolerance,
            min_eigenvalue: <T as Float>::max(T::MIN_EIGENVALUE, tolerance),
        })
    }

    /// Returns the matrix dimension n.
    #[inline]
    pub fn matrix_dim(&self) -> usize {
        self.n
    }

    /// Returns the intrinsic dimension n(n+1)/2.
    #[inline]
    pub fn dimension(&self) -> usize {
        spd_dimension(self.n)
    }

    /// Returns the validation tolerance.
    #[inline]
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Membership predicate.
    ///
    /// True iff `m` is n×n, finite, symmetric within `tol`
    /// (max |Mᵢⱼ - Mⱼᵢ| ≤ tol) and every eigenvalue exceeds `tol`.
    pub fn belongs(&self, m: &DMatrix<T>, tol: T) -> bool {
        if m.nrows() != self.n || m.ncols() != self.n || !is_finite_matrix(m) {
            return false;
        }
        if symmetry_error(m) > tol {
            return false;
        }
        symmetrize(m)
            .symmetric_eigenvalues()
            .iter()
            .all(|&lambda| lambda > tol)
    }

    /// Validates that a matrix is symmetric positive definite.
    ///
    /// Same criteria as [`SPD::belongs`] with the manifold tolerance, except
    /// that symmetry is measured relative to the largest entry. Failures are
    /// reported as errors.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch`: If the matrix is not n×n
    /// - `Domain`: If the matrix is not finite, not symmetric or not positive definite
    pub fn check_point(&self, p: &DMatrix<T>) -> Result<()> {
        self.check_symmetric(p, "point")?;

        let min_eval = symmetrize(p)
            .symmetric_eigenvalues()
            .iter()
            .fold(<T as Float>::infinity(), |min, &val| <T as Float>::min(min, val));

        if !(min_eval > self.tolerance) {
            return Err(GeometryError::domain(format!(
                "Matrix not positive definite: min eigenvalue = {} (threshold: {})",
                min_eval, self.tolerance
            )));
        }

        Ok(())
    }

    /// Validates that a matrix is a tangent vector (symmetric n×n).
    pub fn check_tangent(&self, v: &DMatrix<T>) -> Result<()> {
        self.check_symmetric(v, "tangent vector")
    }

    /// Shape, finiteness and symmetry check shared by points and tangent vectors.
    ///
    /// Symmetry is tested relative to the largest entry so that products of
    /// well-scaled matrices pass. Positivity is left to the spectral functions.
    pub fn check_symmetric(&self, m: &DMatrix<T>, what: &str) -> Result<()> {
        if m.nrows() != self.n || m.ncols() != self.n {
            return Err(GeometryError::dimension_mismatch(
                format!("{}x{} {what}", self.n, self.n),
                format!("{}x{}", m.nrows(), m.ncols()),
            ));
        }
        if !is_finite_matrix(m) {
            return Err(GeometryError::domain(format!(
                "{what} contains non-finite values"
            )));
        }
        let scale = <T as Float>::max(max_abs_entry(m), T::one());
        let symmetry_err = symmetry_error(m);
        if symmetry_err > self.tolerance * scale {
            return Err(GeometryError::domain(format!(
                "{what} not symmetric: max |M - Mᵀ| = {} (tolerance: {})",
                symmetry_err, self.tolerance
            )));
        }
        Ok(())
    }

    /// Projects a square matrix onto S⁺⁺(n).
    ///
    /// Symmetrises, then clamps the spectrum from below at the eigenvalue floor.
    pub fn project_point(&self, m: &DMatrix<T>) -> Result<DMatrix<T>> {
        if m.nrows() != self.n || m.ncols() != self.n {
            return Err(GeometryError::dimension_mismatch(
                format!("{}x{}", self.n, self.n),
                format!("{}x{}", m.nrows(), m.ncols()),
            ));
        }
        let floor = self.min_eigenvalue;
        apply_spectral(&symmetrize(m), |lambda| {
            <T as Float>::max(lambda, floor + floor)
        })
    }

    /// Projects a square matrix onto the tangent space: (V + Vᵀ)/2.
    pub fn project_tangent(&self, v: &DMatrix<T>) -> Result<DMatrix<T>> {
        if v.nrows() != self.n || v.ncols() != self.n {
            return Err(GeometryError::dimension_mismatch(
                format!("{}x{}", self.n, self.n),
                format!("{}x{}", v.nrows(), v.ncols()),
            ));
        }
        Ok(symmetrize(v))
    }

    /// Random SPD matrix AᵀA/n + I with Gaussian A.
    pub fn random_point_with<R: Rng + ?Sized>(&self, rng: &mut R) -> DMatrix<T> {
        let a = self.gaussian_matrix(rng);
        let mut p = (a.transpose() * &a) * (T::one() / <T as Scalar>::from_usize(self.n));
        regularize_spd(&mut p, T::one());
        symmetrize(&p)
    }

    /// Random SPD matrix drawn with the thread-local generator.
    pub fn random_point(&self) -> DMatrix<T> {
        self.random_point_with(&mut rand::thread_rng())
    }

    /// Random symmetric tangent vector with unit Frobenius norm.
    pub fn random_tangent_with<R: Rng + ?Sized>(&self, rng: &mut R) -> DMatrix<T> {
        let v = symmetrize(&self.gaussian_matrix(rng));
        let norm = v.norm();
        if norm > T::EPSILON {
            v / norm
        } else {
            v
        }
    }

    /// Random tangent vector drawn with the thread-local generator.
    pub fn random_tangent(&self) -> DMatrix<T> {
        self.random_tangent_with(&mut rand::thread_rng())
    }

    fn gaussian_matrix<R: Rng + ?Sized>(&self, rng: &mut R) -> DMatrix<T> {
        DMatrix::from_fn(self.n, self.n, |_, _| {
            let sample: f64 = StandardNormal.sample(&mut *rng);
            <T as Scalar>::from_f64(sample)
        })
    }
}
