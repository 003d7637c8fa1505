//! Log-Euclidean metric on S⁺⁺(n).
//!
//! The matrix logarithm is a diffeomorphism from S⁺⁺(n) onto the flat space
//! of symmetric matrices. Pulling back the Frobenius metric gives
//! ```text
//! log_P(M) = log(M) − log(P)
//! exp_P(V) = exp(log(P) + V)
//! d(P, M)  = ‖log(M) − log(P)‖_F
//! ```
//!
//! Tangent vectors are represented in log-coordinates, so the inner product
//! is the plain Frobenius product. The weighted Fréchet mean has the closed
//! form exp(Σ wᵢ log Mᵢ).

use crate::{
    metric::{RiemannianMetric, SPDMetric},
    spd::SPD,
};
use nalgebra::DMatrix;
use spdtangent_core::{
    error::{GeometryError, Result},
    numerical::symmetric::{frobenius_inner, matrix_exp, matrix_log, symmetrize},
    types::Scalar,
};

/// Log-Euclidean geometry of S⁺⁺(n).
#[derive(Debug, Clone, PartialEq)]
pub struct LogEuclidean<T: Scalar = f64> {
    spd: SPD<T>,
}

impl<T: Scalar> LogEuclidean<T> {
    /// Creates the metric on the given manifold.
    pub fn new(spd: SPD<T>) -> Self {
        Self { spd }
    }

    /// Convenience constructor for S⁺⁺(n) with default tolerances.
    pub fn with_dim(n: usize) -> Result<Self> {
        Ok(Self::new(SPD::new(n)?))
    }

    fn log_point(&self, p: &DMatrix<T>, what: &str) -> Result<DMatrix<T>> {
        self.spd.check_symmetric(p, what)?;
        matrix_log(p)
    }
}

impl<T: Scalar> RiemannianMetric<T> for LogEuclidean<T> {
    fn kind(&self) -> SPDMetric {
        SPDMetric::LogEuclidean
    }

    fn manifold(&self) -> &SPD<T> {
        &self.spd
    }

    fn log(&self, base: &DMatrix<T>, point: &DMatrix<T>) -> Result<DMatrix<T>> {
        let log_base = self.log_point(base, "base point")?;
        let log_point = self.log_point(point, "point")?;
        Ok(log_point - log_base)
    }

    fn exp(&self, base: &DMatrix<T>, tangent: &DMatrix<T>) -> Result<DMatrix<T>> {
        let log_base = self.log_point(base, "base point")?;
        self.spd.check_tangent(tangent)?;
        matrix_exp(&symmetrize(&(log_base + tangent)))
    }

    fn squared_distance(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<T> {
        let diff = self.log(a, b)?;
        Ok(diff.norm_squared())
    }

    fn inner_product(&self, base: &DMatrix<T>, u: &DMatrix<T>, v: &DMatrix<T>) -> Result<T> {
        self.spd.check_symmetric(base, "base point")?;
        self.spd.check_tangent(u)?;
        self.spd.check_tangent(v)?;
        frobenius_inner(u, v)
    }

    fn closed_form_mean(&self, points: &[DMatrix<T>], weights: &[T]) -> Option<Result<DMatrix<T>>> {
        Some(self.weighted_log_mean(points, weights))
    }
}

impl<T: Scalar> LogEuclidean<T> {
    fn weighted_log_mean(&self, points: &[DMatrix<T>], weights: &[T]) -> Result<DMatrix<T>> {
        if points.len() != weights.len() {
            return Err(GeometryError::dimension_mismatch(points.len(), weights.len()));
        }
        let n = self.spd.matrix_dim();
        let mut acc = DMatrix::<T>::zeros(n, n);
        for (p, &w) in points.iter().zip(weights) {
            acc += self.log_point(p, "point")? * w;
        }
        matrix_exp(&symmetrize(&acc))
    }
}
