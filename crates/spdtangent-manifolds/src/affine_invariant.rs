//! Affine-invariant metric on S⁺⁺(n).
//!
//! ## Riemannian Metric
//!
//! ```text
//! g_P(U, V) = tr(P⁻¹ U P⁻¹ V)
//! ```
//!
//! The metric is invariant under congruence P ↦ AᵀPA for any invertible A,
//! which makes distances independent of the units of the underlying signals.
//!
//! ## Maps
//!
//! With S = P^{1/2}:
//! ```text
//! exp_P(V) = S exp(S⁻¹ V S⁻¹) S
//! log_P(M) = S log(S⁻¹ M S⁻¹) S
//! d(P, M)  = ‖log(S⁻¹ M S⁻¹)‖_F = sqrt(Σᵢ log²(λᵢ(P⁻¹M)))
//! ```
//!
//! Every congruence product is re-symmetrized before entering a spectral
//! function so that rounding asymmetry never reaches the eigensolver.

use crate::{
    metric::{RiemannianMetric, SPDMetric},
    spd::SPD,
};
use nalgebra::DMatrix;
use spdtangent_core::{
    error::Result,
    numerical::symmetric::{matrix_exp, matrix_log, matrix_power, sqrt_and_inv_sqrt, symmetrize},
    types::Scalar,
};

/// Affine-invariant geometry of S⁺⁺(n).
#[derive(Debug, Clone, PartialEq)]
pub struct AffineInvariant<T: Scalar = f64> {
    spd: SPD<T>,
}

impl<T: Scalar> AffineInvariant<T> {
    /// Creates the metric on the given manifold.
    pub fn new(spd: SPD<T>) -> Self {
        Self { spd }
    }

    /// Convenience constructor for S⁺⁺(n) with default tolerances.
    pub fn with_dim(n: usize) -> Result<Self> {
        Ok(Self::new(SPD::new(n)?))
    }

    /// Whitens `m` at `base`: returns (P^{1/2}, sym(P^{-1/2} M P^{-1/2})).
    fn whiten(&self, base: &DMatrix<T>, m: &DMatrix<T>) -> Result<(DMatrix<T>, DMatrix<T>)> {
        let (sqrt_p, inv_sqrt_p) = sqrt_and_inv_sqrt(base)?;
        let whitened = symmetrize(&(&inv_sqrt_p * m * &inv_sqrt_p));
        Ok((sqrt_p, whitened))
    }
}

impl<T: Scalar> RiemannianMetric<T> for AffineInvariant<T> {
    fn kind(&self) -> SPDMetric {
        SPDMetric::AffineInvariant
    }

    fn manifold(&self) -> &SPD<T> {
        &self.spd
    }

    fn log(&self, base: &DMatrix<T>, point: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.spd.check_symmetric(base, "base point")?;
        self.spd.check_symmetric(point, "point")?;

        let (sqrt_p, whitened) = self.whiten(base, point)?;
        let log_w = matrix_log(&whitened)?;
        Ok(symmetrize(&(&sqrt_p * log_w * &sqrt_p)))
    }

    fn exp(&self, base: &DMatrix<T>, tangent: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.spd.check_symmetric(base, "base point")?;
        self.spd.check_tangent(tangent)?;

        let (sqrt_p, whitened) = self.whiten(base, tangent)?;
        let exp_w = matrix_exp(&whitened)?;
        Ok(symmetrize(&(&sqrt_p * exp_w * &sqrt_p)))
    }

    fn squared_distance(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<T> {
        self.spd.check_symmetric(a, "point")?;
        self.spd.check_symmetric(b, "point")?;
        if a == b {
            return Ok(T::zero());
        }

        // Congruence preserves inertia: an indefinite b fails in the logarithm.
        let (_, whitened) = self.whiten(a, b)?;
        Ok(matrix_log(&whitened)?.norm_squared())
    }

    fn inner_product(&self, base: &DMatrix<T>, u: &DMatrix<T>, v: &DMatrix<T>) -> Result<T> {
        self.spd.check_symmetric(base, "base point")?;
        self.spd.check_tangent(u)?;
        self.spd.check_tangent(v)?;

        let p_inv = matrix_power(base, -T::one())?;
        let left = &p_inv * u;
        let right = &p_inv * v;
        Ok((left * right).trace())
    }
}
