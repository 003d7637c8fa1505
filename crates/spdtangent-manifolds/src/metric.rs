//! Riemannian metrics on S⁺⁺(n).
//!
//! A metric supplies the geometry of the SPD manifold: the logarithm map
//! (manifold point → tangent vector at a base point), the exponential map
//! (its inverse) and the geodesic distance. Two closed-form metrics are
//! provided:
//!
//! | Metric | log_P(M) | d²(P, M) |
//! |---|---|---|
//! | [`AffineInvariant`](crate::AffineInvariant) | P^{1/2} log(P^{-1/2} M P^{-1/2}) P^{1/2} | ‖log(P^{-1/2} M P^{-1/2})‖²_F |
//! | [`LogEuclidean`](crate::LogEuclidean) | log(M) − log(P) | ‖log(M) − log(P)‖²_F |
//!
//! Both satisfy, for every SPD P and M:
//!
//! - `exp(P, log(P, M)) = M`
//! - `squared_distance(P, M) = squared_distance(M, P)`
//! - `squared_distance(P, P) = 0`
//!
//! Metrics are immutable values; the concrete geometry is selected at
//! construction time, either statically through the concrete types or at
//! runtime through [`SPDMetric::build`].

use crate::{affine_invariant::AffineInvariant, log_euclidean::LogEuclidean, spd::SPD};
use nalgebra::DMatrix;
use num_traits::Float;
use spdtangent_core::{error::Result, types::Scalar};
use std::fmt::{self, Debug};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Available Riemannian metrics on the SPD manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SPDMetric {
    /// Affine-invariant metric, invariant under P ↦ AᵀPA
    AffineInvariant,
    /// Log-Euclidean metric, flat in log-space
    LogEuclidean,
}

impl SPDMetric {
    /// Instantiates the metric on the given manifold.
    pub fn build<T: Scalar>(self, spd: SPD<T>) -> Box<dyn RiemannianMetric<T>> {
        match self {
            SPDMetric::AffineInvariant => Box::new(AffineInvariant::new(spd)),
            SPDMetric::LogEuclidean => Box::new(LogEuclidean::new(spd)),
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            SPDMetric::AffineInvariant => "affine-invariant",
            SPDMetric::LogEuclidean => "log-euclidean",
        }
    }
}

impl fmt::Display for SPDMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability interface shared by the SPD metrics.
///
/// Points are SPD matrices, tangent vectors symmetric matrices of the same
/// size. Every method fails with `GeometryError::Domain` when an argument
/// violates its precondition (non-symmetric, not positive definite) and
/// with `DimensionMismatch` when the size differs from the manifold's.
pub trait RiemannianMetric<T: Scalar>: Debug + Send + Sync {
    /// Which closed-form geometry this is.
    fn kind(&self) -> SPDMetric;

    /// The manifold the metric lives on.
    fn manifold(&self) -> &SPD<T>;

    /// Logarithm map log_P(M) ∈ T_P S⁺⁺(n).
    fn log(&self, base: &DMatrix<T>, point: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Exponential map exp_P(V) ∈ S⁺⁺(n).
    fn exp(&self, base: &DMatrix<T>, tangent: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Squared geodesic distance d²(P, M).
    fn squared_distance(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<T>;

    /// Inner product ⟨U, V⟩_P on the tangent space at `base`.
    fn inner_product(&self, base: &DMatrix<T>, u: &DMatrix<T>, v: &DMatrix<T>) -> Result<T>;

    /// Geodesic distance d(P, M).
    fn distance(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<T> {
        let d2 = self.squared_distance(a, b)?;
        Ok(<T as Float>::sqrt(<T as Float>::max(d2, T::zero())))
    }

    /// Riemannian norm ‖V‖_P.
    fn norm(&self, base: &DMatrix<T>, v: &DMatrix<T>) -> Result<T> {
        let sq = self.inner_product(base, v, v)?;
        Ok(<T as Float>::sqrt(<T as Float>::max(sq, T::zero())))
    }

    /// Point at parameter `t` on the geodesic from `start` (t = 0) to `end` (t = 1).
    fn geodesic(&self, start: &DMatrix<T>, end: &DMatrix<T>, t: T) -> Result<DMatrix<T>> {
        let direction = self.log(start, end)? * t;
        self.exp(start, &direction)
    }

    /// Closed-form weighted Fréchet mean, when the geometry has one.
    ///
    /// `weights` are expected to be non-negative and to sum to one. Returns
    /// `None` when the mean has to be found iteratively.
    fn closed_form_mean(&self, points: &[DMatrix<T>], weights: &[T]) -> Option<Result<DMatrix<T>>> {
        let _ = (points, weights);
        None
    }
}

impl<T: Scalar, M: RiemannianMetric<T> + ?Sized> RiemannianMetric<T> for Box<M> {
    fn kind(&self) -> SPDMetric {
        (**self).kind()
    }

    fn manifold(&self) -> &SPD<T> {
        (**self).manifold()
    }

    fn log(&self, base: &DMatrix<T>, point: &DMatrix<T>) -> Result<DMatrix<T>> {
        (**self).log(base, point)
    }

    fn exp(&self, base: &DMatrix<T>, tangent: &DMatrix<T>) -> Result<DMatrix<T>> {
        (**self).exp(base, tangent)
    }

    fn squared_distance(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<T> {
        (**self).squared_distance(a, b)
    }

    fn inner_product(&self, base: &DMatrix<T>, u: &DMatrix<T>, v: &DMatrix<T>) -> Result<T> {
        (**self).inner_product(base, u, v)
    }

    fn distance(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<T> {
        (**self).distance(a, b)
    }

    fn norm(&self, base: &DMatrix<T>, v: &DMatrix<T>) -> Result<T> {
        (**self).norm(base, v)
    }

    fn geodesic(&self, start: &DMatrix<T>, end: &DMatrix<T>, t: T) -> Result<DMatrix<T>> {
        (**self).geodesic(start, end, t)
    }

    fn closed_form_mean(&self, points: &[DMatrix<T>], weights: &[T]) -> Option<Result<DMatrix<T>>> {
        (**self).closed_form_mean(points, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_dispatches_on_kind() {
        let spd = SPD::<f64>::new(2).unwrap();
        for kind in [SPDMetric::AffineInvariant, SPDMetric::LogEuclidean] {
            let metric = kind.build(spd.clone());
            assert_eq!(metric.kind(), kind);
            assert_eq!(metric.manifold().matrix_dim(), 2);
        }
        assert_eq!(SPDMetric::LogEuclidean.to_string(), "log-euclidean");
    }

    #[test]
    fn test_boxed_metric_forwards() {
        let spd = SPD::<f64>::new(2).unwrap();
        let boxed = SPDMetric::AffineInvariant.build(spd.clone());
        let direct = AffineInvariant::new(spd);

        let p = DMatrix::<f64>::identity(2, 2);
        let q = DMatrix::from_row_slice(2, 2, &[2.0, 0.3, 0.3, 1.0]);
        assert_relative_eq!(
            boxed.distance(&p, &q).unwrap(),
            direct.distance(&p, &q).unwrap(),
            epsilon = 1e-14
        );
        assert!(boxed.closed_form_mean(&[p.clone()], &[1.0]).is_none());
    }

    #[test]
    fn test_geodesic_endpoints() {
        let spd = SPD::<f64>::new(2).unwrap();
        let p = DMatrix::from_row_slice(2, 2, &[1.0, 0.2, 0.2, 2.0]);
        let q = DMatrix::from_row_slice(2, 2, &[3.0, -0.4, -0.4, 1.5]);

        for kind in [SPDMetric::AffineInvariant, SPDMetric::LogEuclidean] {
            let metric = kind.build(spd.clone());
            assert_relative_eq!(metric.geodesic(&p, &q, 0.0).unwrap(), p, epsilon = 1e-12);
            assert_relative_eq!(metric.geodesic(&p, &q, 1.0).unwrap(), q, epsilon = 1e-10);

            // Midpoint is equidistant from both ends.
            let mid = metric.geodesic(&p, &q, 0.5).unwrap();
            assert!(spd.belongs(&mid, 1e-10));
            assert_relative_eq!(
                metric.distance(&p, &mid).unwrap(),
                metric.distance(&mid, &q).unwrap(),
                epsilon = 1e-10
            );
        }
    }
}
