//! SPD Manifolds - the manifold of symmetric positive definite matrices and
//! its Riemannian metrics.
//!
//! This crate provides the set S⁺⁺(n) with membership checks, projection and
//! sampling, plus the two closed-form geometries used on covariance data:
//! the affine-invariant and the log-Euclidean metric.
//!
//! # Example
//!
//! ```rust
//! use spdtangent_manifolds::{RiemannianMetric, SPDMetric, SPD};
//! use nalgebra::DMatrix;
//!
//! let metric = SPDMetric::AffineInvariant.build(SPD::<f64>::new(2)?);
//! let i = DMatrix::identity(2, 2);
//! let d = metric.distance(&i, &(&i * 4.0))?;
//! assert!((d - 2f64.sqrt() * 4f64.ln()).abs() < 1e-12);
//! # Ok::<(), spdtangent_core::GeometryError>(())
//! ```

pub mod affine_invariant;
pub mod log_euclidean;
pub mod metric;
pub mod spd;

// Re-export main types for convenience
pub use affine_invariant::AffineInvariant;
pub use log_euclidean::LogEuclidean;
pub use metric::{RiemannianMetric, SPDMetric};
pub use spd::{spd_dimension, SPD};
