//! # spdtangent
//!
//! Riemannian geometry of symmetric positive definite matrices and the
//! tangent-space features built on it.
//!
//! Covariance-like data (one SPD matrix per subject) does not live in a
//! vector space: averaging or subtracting it entrywise ignores the curvature
//! of the SPD cone. This crate computes the Fréchet mean of a training set
//! under the affine-invariant or log-Euclidean metric and re-expresses every
//! matrix as the vectorized logarithm at that mean, ready for any Euclidean
//! classifier.
//!
//! The workspace is split into:
//!
//! - [`spdtangent_core`]: scalar trait, errors and spectral matrix functions
//! - [`spdtangent_manifolds`]: the SPD manifold and its metrics
//! - [`spdtangent_estim`]: Fréchet means, tangent-space embedding and pipelines
//!
//! # Example
//!
//! ```rust
//! use spdtangent::prelude::*;
//!
//! let metric = SPDMetric::LogEuclidean.build(SPD::<f64>::new(2)?);
//! let mut embedder = TangentSpace::new(metric, 1e-10, 100)?;
//!
//! let i = DMatrix::identity(2, 2);
//! let features = embedder.fit_transform(&[&i * 2.0, i.clone()])?;
//! assert_eq!(features.shape(), (2, 3));
//! assert!((features[(0, 0)] - 0.5 * 2f64.ln()).abs() < 1e-12);
//! # Ok::<(), EstimatorError>(())
//! ```

pub use spdtangent_core;
pub use spdtangent_estim;
pub use spdtangent_manifolds;

pub use nalgebra;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use spdtangent_core::prelude::*;
    pub use spdtangent_estim::{
        Classifier, FrechetCallback, FrechetMean, FrechetMeanConfig, FrechetMeanResult,
        HistoryCallback, LabeledDataset, NearestCentroid, TangentSpace, TangentSpacePipeline,
        TerminationReason,
    };
    pub use spdtangent_manifolds::{AffineInvariant, LogEuclidean, RiemannianMetric, SPDMetric, SPD};
}
