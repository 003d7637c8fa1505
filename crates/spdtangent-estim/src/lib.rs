//! SPD Estimators - Fréchet means and tangent-space embeddings.
//!
//! This crate turns collections of SPD matrices into flat feature vectors
//! that any Euclidean learner can consume:
//!
//! - [`FrechetMean`]: weighted Fréchet (Karcher) mean under a metric, with a
//!   closed-form shortcut for the log-Euclidean geometry
//! - [`TangentSpace`]: fit/transform embedder mapping each matrix to the
//!   vectorized logarithm at the fitted mean
//! - [`TangentSpacePipeline`]: embedder chained with a [`Classifier`]
//!
//! # Examples
//!
//! ```rust
//! use spdtangent_estim::{LabeledDataset, NearestCentroid, TangentSpace, TangentSpacePipeline};
//! use spdtangent_manifolds::{SPDMetric, SPD};
//! use nalgebra::DMatrix;
//!
//! let metric = SPDMetric::AffineInvariant.build(SPD::<f64>::new(2)?);
//! let embedder = TangentSpace::new(metric, 1e-10, 100)?;
//! let mut pipeline = TangentSpacePipeline::new(embedder, NearestCentroid::new());
//!
//! let i = DMatrix::identity(2, 2);
//! let train = LabeledDataset::new(vec![&i * 0.5, &i * 0.6, &i * 4.0, &i * 5.0], vec![0, 0, 1, 1])?;
//! pipeline.fit(&train)?;
//! assert_eq!(pipeline.predict(&[&i * 0.4, &i * 6.0])?, vec![0, 1]);
//! # Ok::<(), spdtangent_core::EstimatorError>(())
//! ```

pub mod callback;
pub mod dataset;
pub mod frechet;
pub mod pipeline;
pub mod tangent_space;

// Re-export main types for convenience
pub use callback::{FrechetCallback, HistoryCallback, IterationInfo, NoOpCallback};
pub use dataset::LabeledDataset;
pub use frechet::{FrechetMean, FrechetMeanConfig, FrechetMeanResult, TerminationReason};
pub use pipeline::{Classifier, NearestCentroid, TangentSpacePipeline};
pub use tangent_space::TangentSpace;
