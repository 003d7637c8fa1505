//! Tangent-space embedding of SPD matrices.
//!
//! The embedder is fitted once: it computes the Fréchet mean P̄ of the
//! training matrices under its metric and stores it. Afterwards every SPD
//! matrix M is mapped to the flat feature vector
//! ```text
//! x(M) = vec(log_P̄(M)) ∈ ℝ^{n(n+1)/2}
//! ```
//! where `vec` is the isometric vectorization (off-diagonal entries scaled
//! by √2), so Euclidean distances between features approximate geodesic
//! distances near the mean.
//!
//! The mean must be fitted on training data only; `transform` never
//! touches it and may be called on unseen data.
//!
//! # Example
//!
//! ```rust
//! use spdtangent_estim::TangentSpace;
//! use spdtangent_manifolds::LogEuclidean;
//! use nalgebra::DMatrix;
//!
//! let mut embedder = TangentSpace::new(LogEuclidean::<f64>::with_dim(2)?, 1e-10, 100)?;
//! let i = DMatrix::identity(2, 2);
//! let features = embedder.fit_transform(&[&i * 2.0, i.clone()])?;
//! assert_eq!(features.shape(), (2, 3));
//! # Ok::<(), spdtangent_core::EstimatorError>(())
//! ```

use crate::frechet::{FrechetMean, FrechetMeanConfig, FrechetMeanResult};
use nalgebra::{DMatrix, DVector};
use spdtangent_core::{
    error::{EstimatorError, EstimatorResult},
    numerical::symmetric::vectorize,
    types::Scalar,
};
use spdtangent_manifolds::RiemannianMetric;
use tracing::debug;

/// Fit/transform embedder mapping SPD matrices to tangent vectors at their mean.
#[derive(Debug, Clone)]
pub struct TangentSpace<T: Scalar, M: RiemannianMetric<T>> {
    estimator: FrechetMean<T, M>,
    fitted: Option<FrechetMeanResult<T>>,
}

impl<T: Scalar, M: RiemannianMetric<T>> TangentSpace<T, M> {
    /// Creates an unfitted embedder whose mean is estimated with the given
    /// stopping rule.
    pub fn new(metric: M, tolerance: T, max_iterations: usize) -> EstimatorResult<Self> {
        Ok(Self::from_estimator(FrechetMean::new(
            metric,
            tolerance,
            max_iterations,
        )?))
    }

    /// Creates an unfitted embedder from a full estimator configuration.
    pub fn with_config(metric: M, config: FrechetMeanConfig<T>) -> EstimatorResult<Self> {
        Ok(Self::from_estimator(FrechetMean::with_config(metric, config)?))
    }

    /// Wraps an existing estimator.
    pub fn from_estimator(estimator: FrechetMean<T, M>) -> Self {
        Self {
            estimator,
            fitted: None,
        }
    }

    /// The metric used for both the mean and the log map.
    pub fn metric(&self) -> &M {
        self.estimator.metric()
    }

    /// The mean estimator.
    pub fn estimator(&self) -> &FrechetMean<T, M> {
        &self.estimator
    }

    /// Returns true once [`TangentSpace::fit`] has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The fitted reference point, if any.
    pub fn mean(&self) -> Option<&DMatrix<T>> {
        self.fitted.as_ref().map(|r| &r.mean)
    }

    /// Full outcome of the last successful fit.
    pub fn fit_result(&self) -> Option<&FrechetMeanResult<T>> {
        self.fitted.as_ref()
    }

    /// Length of the produced feature vectors, n(n+1)/2.
    pub fn feature_dimension(&self) -> usize {
        self.metric().manifold().dimension()
    }

    /// Computes and stores the Fréchet mean of `points`.
    ///
    /// A failed fit leaves the previous state untouched.
    ///
    /// # Errors
    ///
    /// - `EmptyDataset` if `points` is empty
    /// - `Geometry` if a sample is not SPD of the metric's size
    pub fn fit(&mut self, points: &[DMatrix<T>]) -> EstimatorResult<&FrechetMeanResult<T>> {
        let result = self.estimator.estimate(points)?;
        Ok(self.store(result))
    }

    /// Like [`TangentSpace::fit`] with per-sample weights.
    pub fn fit_weighted(
        &mut self,
        points: &[DMatrix<T>],
        weights: &[T],
    ) -> EstimatorResult<&FrechetMeanResult<T>> {
        let result = self.estimator.estimate_weighted(points, weights)?;
        Ok(self.store(result))
    }

    fn store(&mut self, result: FrechetMeanResult<T>) -> &FrechetMeanResult<T> {
        debug!(
            iterations = result.iterations,
            converged = result.converged,
            termination = %result.termination_reason,
            "tangent space fitted"
        );
        self.fitted.insert(result)
    }

    /// Embeds a single SPD matrix: vec(log_P̄(M)).
    ///
    /// # Errors
    ///
    /// - `NotFitted` before a successful fit
    /// - `Geometry` if `point` is not SPD of the metric's size
    pub fn transform_one(&self, point: &DMatrix<T>) -> EstimatorResult<DVector<T>> {
        let mean = self.fitted_mean("transform")?;
        self.embed(mean, point)
    }

    /// Embeds every matrix of `points`; row i of the output is the feature
    /// vector of `points[i]`.
    ///
    /// # Errors
    ///
    /// As [`TangentSpace::transform_one`].
    pub fn transform(&self, points: &[DMatrix<T>]) -> EstimatorResult<DMatrix<T>> {
        let mean = self.fitted_mean("transform")?;
        let mut features = DMatrix::zeros(points.len(), self.feature_dimension());
        for (i, point) in points.iter().enumerate() {
            let row = self.embed(mean, point)?;
            features.row_mut(i).copy_from(&row.transpose());
        }
        Ok(features)
    }

    /// Fits on `points`, then embeds the same points.
    pub fn fit_transform(&mut self, points: &[DMatrix<T>]) -> EstimatorResult<DMatrix<T>> {
        self.fit(points)?;
        self.transform(points)
    }

    fn fitted_mean(&self, operation: &str) -> EstimatorResult<&DMatrix<T>> {
        self.mean()
            .ok_or_else(|| EstimatorError::not_fitted(operation))
    }

    fn embed(&self, mean: &DMatrix<T>, point: &DMatrix<T>) -> EstimatorResult<DVector<T>> {
        self.metric().manifold().check_point(point)?;
        let tangent = self.metric().log(mean, point)?;
        Ok(vectorize(&tangent)?)
    }
}
