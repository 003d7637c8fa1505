//! Fréchet (Karcher) mean of SPD matrices.
//!
//! The Fréchet mean of samples M₁, …, Mₖ with weights w₁, …, wₖ is the
//! minimiser of the weighted sum of squared geodesic distances
//! ```text
//! F(P) = Σᵢ wᵢ d²(P, Mᵢ)
//! ```
//! Its Riemannian gradient is −2 Σᵢ wᵢ log_P(Mᵢ), so the mean is the fixed
//! point of
//! ```text
//! P₀     = Σᵢ wᵢ Mᵢ                 (arithmetic mean, SPD by convexity)
//! Vₜ     = Σᵢ wᵢ log_{Pₜ}(Mᵢ)
//! Pₜ₊₁   = exp_{Pₜ}(Vₜ)
//! ```
//! iterated until ‖Vₜ‖_F < tolerance.
//!
//! Reaching the iteration cap is not an error: the estimator returns the
//! iterate with the smallest gradient norm seen, flags the result as not
//! converged and emits a warning through `tracing`.
//!
//! # Example
//!
//! ```rust
//! use spdtangent_estim::FrechetMean;
//! use spdtangent_manifolds::LogEuclidean;
//! use nalgebra::DMatrix;
//!
//! let estimator = FrechetMean::new(LogEuclidean::<f64>::with_dim(2)?, 1e-10, 100)?;
//! let i = DMatrix::identity(2, 2);
//! let result = estimator.estimate(&[i.clone(), &i * 2.0])?;
//! assert!((result.mean[(0, 0)] - 2f64.sqrt()).abs() < 1e-12);
//! # Ok::<(), spdtangent_core::EstimatorError>(())
//! ```

use crate::callback::{FrechetCallback, IterationInfo, NoOpCallback};
use nalgebra::DMatrix;
use num_traits::Float;
use spdtangent_core::{
    error::{EstimatorError, EstimatorResult, Result},
    numerical::symmetric::symmetrize,
    types::Scalar,
};
use spdtangent_manifolds::RiemannianMetric;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum number of samples before the log maps are fanned out with rayon.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_SAMPLES: usize = 32;

/// Reasons for the estimator to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// ‖Vₜ‖_F fell below the tolerance
    Converged,
    /// Iteration cap exhausted; the best iterate was returned
    MaxIterations,
    /// Mean computed from the metric's closed form
    ClosedForm,
    /// A single sample is its own mean
    SinglePoint,
    /// A callback requested early termination
    CallbackRequest,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TerminationReason::Converged => "converged",
            TerminationReason::MaxIterations => "maximum iterations reached",
            TerminationReason::ClosedForm => "closed form",
            TerminationReason::SinglePoint => "single point",
            TerminationReason::CallbackRequest => "stopped by callback",
        };
        f.write_str(s)
    }
}

/// Configuration of the fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrechetMeanConfig<T: Scalar> {
    /// Stop once ‖Vₜ‖_F drops below this value
    pub tolerance: T,
    /// Maximum number of update steps
    pub max_iterations: usize,
    /// Use the metric's closed form when it has one
    pub use_closed_form: bool,
    /// Compute the per-sample log maps in parallel (requires the `parallel` feature)
    pub parallel: bool,
}

impl<T: Scalar> FrechetMeanConfig<T> {
    /// Creates a configuration with the given stopping rule.
    ///
    /// Closed forms and parallel evaluation are enabled.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            use_closed_form: true,
            parallel: true,
        }
    }

    /// Sets the gradient norm tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enables or disables the closed-form shortcut.
    pub fn with_closed_form(mut self, enabled: bool) -> Self {
        self.use_closed_form = enabled;
        self
    }

    /// Enables or disables parallel log maps.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Checks that the stopping rule can be met.
    pub fn validate(&self) -> EstimatorResult<()> {
        if !(self.tolerance > T::zero()) || !<T as Float>::is_finite(self.tolerance) {
            return Err(EstimatorError::invalid_configuration(
                "must be positive and finite",
                "tolerance",
                self.tolerance.to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(EstimatorError::invalid_configuration(
                "must be at least 1",
                "max_iterations",
                "0",
            ));
        }
        Ok(())
    }
}

/// Outcome of a Fréchet mean estimation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrechetMeanResult<T: Scalar> {
    /// The estimated mean
    pub mean: DMatrix<T>,

    /// Number of update steps taken. When the cap is hit this is the cap,
    /// even though `mean` may be an earlier iterate; see `best_iteration`.
    pub iterations: usize,

    /// Index of the iterate returned as `mean`
    pub best_iteration: usize,

    /// ‖V‖_F at the returned mean (zero for closed forms and single points)
    pub gradient_norm: T,

    /// Weighted mean squared distance from the returned mean to the samples
    pub variance: T,

    /// Wall-clock time of the estimation
    pub duration: Duration,

    /// Why the estimator stopped
    pub termination_reason: TerminationReason,

    /// True unless the iteration was cut short
    pub converged: bool,
}

impl<T: Scalar> FrechetMeanResult<T> {
    fn new(
        mean: DMatrix<T>,
        iterations: usize,
        gradient_norm: T,
        termination_reason: TerminationReason,
    ) -> Self {
        let converged = matches!(
            termination_reason,
            TerminationReason::Converged
                | TerminationReason::ClosedForm
                | TerminationReason::SinglePoint
        );

        Self {
            mean,
            iterations,
            best_iteration: iterations,
            gradient_norm,
            variance: T::zero(),
            duration: Duration::ZERO,
            termination_reason,
            converged,
        }
    }
}

/// Iterative Fréchet mean estimator for a fixed metric.
#[derive(Debug, Clone)]
pub struct FrechetMean<T: Scalar, M: RiemannianMetric<T>> {
    metric: M,
    config: FrechetMeanConfig<T>,
}

impl<T: Scalar, M: RiemannianMetric<T>> FrechetMean<T, M> {
    /// Creates an estimator with an explicit stopping rule.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `tolerance` is not positive and finite or
    /// `max_iterations` is zero.
    pub fn new(metric: M, tolerance: T, max_iterations: usize) -> EstimatorResult<Self> {
        Self::with_config(metric, FrechetMeanConfig::new(tolerance, max_iterations))
    }

    /// Creates an estimator from a full configuration.
    pub fn with_config(metric: M, config: FrechetMeanConfig<T>) -> EstimatorResult<Self> {
        config.validate()?;
        Ok(Self { metric, config })
    }

    /// The metric the mean is computed under.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The active configuration.
    pub fn config(&self) -> &FrechetMeanConfig<T> {
        &self.config
    }

    /// Unweighted Fréchet mean of `points`.
    ///
    /// # Errors
    ///
    /// - `EmptyDataset` if `points` is empty
    /// - `Geometry` if a sample is not an SPD matrix of the metric's size,
    ///   or a matrix function fails during the iteration
    pub fn estimate(&self, points: &[DMatrix<T>]) -> EstimatorResult<FrechetMeanResult<T>> {
        self.estimate_with_callback(points, None, &mut NoOpCallback)
    }

    /// Weighted Fréchet mean; weights are normalised to sum to one.
    ///
    /// # Errors
    ///
    /// As [`FrechetMean::estimate`], plus `InvalidWeights` if the weights
    /// have the wrong length, are negative or non-finite, or sum to zero.
    pub fn estimate_weighted(
        &self,
        points: &[DMatrix<T>],
        weights: &[T],
    ) -> EstimatorResult<FrechetMeanResult<T>> {
        self.estimate_with_callback(points, Some(weights), &mut NoOpCallback)
    }

    /// Full entry point with optional weights and a callback.
    pub fn estimate_with_callback(
        &self,
        points: &[DMatrix<T>],
        weights: Option<&[T]>,
        callback: &mut dyn FrechetCallback<T>,
    ) -> EstimatorResult<FrechetMeanResult<T>> {
        let start = Instant::now();

        if points.is_empty() {
            return Err(EstimatorError::EmptyDataset);
        }
        let spd = self.metric.manifold();
        for p in points {
            spd.check_point(p)?;
        }
        let weights = match weights {
            Some(w) => normalize_weights(w, points.len())?,
            None => vec![T::one() / <T as Scalar>::from_usize(points.len()); points.len()],
        };

        callback.on_start(points.len())?;

        let mut result = if points.len() == 1 {
            FrechetMeanResult::new(points[0].clone(), 0, T::zero(), TerminationReason::SinglePoint)
        } else if let Some(mean) = self
            .config
            .use_closed_form
            .then(|| self.metric.closed_form_mean(points, &weights))
            .flatten()
        {
            debug!(metric = %self.metric.kind(), "Fréchet mean from closed form");
            FrechetMeanResult::new(mean?, 0, T::zero(), TerminationReason::ClosedForm)
        } else {
            self.iterate(points, &weights, start, callback)?
        };

        if result.termination_reason != TerminationReason::SinglePoint {
            result.variance = self.variance(&result.mean, points, &weights)?;
        }
        result.duration = start.elapsed();
        callback.on_end(&result)?;
        Ok(result)
    }

    fn iterate(
        &self,
        points: &[DMatrix<T>],
        weights: &[T],
        start: Instant,
        callback: &mut dyn FrechetCallback<T>,
    ) -> EstimatorResult<FrechetMeanResult<T>> {
        let n = self.metric.manifold().matrix_dim();
        let mut current = points
            .iter()
            .zip(weights)
            .fold(DMatrix::<T>::zeros(n, n), |acc, (p, &w)| acc + p * w);
        current = symmetrize(&current);

        let mut best = (current.clone(), <T as Float>::infinity(), 0);
        let mut iteration = 0;

        loop {
            let gradient = self.weighted_log_sum(&current, points, weights)?;
            let gradient_norm = gradient.norm();
            if gradient_norm < best.1 {
                best = (current.clone(), gradient_norm, iteration);
            }

            debug!(
                iteration,
                gradient_norm = <T as Scalar>::to_f64(gradient_norm),
                "Fréchet mean iteration"
            );

            let info = IterationInfo {
                iteration,
                gradient_norm,
                elapsed: start.elapsed(),
            };
            let keep_going = callback.on_iteration(&info)?;

            if gradient_norm < self.config.tolerance {
                return Ok(FrechetMeanResult::new(
                    current,
                    iteration,
                    gradient_norm,
                    TerminationReason::Converged,
                ));
            }
            if !keep_going {
                debug!(iteration, "Fréchet mean stopped by callback");
                return Ok(FrechetMeanResult::new(
                    current,
                    iteration,
                    gradient_norm,
                    TerminationReason::CallbackRequest,
                ));
            }
            if iteration >= self.config.max_iterations {
                let (mean, best_norm, best_iteration) = best;
                warn!(
                    max_iterations = self.config.max_iterations,
                    best_iteration,
                    gradient_norm = <T as Scalar>::to_f64(best_norm),
                    tolerance = <T as Scalar>::to_f64(self.config.tolerance),
                    "Fréchet mean did not converge, returning best iterate"
                );
                let mut result = FrechetMeanResult::new(
                    mean,
                    iteration,
                    best_norm,
                    TerminationReason::MaxIterations,
                );
                result.best_iteration = best_iteration;
                return Ok(result);
            }

            current = self.metric.exp(&current, &gradient)?;
            iteration += 1;
        }
    }

    /// Σᵢ wᵢ log_base(Mᵢ).
    fn weighted_log_sum(
        &self,
        base: &DMatrix<T>,
        points: &[DMatrix<T>],
        weights: &[T],
    ) -> Result<DMatrix<T>> {
        let n = base.nrows();

        #[cfg(feature = "parallel")]
        if self.config.parallel && points.len() >= MIN_PARALLEL_SAMPLES {
            let sum = points
                .par_iter()
                .zip(weights.par_iter())
                .map(|(p, &w)| self.metric.log(base, p).map(|v| v * w))
                .try_reduce(|| DMatrix::zeros(n, n), |a, b| Ok(a + b))?;
            return Ok(symmetrize(&sum));
        }

        let mut sum = DMatrix::zeros(n, n);
        for (p, &w) in points.iter().zip(weights) {
            sum += self.metric.log(base, p)? * w;
        }
        Ok(symmetrize(&sum))
    }

    fn variance(&self, mean: &DMatrix<T>, points: &[DMatrix<T>], weights: &[T]) -> Result<T> {
        let mut total = T::zero();
        for (p, &w) in points.iter().zip(weights) {
            total += self.metric.squared_distance(mean, p)? * w;
        }
        Ok(total)
    }
}

/// Validates weights and rescales them to sum to one.
fn normalize_weights<T: Scalar>(weights: &[T], expected: usize) -> EstimatorResult<Vec<T>> {
    if weights.len() != expected {
        return Err(EstimatorError::invalid_weights(format!(
            "expected {expected} weights, got {}",
            weights.len()
        )));
    }
    if let Some(bad) = weights
        .iter()
        .find(|&&w| !<T as Float>::is_finite(w) || w < T::zero())
    {
        return Err(EstimatorError::invalid_weights(format!(
            "weights must be finite and non-negative, got {bad}"
        )));
    }
    let total = weights.iter().fold(T::zero(), |acc, &w| acc + w);
    if !(total > T::zero()) {
        return Err(EstimatorError::invalid_weights("weights sum to zero"));
    }
    Ok(weights.iter().map(|&w| w / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::HistoryCallback;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use spdtangent_manifolds::{AffineInvariant, LogEuclidean, SPDMetric, SPD};

    fn diag(values: &[f64]) -> DMatrix<f64> {
        DMatrix::from_diagonal(&nalgebra::DVector::from_row_slice(values))
    }

    #[test]
    fn test_config_validation() {
        let metric = LogEuclidean::<f64>::with_dim(2).unwrap();
        for (tol, iters) in [(0.0, 10), (-1.0, 10), (f64::NAN, 10), (f64::INFINITY, 10), (1e-8, 0)] {
            let err = FrechetMean::new(metric.clone(), tol, iters).unwrap_err();
            assert!(matches!(err, EstimatorError::InvalidConfiguration { .. }));
        }
        assert!(FrechetMean::new(metric, 1e-8, 1).is_ok());
    }

    #[test]
    fn test_single_point_is_its_own_mean() {
        let estimator = FrechetMean::new(AffineInvariant::<f64>::with_dim(2).unwrap(), 1e-10, 50).unwrap();
        let p = DMatrix::from_row_slice(2, 2, &[2.0, 0.4, 0.4, 1.0]);

        let result = estimator.estimate(&[p.clone()]).unwrap();
        assert_eq!(result.mean, p);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.termination_reason, TerminationReason::SinglePoint);
        assert!(result.converged);
        assert_eq!(result.variance, 0.0);
    }

    #[test]
    fn test_log_euclidean_single_point_and_copies() {
        let p = DMatrix::from_row_slice(2, 2, &[2.5, 0.7, 0.7, 1.1]);

        // Default config goes through the closed form for k > 1.
        let estimator = FrechetMean::new(LogEuclidean::<f64>::with_dim(2).unwrap(), 1e-10, 50).unwrap();
        let single = estimator.estimate(&[p.clone()]).unwrap();
        assert_eq!(single.mean, p);
        assert_eq!(single.termination_reason, TerminationReason::SinglePoint);
        assert_eq!(single.variance, 0.0);

        let copies = estimator.estimate(&vec![p.clone(); 4]).unwrap();
        assert_eq!(copies.termination_reason, TerminationReason::ClosedForm);
        assert!(copies.converged);
        assert_relative_eq!(copies.mean, p, epsilon = 1e-12);
        assert!(copies.variance < 1e-20);

        let iterative = FrechetMean::with_config(
            LogEuclidean::<f64>::with_dim(2).unwrap(),
            FrechetMeanConfig::new(1e-10, 50).with_closed_form(false),
        )
        .unwrap();
        let copies = iterative.estimate(&vec![p.clone(); 4]).unwrap();
        assert_eq!(copies.termination_reason, TerminationReason::Converged);
        assert_relative_eq!(copies.mean, p, epsilon = 1e-10);
    }

    #[test]
    fn test_identical_copies() {
        let estimator = FrechetMean::new(AffineInvariant::<f64>::with_dim(2).unwrap(), 1e-10, 50).unwrap();
        let p = DMatrix::from_row_slice(2, 2, &[3.0, -0.5, -0.5, 1.2]);

        let result = estimator.estimate(&vec![p.clone(); 5]).unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.mean, p, epsilon = 1e-10);
        assert!(result.variance < 1e-18);
    }

    #[test]
    fn test_affine_invariant_commuting_mean() {
        // Commuting inputs: the mean is the geometric mean of the spectra.
        let estimator = FrechetMean::new(AffineInvariant::<f64>::with_dim(2).unwrap(), 1e-12, 100).unwrap();
        let points = vec![diag(&[1.0, 4.0]), diag(&[4.0, 1.0]), diag(&[2.0, 2.0])];

        let result = estimator.estimate(&points).unwrap();
        assert_eq!(result.termination_reason, TerminationReason::Converged);
        assert_relative_eq!(result.mean, diag(&[2.0, 2.0]), epsilon = 1e-10);
    }

    #[test]
    fn test_closed_form_matches_iteration() {
        let metric = LogEuclidean::<f64>::with_dim(3).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let points: Vec<_> = (0..6).map(|_| metric.manifold().random_point_with(&mut rng)).collect();

        let closed = FrechetMean::new(metric.clone(), 1e-12, 200).unwrap();
        let iterative = FrechetMean::with_config(
            metric,
            FrechetMeanConfig::new(1e-12, 200).with_closed_form(false),
        )
        .unwrap();

        let a = closed.estimate(&points).unwrap();
        let b = iterative.estimate(&points).unwrap();
        assert_eq!(a.termination_reason, TerminationReason::ClosedForm);
        assert_eq!(a.iterations, 0);
        assert_eq!(b.termination_reason, TerminationReason::Converged);
        assert_relative_eq!(a.mean, b.mean, epsilon = 1e-9);
        assert_relative_eq!(a.variance, b.variance, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_cap_returns_best_iterate() {
        let metric = AffineInvariant::<f64>::with_dim(3).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let points: Vec<_> = (0..8).map(|_| metric.manifold().random_point_with(&mut rng)).collect();
        let estimator = FrechetMean::new(metric.clone(), 1e-300, 1).unwrap();

        let result = estimator.estimate(&points).unwrap();
        assert!(!result.converged);
        assert_eq!(result.termination_reason, TerminationReason::MaxIterations);
        assert_eq!(result.iterations, 1);
        assert!(result.best_iteration <= result.iterations);
        assert!(metric.manifold().check_point(&result.mean).is_ok());
    }

    #[test]
    fn test_iteration_cap_reports_best_iteration() {
        let metric = AffineInvariant::<f64>::with_dim(3).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let points: Vec<_> = (0..8).map(|_| metric.manifold().random_point_with(&mut rng)).collect();
        let estimator = FrechetMean::new(metric, 1e-300, 5).unwrap();

        let mut callback = HistoryCallback::new();
        let result = estimator
            .estimate_with_callback(&points, None, &mut callback)
            .unwrap();
        assert_eq!(result.iterations, 5);

        // The returned mean is the iterate with the smallest recorded gradient.
        let (best_index, best_norm) = callback
            .history()
            .iter()
            .copied()
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        assert_eq!(result.best_iteration, best_index);
        assert_eq!(result.gradient_norm, best_norm);
    }

    #[test]
    fn test_weighted_mean() {
        let metric = LogEuclidean::<f64>::with_dim(2).unwrap();
        let estimator = FrechetMean::new(metric, 1e-12, 50).unwrap();
        let points = vec![diag(&[1.0, 1.0]), diag(&[8.0, 8.0])];

        // Weights 2:1 on log-scale give exp(ln 8 / 3) = 2.
        let result = estimator.estimate_weighted(&points, &[2.0, 1.0]).unwrap();
        assert_relative_eq!(result.mean, diag(&[2.0, 2.0]), epsilon = 1e-12);

        // A zero weight removes the sample.
        let result = estimator.estimate_weighted(&points, &[0.0, 3.0]).unwrap();
        assert_relative_eq!(result.mean, diag(&[8.0, 8.0]), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_weights() {
        let estimator = FrechetMean::new(LogEuclidean::<f64>::with_dim(1).unwrap(), 1e-10, 10).unwrap();
        let points = vec![diag(&[1.0]), diag(&[2.0])];

        for weights in [vec![1.0], vec![-1.0, 2.0], vec![0.0, 0.0], vec![f64::NAN, 1.0]] {
            let err = estimator.estimate_weighted(&points, &weights).unwrap_err();
            assert!(matches!(err, EstimatorError::InvalidWeights { .. }), "{weights:?}");
        }
    }

    #[test]
    fn test_empty_and_invalid_samples() {
        let estimator = FrechetMean::new(AffineInvariant::<f64>::with_dim(2).unwrap(), 1e-10, 10).unwrap();
        assert!(matches!(estimator.estimate(&[]).unwrap_err(), EstimatorError::EmptyDataset));

        let indefinite = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        match estimator.estimate(&[DMatrix::identity(2, 2), indefinite]).unwrap_err() {
            EstimatorError::Geometry(e) => assert!(e.is_domain()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_callback_early_stop() {
        let metric = SPDMetric::AffineInvariant.build(SPD::<f64>::new(3).unwrap());
        let mut rng = StdRng::seed_from_u64(2);
        let points: Vec<_> = (0..5).map(|_| metric.manifold().random_point_with(&mut rng)).collect();
        let estimator = FrechetMean::new(metric, 1e-300, 100).unwrap();

        let mut callback = HistoryCallback::new().with_stop_after(2);
        let result = estimator
            .estimate_with_callback(&points, None, &mut callback)
            .unwrap();

        assert_eq!(result.termination_reason, TerminationReason::CallbackRequest);
        assert_eq!(result.iterations, 2);
        assert!(!result.converged);
        let iterations: Vec<usize> = callback.history().iter().map(|&(i, _)| i).collect();
        assert_eq!(iterations, vec![0, 1, 2]);
    }

    #[test]
    fn test_gradient_norm_decreases() {
        let metric = AffineInvariant::<f64>::with_dim(3).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let points: Vec<_> = (0..10).map(|_| metric.manifold().random_point_with(&mut rng)).collect();
        let estimator = FrechetMean::new(metric, 1e-12, 100).unwrap();

        let mut callback = HistoryCallback::new();
        let result = estimator
            .estimate_with_callback(&points, None, &mut callback)
            .unwrap();
        assert!(result.converged);

        let norms: Vec<f64> = callback.history().iter().map(|&(_, g)| g).collect();
        assert!(norms.first().unwrap() > norms.last().unwrap());
        assert!(*norms.last().unwrap() < 1e-12);
    }
}
