//! Callback support for the Fréchet mean iteration.
//!
//! This module provides the trait and two implementations for monitoring
//! and controlling the fixed-point iteration.

use crate::frechet::FrechetMeanResult;
use spdtangent_core::{error::EstimatorResult, types::Scalar};
use std::time::Duration;

/// Information passed to callbacks after each gradient evaluation.
#[derive(Clone, Debug)]
pub struct IterationInfo<T: Scalar> {
    /// Number of update steps taken so far
    pub iteration: usize,

    /// Frobenius norm of the mean tangent vector at the current estimate
    pub gradient_norm: T,

    /// Elapsed time since the estimation started
    pub elapsed: Duration,
}

/// Trait for Fréchet mean callbacks.
///
/// Callbacks can be used for logging, recording convergence history or
/// early stopping.
pub trait FrechetCallback<T: Scalar>: Send {
    /// Called once before the first iteration with the number of samples.
    fn on_start(&mut self, num_points: usize) -> EstimatorResult<()> {
        let _ = num_points;
        Ok(())
    }

    /// Called after each gradient evaluation.
    ///
    /// Returns `true` to continue, `false` to stop early.
    fn on_iteration(&mut self, info: &IterationInfo<T>) -> EstimatorResult<bool> {
        let _ = info;
        Ok(true)
    }

    /// Called with the final result.
    fn on_end(&mut self, result: &FrechetMeanResult<T>) -> EstimatorResult<()> {
        let _ = result;
        Ok(())
    }
}

/// A no-op callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl<T: Scalar> FrechetCallback<T> for NoOpCallback {}

/// Records the gradient norm of every iteration.
#[derive(Debug, Clone)]
pub struct HistoryCallback<T: Scalar> {
    history: Vec<(usize, T)>,
    max_iterations: Option<usize>,
}

impl<T: Scalar> HistoryCallback<T> {
    /// Creates a callback that only records.
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            max_iterations: None,
        }
    }

    /// Requests an early stop once `iterations` update steps have been taken.
    pub fn with_stop_after(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Recorded (iteration, gradient norm) pairs.
    pub fn history(&self) -> &[(usize, T)] {
        &self.history
    }
}

impl<T: Scalar> Default for HistoryCallback<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> FrechetCallback<T> for HistoryCallback<T> {
    fn on_start(&mut self, _num_points: usize) -> EstimatorResult<()> {
        self.history.clear();
        Ok(())
    }

    fn on_iteration(&mut self, info: &IterationInfo<T>) -> EstimatorResult<bool> {
        self.history.push((info.iteration, info.gradient_norm));
        Ok(self
            .max_iterations
            .map_or(true, |limit| info.iteration < limit))
    }
}
