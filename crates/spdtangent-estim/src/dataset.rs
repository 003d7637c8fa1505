//! Labelled collections of SPD matrices.

use nalgebra::DMatrix;
use spdtangent_core::{
    error::{EstimatorError, EstimatorResult},
    types::Scalar,
};

/// Ordered SPD matrices paired with class labels, one per subject.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset<T: Scalar> {
    points: Vec<DMatrix<T>>,
    labels: Vec<usize>,
}

impl<T: Scalar> LabeledDataset<T> {
    /// Pairs `points[i]` with `labels[i]`.
    ///
    /// # Errors
    ///
    /// `LabelMismatch` if the two sequences differ in length.
    pub fn new(points: Vec<DMatrix<T>>, labels: Vec<usize>) -> EstimatorResult<Self> {
        if points.len() != labels.len() {
            return Err(EstimatorError::LabelMismatch {
                points: points.len(),
                labels: labels.len(),
            });
        }
        Ok(Self { points, labels })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The matrices, in insertion order.
    pub fn points(&self) -> &[DMatrix<T>] {
        &self.points
    }

    /// The labels, aligned with [`LabeledDataset::points`].
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Iterates over (matrix, label) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&DMatrix<T>, usize)> {
        self.points.iter().zip(self.labels.iter().copied())
    }

    /// Distinct labels in increasing order.
    pub fn classes(&self) -> Vec<usize> {
        let mut classes = self.labels.clone();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// New dataset made of the samples at `indices`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            points: indices.iter().map(|&i| self.points[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
