//! Embedding followed by a flat-space classifier.
//!
//! [`TangentSpacePipeline`] fits the tangent-space mean on the training
//! split only, trains the classifier on the embedded training features and
//! embeds unseen matrices with the stored mean at prediction time. The
//! classifier itself is opaque: anything implementing [`Classifier`] works.

use crate::{dataset::LabeledDataset, tangent_space::TangentSpace};
use nalgebra::{DMatrix, DVector};
use spdtangent_core::{
    error::{EstimatorError, EstimatorResult},
    types::Scalar,
};
use spdtangent_manifolds::RiemannianMetric;

/// Flat-space classifier consuming one feature row per sample.
pub trait Classifier<T: Scalar> {
    /// Trains on `features` (one row per sample) and `labels`.
    fn fit(&mut self, features: &DMatrix<T>, labels: &[usize]) -> EstimatorResult<()>;

    /// Predicts one label per feature row.
    fn predict(&self, features: &DMatrix<T>) -> EstimatorResult<Vec<usize>>;
}

/// Assigns each sample to the class with the nearest feature centroid.
///
/// A baseline for exercising pipelines, not a tuned model.
#[derive(Debug, Clone, Default)]
pub struct NearestCentroid<T: Scalar> {
    centroids: Vec<(usize, DVector<T>)>,
}

impl<T: Scalar> NearestCentroid<T> {
    /// Creates an unfitted classifier.
    pub fn new() -> Self {
        Self {
            centroids: Vec::new(),
        }
    }

    /// Fitted (label, centroid) pairs, ordered by label.
    pub fn centroids(&self) -> &[(usize, DVector<T>)] {
        &self.centroids
    }
}

impl<T: Scalar> Classifier<T> for NearestCentroid<T> {
    fn fit(&mut self, features: &DMatrix<T>, labels: &[usize]) -> EstimatorResult<()> {
        if features.nrows() != labels.len() {
            return Err(EstimatorError::LabelMismatch {
                points: features.nrows(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(EstimatorError::EmptyDataset);
        }

        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        self.centroids = classes
            .into_iter()
            .map(|class| {
                let mut sum = DVector::zeros(features.ncols());
                let mut count = 0usize;
                for (row, _) in features.row_iter().zip(labels).filter(|(_, &l)| l == class) {
                    sum += row.transpose();
                    count += 1;
                }
                (class, sum / <T as Scalar>::from_usize(count))
            })
            .collect();
        Ok(())
    }

    fn predict(&self, features: &DMatrix<T>) -> EstimatorResult<Vec<usize>> {
        if self.centroids.is_empty() {
            return Err(EstimatorError::not_fitted("predict"));
        }
        features
            .row_iter()
            .map(|row| {
                let x = row.transpose();
                self.centroids
                    .iter()
                    .map(|(class, c)| (*class, (&x - c).norm_squared()))
                    .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(class, _)| class)
                    .ok_or_else(|| EstimatorError::not_fitted("predict"))
            })
            .collect()
    }
}

/// Tangent-space embedding chained with a classifier.
#[derive(Debug, Clone)]
pub struct TangentSpacePipeline<T: Scalar, M: RiemannianMetric<T>, C: Classifier<T>> {
    embedder: TangentSpace<T, M>,
    classifier: C,
}

impl<T, M, C> TangentSpacePipeline<T, M, C>
where
    T: Scalar,
    M: RiemannianMetric<T>,
    C: Classifier<T>,
{
    /// Chains an (unfitted) embedder with a classifier.
    pub fn new(embedder: TangentSpace<T, M>, classifier: C) -> Self {
        Self {
            embedder,
            classifier,
        }
    }

    /// The tangent-space embedder.
    pub fn embedder(&self) -> &TangentSpace<T, M> {
        &self.embedder
    }

    /// The downstream classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Fits the mean on `train`, then the classifier on the embedded features.
    pub fn fit(&mut self, train: &LabeledDataset<T>) -> EstimatorResult<()> {
        let features = self.embedder.fit_transform(train.points())?;
        self.classifier.fit(&features, train.labels())
    }

    /// Embeds `points` with the fitted mean and classifies them.
    pub fn predict(&self, points: &[DMatrix<T>]) -> EstimatorResult<Vec<usize>> {
        let features = self.embedder.transform(points)?;
        self.classifier.predict(&features)
    }

    /// Fraction of correctly predicted labels on `test`.
    pub fn score(&self, test: &LabeledDataset<T>) -> EstimatorResult<T> {
        if test.is_empty() {
            return Err(EstimatorError::EmptyDataset);
        }
        let predicted = self.predict(test.points())?;
        let correct = predicted
            .iter()
            .zip(test.labels())
            .filter(|(p, l)| p == l)
            .count();
        Ok(<T as Scalar>::from_usize(correct) / <T as Scalar>::from_usize(test.len()))
    }
}
