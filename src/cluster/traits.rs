//! Clustering traits.

use crate::error::Result;
use crate::hierarchy::Dendrogram;
use crate::matrix::DistanceMatrix;

/// Trait for clustering algorithms driven by a precomputed dissimilarity matrix.
pub trait Clustering {
    /// Fit to `distances` and return the merge queue.
    fn fit(&self, distances: &DistanceMatrix) -> Result<Dendrogram>;

    /// Fit and return flat cluster labels, one per item.
    ///
    /// Labels are consecutive from 0 in order of first appearance.
    fn fit_predict(&self, distances: &DistanceMatrix) -> Result<Vec<usize>> {
        self.fit(distances)?.cut_to_k(self.n_clusters())
    }

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;
}
