//! Hierarchical (agglomerative) clustering over a precomputed matrix.
//!
//! Bottom-up clustering that records a **merge queue** by repeatedly joining
//! the two closest alive clusters until `g` remain.
//!
//! # Linkage Methods
//!
//! The key choice: how do we define "distance between clusters"?
//!
//! | Linkage | Update for `d(i, a ∪ b)` | Effect |
//! |---------|--------------------------|--------|
//! | Single | `min(d(i,a), d(i,b))` | Chaining; elongated clusters |
//! | Complete | `max(d(i,a), d(i,b))` | Compact clusters |
//! | Average | `(nₐ·d(i,a) + n_b·d(i,b)) / (nₐ + n_b)` | Balanced compromise |
//!
//! # Tie-break
//!
//! When two alive clusters offer the same smallest distance, the one with the
//! strictly smaller size wins; if sizes are equal too, the lower id wins.
//! Output is therefore reproducible byte for byte.
//!
//! # Entry points
//!
//! [`single_linkage`], [`complete_linkage`] and [`average_linkage`] treat an
//! unreachable target (`g == 0` or `g >= n`) as a no-op and return an empty
//! [`Dendrogram`]. [`HierarchicalClustering`] reports the same condition as
//! [`Error::InvalidClusterCount`].

use core::fmt;
use core::str::FromStr;

use super::driver::agglomerate;
use super::heaped::{AverageLinkage, CompleteLinkage};
use super::registry::ClusterRegistry;
use super::single::SingleLinkage;
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::hierarchy::Dendrogram;
use crate::matrix::DistanceMatrix;
use tracing::debug;

/// Linkage method for hierarchical clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Linkage {
    /// Single linkage: minimum distance between clusters.
    #[default]
    Single,
    /// Complete linkage: maximum distance between clusters.
    Complete,
    /// Average linkage: size-weighted mean distance between clusters.
    Average,
}

impl Linkage {
    /// Cluster `distances` down to `n_clusters` clusters.
    ///
    /// An unreachable target returns an empty dendrogram without reading the
    /// matrix.
    pub fn cluster(self, distances: &DistanceMatrix, n_clusters: usize) -> Result<Dendrogram> {
        let n = distances.n_items();
        if n == 0 || n_clusters == 0 || n_clusters >= n {
            return Ok(Dendrogram::new(n));
        }

        debug!(n_items = n, n_clusters, linkage = %self, "agglomerating");
        let registry = ClusterRegistry::new(n)?;
        let dendrogram = match self {
            Linkage::Single => agglomerate(SingleLinkage::new(distances)?, registry, n_clusters)?,
            Linkage::Complete => {
                agglomerate(CompleteLinkage::new(distances)?, registry, n_clusters)?
            }
            Linkage::Average => agglomerate(AverageLinkage::new(distances)?, registry, n_clusters)?,
        };
        debug!(n_merges = dendrogram.n_merges(), "agglomeration complete");

        Ok(dendrogram)
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
        })
    }
}

impl FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s" | "single" => Ok(Linkage::Single),
            "c" | "complete" => Ok(Linkage::Complete),
            "a" | "average" => Ok(Linkage::Average),
            _ => Err(Error::InvalidParameter {
                name: "linkage",
                message: "expected one of single|complete|average (s|c|a)",
            }),
        }
    }
}

/// Single-linkage clustering down to `n_clusters` clusters.
pub fn single_linkage(distances: &DistanceMatrix, n_clusters: usize) -> Result<Dendrogram> {
    Linkage::Single.cluster(distances, n_clusters)
}

/// Complete-linkage clustering down to `n_clusters` clusters.
pub fn complete_linkage(distances: &DistanceMatrix, n_clusters: usize) -> Result<Dendrogram> {
    Linkage::Complete.cluster(distances, n_clusters)
}

/// Average-linkage clustering down to `n_clusters` clusters.
pub fn average_linkage(distances: &DistanceMatrix, n_clusters: usize) -> Result<Dendrogram> {
    Linkage::Average.cluster(distances, n_clusters)
}

/// Hierarchical (agglomerative) clustering.
#[derive(Debug, Clone)]
pub struct HierarchicalClustering {
    /// Number of clusters to leave alive.
    n_clusters: usize,
    /// Linkage method.
    linkage: Linkage,
}

impl HierarchicalClustering {
    /// Create a new hierarchical clusterer (single linkage).
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            linkage: Linkage::default(),
        }
    }

    /// Set linkage method.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Configured linkage method.
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }
}

impl Clustering for HierarchicalClustering {
    fn fit(&self, distances: &DistanceMatrix) -> Result<Dendrogram> {
        let n_items = distances.n_items();
        if n_items == 0 {
            return Err(Error::EmptyInput);
        }
        if self.n_clusters == 0 || self.n_clusters >= n_items {
            return Err(Error::InvalidClusterCount {
                requested: self.n_clusters,
                n_items,
            });
        }
        self.linkage.cluster(distances, self.n_clusters)
    }

    fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistanceMatrix {
        // d(0,1)=2, d(0,2)=5, d(1,2)=3
        DistanceMatrix::from_condensed(&[2.0, 5.0, 3.0], 3).unwrap()
    }

    fn steps(d: &Dendrogram) -> Vec<(usize, usize, f64, usize)> {
        d.merges()
            .map(|m| (m.survivor, m.absorbed, m.distance, m.size))
            .collect()
    }

    #[test]
    fn single_linkage_takes_minimum() {
        let d = single_linkage(&triangle(), 1).unwrap();
        assert_eq!(steps(&d), vec![(0, 1, 2.0, 2), (2, 0, 3.0, 3)]);
    }

    #[test]
    fn complete_linkage_takes_maximum() {
        let d = complete_linkage(&triangle(), 1).unwrap();
        assert_eq!(steps(&d), vec![(0, 1, 2.0, 2), (2, 0, 5.0, 3)]);
    }

    #[test]
    fn average_linkage_takes_weighted_mean() {
        let d = average_linkage(&triangle(), 1).unwrap();
        assert_eq!(steps(&d), vec![(0, 1, 2.0, 2), (2, 0, 4.0, 3)]);
    }

    #[test]
    fn stops_at_target_count() {
        let d = complete_linkage(&triangle(), 2).unwrap();
        assert_eq!(d.n_merges(), 1);
        assert_eq!(d.n_clusters(), 2);
    }

    #[test]
    fn unreachable_targets_are_no_ops() {
        let m = triangle();
        for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
            assert_eq!(linkage.cluster(&m, 0).unwrap().n_merges(), 0);
            assert_eq!(linkage.cluster(&m, 3).unwrap().n_merges(), 0);
            assert_eq!(linkage.cluster(&m, 7).unwrap().n_merges(), 0);
        }
        let empty = DistanceMatrix::from_rows(&[]).unwrap();
        assert_eq!(single_linkage(&empty, 1).unwrap().n_items(), 0);
    }

    #[test]
    fn builder_rejects_unreachable_targets() {
        let m = triangle();
        let err = HierarchicalClustering::new(3).fit(&m).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidClusterCount {
                requested: 3,
                n_items: 3
            }
        );
        assert!(HierarchicalClustering::new(0).fit(&m).is_err());

        let empty = DistanceMatrix::from_rows(&[]).unwrap();
        assert_eq!(
            HierarchicalClustering::new(1).fit(&empty).unwrap_err(),
            Error::EmptyInput
        );
    }

    #[test]
    fn builder_fit_predict() {
        let m = DistanceMatrix::from_fn(4, |i, j| if i / 2 == j / 2 { 0.1 } else { 10.0 }).unwrap();
        let hc = HierarchicalClustering::new(2).with_linkage(Linkage::Average);
        assert_eq!(hc.linkage(), Linkage::Average);
        let labels = hc.fit_predict(&m).unwrap();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn linkage_parses_short_and_long_names() {
        assert_eq!("s".parse::<Linkage>().unwrap(), Linkage::Single);
        assert_eq!("complete".parse::<Linkage>().unwrap(), Linkage::Complete);
        assert_eq!("a".parse::<Linkage>().unwrap(), Linkage::Average);
        assert!("ward".parse::<Linkage>().is_err());
        assert_eq!(Linkage::Average.to_string(), "average");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn linkage_serializes_lowercase() {
        let json = serde_json::to_string(&Linkage::Complete).unwrap();
        assert_eq!(json, "\"complete\"");
        let back: Linkage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Linkage::Complete);
    }
}
