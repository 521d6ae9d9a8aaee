//! # hac
//!
//! Hierarchical agglomerative clustering over a dense dissimilarity matrix,
//! under single, complete and average linkage.
//!
//! Given `n` items, a target cluster count `g` (`0 < g < n`) and a symmetric
//! [`DistanceMatrix`], an engine performs `n - g` merges and returns them in
//! order as a [`Dendrogram`]. Cluster ids are stable: each merge keeps the
//! survivor's id and retires the absorbed one.
//!
//! The core is in [`cluster`] and [`heap`]. [`features`] builds matrices from
//! token files and [`format`] renders merge queues as text.

mod buffer;
pub mod cluster;
/// Error types used across `hac`.
pub mod error;
pub mod features;
pub mod format;
pub mod heap;
pub mod hierarchy;
pub mod matrix;


pub use cluster::{
    average_linkage, complete_linkage, single_linkage, ClusterRegistry, Clustering,
    HierarchicalClustering, Linkage,
};
pub use error::{Error, Result};
pub use features::{BitVector, Dataset, Metric, Vocabulary};
pub use heap::IndexedMinHeap;
pub use hierarchy::{Dendrogram, DisjointSet, Merge};
pub use matrix::DistanceMatrix;
