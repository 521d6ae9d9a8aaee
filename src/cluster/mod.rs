//! Agglomerative clustering engines.
//!
//! Start with every item as its own cluster and repeatedly merge the two
//! closest alive clusters until `g` remain. The merge history forms a
//! **dendrogram** that can be cut at any coarser level afterwards.
//!
//! **Linkage methods** determine "distance between clusters":
//!
//! | Linkage | Distance | Effect |
//! |---------|----------|--------|
//! | Single | min(pairwise) | Chaining; elongated clusters |
//! | Complete | max(pairwise) | Compact clusters |
//! | Average | mean(pairwise) | Balanced compromise |
//!
//! ## Engines
//!
//! | Engine | Nearest-neighbour index | Cost per merge |
//! |--------|-------------------------|----------------|
//! | Single | full row + cached argmin | O(n²) |
//! | Complete / Average | one [`IndexedMinHeap`](crate::heap::IndexedMinHeap) per cluster | O(n log n) |
//!
//! Complete and average linkage share the heap engine and differ only in the
//! per-neighbour update rule.
//!
//! ## Usage
//!
//! ```rust
//! use hac::{DistanceMatrix, HierarchicalClustering, Linkage, Clustering};
//!
//! // d(0,1)=2, d(0,2)=5, d(1,2)=3
//! let distances = DistanceMatrix::from_condensed(&[2.0, 5.0, 3.0], 3).unwrap();
//!
//! let dendrogram = HierarchicalClustering::new(1)
//!     .with_linkage(Linkage::Complete)
//!     .fit(&distances)
//!     .unwrap();
//!
//! let pairs: Vec<_> = dendrogram.pairs().collect();
//! assert_eq!(pairs, vec![(0, 1), (2, 0)]);
//! assert_eq!(dendrogram.distances(), vec![2.0, 5.0]);
//! ```

mod driver;
mod heaped;
mod hierarchical;
mod registry;
mod single;
mod traits;

pub use hierarchical::{
    average_linkage, complete_linkage, single_linkage, HierarchicalClustering, Linkage,
};
pub use registry::ClusterRegistry;
pub use traits::Clustering;

#[cfg(test)]
pub(crate) use driver::step;
#[cfg(test)]
pub(crate) use heaped::{AverageLinkage, CompleteLinkage};
#[cfg(test)]
pub(crate) use single::SingleLinkage;
