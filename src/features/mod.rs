//! Feature vectors and distance matrices from token datasets.
//!
//! The clustering engines only ever see a [`DistanceMatrix`](crate::DistanceMatrix).
//! This module builds one from a whitespace-separated token file:
//!
//! 1. every distinct token gets a stable dimension in a [`Vocabulary`],
//! 2. every item becomes a [`BitVector`] over those dimensions,
//! 3. a [`Metric`] turns each pair of vectors into a distance.

mod bitvec;
mod dataset;
mod metric;
mod vocabulary;

pub use bitvec::BitVector;
pub use dataset::Dataset;
pub use metric::Metric;
pub use vocabulary::Vocabulary;
