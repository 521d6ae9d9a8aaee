//! Token datasets.
//!
//! One item per line. The first whitespace-separated token labels the item;
//! every following token is a feature. Lines without a feature token are
//! skipped.
//!
//! ```text
//! doc-a  rust heap tree
//! doc-b  rust graph
//! doc-c  heap
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::bitvec::BitVector;
use super::metric::Metric;
use super::vocabulary::Vocabulary;
use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use tracing::debug;

/// Labelled items as bit vectors over a shared vocabulary.
#[derive(Debug, Clone)]
pub struct Dataset {
    labels: Vec<String>,
    vectors: Vec<BitVector>,
    vocabulary: Vocabulary,
}

impl Dataset {
    /// Read a dataset file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Parse a dataset from any buffered reader.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut vocabulary = Vocabulary::new();
        let mut labels = Vec::new();
        let mut features: Vec<Vec<usize>> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let mut tokens = line.split_whitespace();
            let Some(label) = tokens.next() else {
                continue;
            };
            let dims: Vec<usize> = tokens.map(|t| vocabulary.intern(t)).collect();
            if dims.is_empty() {
                continue;
            }
            labels.push(label.to_owned());
            features.push(dims);
        }

        if labels.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n_dims = vocabulary.len();
        let vectors = features
            .iter()
            .map(|dims| {
                let mut v = BitVector::new(n_dims);
                dims.iter().for_each(|&d| v.set(d));
                v
            })
            .collect();
        debug!(n_items = labels.len(), n_dims, "dataset parsed");

        Ok(Self {
            labels,
            vectors,
            vocabulary,
        })
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset holds no items. Never true for a parsed dataset.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct feature tokens.
    pub fn n_dims(&self) -> usize {
        self.vocabulary.len()
    }

    /// Item labels in file order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Item feature vectors in file order.
    pub fn vectors(&self) -> &[BitVector] {
        &self.vectors
    }

    /// Token to dimension map.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Pairwise distances under `metric`.
    pub fn distance_matrix(&self, metric: Metric) -> Result<DistanceMatrix> {
        metric.matrix(&self.vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "doc-a rust heap tree\n\
                          \n\
                          lonely\n\
                          doc-b  rust graph rust\n\
                          \tdoc-c heap\n";

    #[test]
    fn parses_labels_and_features() {
        let ds = Dataset::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.labels(), &["doc-a", "doc-b", "doc-c"]);
        assert_eq!(ds.n_dims(), 4);

        let rust = ds.vocabulary().get("rust").unwrap();
        let graph = ds.vocabulary().get("graph").unwrap();
        assert_eq!(rust, 0);
        assert_eq!(graph, 3);
        assert_eq!(ds.vectors()[1].count_ones(), 2);
        assert!(ds.vectors()[1].contains(rust));
        assert!(!ds.vectors()[2].contains(rust));
    }

    #[test]
    fn distance_matrix_uses_metric() {
        let ds = Dataset::parse(SAMPLE.as_bytes()).unwrap();
        let m = ds.distance_matrix(Metric::InnerProduct).unwrap();
        // a ∧ b = {rust}
        assert_eq!(m.get(0, 1), 3.0);
        let j = ds.distance_matrix(Metric::Jaccard).unwrap();
        // a = {rust, heap, tree}, c = {heap}
        assert!((j.get(0, 2) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = Dataset::parse("only-labels\n\n   \n".as_bytes()).unwrap_err();
        assert_eq!(err, Error::EmptyInput);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Dataset::open("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
