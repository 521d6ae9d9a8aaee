//! Distances between bit vectors.

use core::fmt;
use core::str::FromStr;

use super::bitvec::BitVector;
use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;

/// Dissimilarity between two feature sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Metric {
    /// Dimensions not shared: `dims − |x ∧ y|`.
    #[default]
    InnerProduct,
    /// Jaccard distance: `|x ⊕ y| / |x ∨ y|`, 0 for two empty sets.
    Jaccard,
}

impl Metric {
    /// Distance between `x` and `y`. Both must have the same dimension.
    pub fn distance(self, x: &BitVector, y: &BitVector) -> f64 {
        let shared = x.intersection_count(y);
        match self {
            Metric::InnerProduct => (x.dims() - shared) as f64,
            Metric::Jaccard => {
                let differ = x.symmetric_difference_count(y);
                if differ + shared == 0 {
                    0.0
                } else {
                    differ as f64 / (differ + shared) as f64
                }
            }
        }
    }

    /// Full pairwise matrix over `vectors`.
    pub fn matrix(self, vectors: &[BitVector]) -> Result<DistanceMatrix> {
        let dims = vectors.first().map_or(0, BitVector::dims);
        if let Some(v) = vectors.iter().find(|v| v.dims() != dims) {
            return Err(Error::DimensionMismatch {
                expected: dims,
                found: v.dims(),
            });
        }
        DistanceMatrix::from_fn(vectors.len(), |i, j| self.distance(&vectors[i], &vectors[j]))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::InnerProduct => "inner-product",
            Metric::Jaccard => "jaccard",
        })
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "i" | "inner-product" => Ok(Metric::InnerProduct),
            "j" | "jaccard" => Ok(Metric::Jaccard),
            _ => Err(Error::InvalidParameter {
                name: "metric",
                message: "expected one of inner-product|jaccard (i|j)",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(dims: usize, set: &[usize]) -> BitVector {
        let mut v = BitVector::new(dims);
        set.iter().for_each(|&d| v.set(d));
        v
    }

    #[test]
    fn inner_product_counts_unshared_dimensions() {
        let a = bits(5, &[0, 1, 2]);
        let b = bits(5, &[1, 2, 3]);
        assert_eq!(Metric::InnerProduct.distance(&a, &b), 3.0);
    }

    #[test]
    fn jaccard_ratio() {
        let a = bits(5, &[0, 1, 2]);
        let b = bits(5, &[1, 2, 3]);
        assert_eq!(Metric::Jaccard.distance(&a, &b), 0.5);
        assert_eq!(Metric::Jaccard.distance(&a, &a), 0.0);
        let empty = BitVector::new(5);
        assert_eq!(Metric::Jaccard.distance(&empty, &empty), 0.0);
    }

    #[test]
    fn matrix_is_symmetric() {
        let vs = vec![bits(4, &[0]), bits(4, &[0, 1]), bits(4, &[2, 3])];
        let m = Metric::Jaccard.matrix(&vs).unwrap();
        assert!(m.is_symmetric(0.0));
        assert_eq!(m.get(0, 1), 0.5);
        assert_eq!(m.get(2, 0), 1.0);
    }

    #[test]
    fn matrix_rejects_mixed_dimensions() {
        let vs = vec![bits(4, &[0]), bits(5, &[0])];
        assert!(matches!(
            Metric::InnerProduct.matrix(&vs),
            Err(Error::DimensionMismatch { expected: 4, found: 5 })
        ));
    }

    #[test]
    fn parses_short_names() {
        assert_eq!("i".parse::<Metric>().unwrap(), Metric::InnerProduct);
        assert_eq!("jaccard".parse::<Metric>().unwrap(), Metric::Jaccard);
        assert!("cosine".parse::<Metric>().is_err());
    }
}
