//! Dense dissimilarity matrix.
//!
//! One owned row-major buffer of `n * n` entries with stride `n`. Engines copy
//! what they need out of it, so a matrix can be clustered any number of times
//! under different linkages.

use crate::buffer;
use crate::error::{Error, Result};

#[cfg(feature = "ndarray")]
use ndarray::ArrayView2;

/// Square matrix of pairwise dissimilarities. The diagonal is never read by
/// the clustering engines.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Build from full rows. Every row must have `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|r| r.len() != n) {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: row.len(),
            });
        }
        let mut data = buffer::reserve(n * n)?;
        for row in rows {
            data.extend_from_slice(row);
        }
        Self::checked(n, data)
    }

    /// Build from a condensed upper triangle (row-major, `n(n-1)/2` entries),
    /// the layout SciPy and `kodama` use.
    pub fn from_condensed(condensed: &[f64], n: usize) -> Result<Self> {
        let expected = n * n.saturating_sub(1) / 2;
        if condensed.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: condensed.len(),
            });
        }
        let mut data = buffer::filled(n * n, 0.0)?;
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                data[i * n + j] = condensed[k];
                data[j * n + i] = condensed[k];
                k += 1;
            }
        }
        Self::checked(n, data)
    }

    /// Build by evaluating `f(i, j)` once per unordered pair `i < j`.
    pub fn from_fn<F>(n: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = buffer::filled(n * n, 0.0)?;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = f(i, j);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self::checked(n, data)
    }

    /// Build from a square `ndarray` view.
    #[cfg(feature = "ndarray")]
    pub fn from_array(view: ArrayView2<'_, f64>) -> Result<Self> {
        let (rows, cols) = view.dim();
        if rows != cols {
            return Err(Error::DimensionMismatch {
                expected: rows,
                found: cols,
            });
        }
        let data = buffer::collect(view.iter().copied())?;
        Self::checked(rows, data)
    }

    fn checked(n: usize, data: Vec<f64>) -> Result<Self> {
        let has_nan = (0..n).any(|i| (0..n).any(|j| i != j && data[i * n + j].is_nan()));
        if has_nan {
            return Err(Error::InvalidParameter {
                name: "distances",
                message: "off-diagonal entries must not be NaN",
            });
        }
        Ok(Self { n, data })
    }

    /// Clone with a fallible allocation.
    pub(crate) fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            n: self.n,
            data: buffer::collect(self.data.iter().copied())?,
        })
    }

    /// Number of items (rows).
    pub fn n_items(&self) -> usize {
        self.n
    }

    /// Entry `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Set `(i, j)` and `(j, i)` together.
    #[inline]
    pub(crate) fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.n + j] = value;
        self.data[j * self.n + i] = value;
    }

    /// Whether every off-diagonal pair agrees within `tolerance`.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.n).all(|i| {
            ((i + 1)..self.n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }

    /// Upper triangle in condensed row-major order.
    pub fn to_condensed(&self) -> Vec<f64> {
        let n = self.n;
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            out.extend_from_slice(&self.row(i)[(i + 1)..]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condensed_round_trip() {
        let condensed = vec![2.0, 5.0, 3.0];
        let m = DistanceMatrix::from_condensed(&condensed, 3).unwrap();
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(2, 0), 5.0);
        assert_eq!(m.get(2, 1), 3.0);
        assert_eq!(m.to_condensed(), condensed);
        assert!(m.is_symmetric(0.0));
    }

    #[test]
    fn rows_must_be_square() {
        let rows = vec![vec![0.0, 1.0], vec![1.0]];
        let err = DistanceMatrix::from_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn condensed_length_is_checked() {
        let err = DistanceMatrix::from_condensed(&[1.0, 2.0], 3).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 3, found: 2 }));
    }

    #[test]
    fn nan_off_diagonal_is_rejected() {
        let rows = vec![vec![0.0, f64::NAN], vec![f64::NAN, 0.0]];
        assert!(matches!(
            DistanceMatrix::from_rows(&rows),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn nan_diagonal_is_ignored() {
        let rows = vec![vec![f64::NAN, 1.0], vec![1.0, f64::NAN]];
        assert!(DistanceMatrix::from_rows(&rows).is_ok());
    }

    #[test]
    fn from_fn_mirrors_upper_triangle() {
        let m = DistanceMatrix::from_fn(4, |i, j| (i * 10 + j) as f64).unwrap();
        assert_eq!(m.get(1, 3), 13.0);
        assert_eq!(m.get(3, 1), 13.0);
        assert_eq!(m.row(2), &[2.0, 12.0, 0.0, 23.0]);
    }

    #[test]
    fn asymmetric_rows_are_detected() {
        let rows = vec![vec![0.0, 1.0], vec![1.5, 0.0]];
        let m = DistanceMatrix::from_rows(&rows).unwrap();
        assert!(!m.is_symmetric(0.1));
        assert!(m.is_symmetric(0.5));
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn from_ndarray_view() {
        let a = ndarray::array![[0.0, 2.0], [2.0, 0.0]];
        let m = DistanceMatrix::from_array(a.view()).unwrap();
        assert_eq!(m.get(0, 1), 2.0);
    }
}
