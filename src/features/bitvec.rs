//! Fixed-dimension bit vectors.

const WORD_BITS: usize = u64::BITS as usize;

/// Set of dimension indices in `[0, dims)`, packed into `u64` words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVector {
    words: Vec<u64>,
    dims: usize,
}

impl BitVector {
    /// All-zero vector of `dims` dimensions.
    pub fn new(dims: usize) -> Self {
        Self {
            words: vec![0; dims.div_ceil(WORD_BITS)],
            dims,
        }
    }

    /// Number of dimensions.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Set bit `dim`.
    ///
    /// # Panics
    ///
    /// If `dim >= self.dims()`.
    pub fn set(&mut self, dim: usize) {
        assert!(dim < self.dims, "dimension {dim} out of range {}", self.dims);
        self.words[dim / WORD_BITS] |= 1u64 << (dim % WORD_BITS);
    }

    /// Whether bit `dim` is set.
    pub fn contains(&self, dim: usize) -> bool {
        dim < self.dims && self.words[dim / WORD_BITS] & (1u64 << (dim % WORD_BITS)) != 0
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// `|self ∧ other|`.
    pub fn intersection_count(&self, other: &Self) -> usize {
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// `|self ⊕ other|`.
    pub fn symmetric_difference_count(&self, other: &Self) -> usize {
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones() as usize)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(dims: usize, set: &[usize]) -> BitVector {
        let mut v = BitVector::new(dims);
        for &d in set {
            v.set(d);
        }
        v
    }

    #[test]
    fn set_and_count_across_words() {
        let v = bits(130, &[0, 63, 64, 129, 64]);
        assert_eq!(v.count_ones(), 4);
        assert!(v.contains(129));
        assert!(!v.contains(1));
        assert!(!v.contains(500));
    }

    #[test]
    fn pairwise_counts() {
        let a = bits(70, &[1, 2, 65]);
        let b = bits(70, &[2, 3, 65, 66]);
        assert_eq!(a.intersection_count(&b), 2);
        assert_eq!(a.symmetric_difference_count(&b), 3);
    }

    #[test]
    #[should_panic]
    fn set_out_of_range_panics() {
        BitVector::new(3).set(3);
    }
}
