//! Token to dimension assignment.

use std::collections::BTreeMap;

/// Ordered map from token to dimension index.
///
/// Indices are handed out in first-seen order and never change.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    index: BTreeMap<String, usize>,
}

impl Vocabulary {
    /// Empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `token`, assigning the next free one if it is new.
    pub fn intern(&mut self, token: &str) -> usize {
        if let Some(&dim) = self.index.get(token) {
            return dim;
        }
        let dim = self.index.len();
        let _ = self.index.insert(token.to_owned(), dim);
        dim
    }

    /// Index of `token`, if known.
    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no token has been seen.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Tokens in lexicographic order with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.index.iter().map(|(t, &d)| (t.as_str(), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order() {
        let mut v = Vocabulary::new();
        assert_eq!(v.intern("zeta"), 0);
        assert_eq!(v.intern("alpha"), 1);
        assert_eq!(v.intern("zeta"), 0);
        assert_eq!(v.len(), 2);
        assert_eq!(v.get("alpha"), Some(1));
        assert_eq!(v.get("beta"), None);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![("alpha", 1), ("zeta", 0)]);
    }
}
