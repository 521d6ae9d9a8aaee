//! Merge queue produced by agglomerative clustering.
//!
//! Ids are stable: a merge keeps the survivor's id and retires the absorbed
//! one, so every record names two original item ids. Replaying the queue
//! through a union-find yields any cut with at least as many clusters as were
//! left alive.

use super::union_find::DisjointSet;
use crate::buffer;
use crate::error::{Error, Result};

/// A merge queue over `n_items` original items.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dendrogram {
    /// Merges in the order they happened.
    merges: Vec<Merge>,
    /// Number of original items.
    n_items: usize,
    /// Ids absorbed by an earlier merge.
    retired: Vec<bool>,
}

/// A single merge operation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Merge {
    /// Cluster that keeps its id.
    pub survivor: usize,
    /// Cluster absorbed into `survivor` and retired.
    pub absorbed: usize,
    /// Linkage distance at which the merge occurred.
    pub distance: f64,
    /// Size of the merged cluster.
    pub size: usize,
}

impl Dendrogram {
    /// Create an empty queue for `n_items` items.
    pub fn new(n_items: usize) -> Self {
        Self {
            merges: Vec::new(),
            n_items,
            retired: vec![false; n_items],
        }
    }

    pub(crate) fn with_capacity(n_items: usize, n_merges: usize) -> Result<Self> {
        Ok(Self {
            merges: buffer::reserve(n_merges)?,
            n_items,
            retired: buffer::filled(n_items, false)?,
        })
    }

    pub(crate) fn push(&mut self, merge: Merge) {
        self.retired[merge.absorbed] = true;
        self.merges.push(merge);
    }

    /// Record a merge operation.
    ///
    /// Both ids must be in range, distinct, and not absorbed by an earlier
    /// merge. At most `n_items - 1` merges can therefore be recorded.
    pub fn add_merge(
        &mut self,
        survivor: usize,
        absorbed: usize,
        distance: f64,
        size: usize,
    ) -> Result<()> {
        if survivor >= self.n_items || absorbed >= self.n_items {
            return Err(Error::InvalidParameter {
                name: "merge",
                message: "cluster id out of range",
            });
        }
        if survivor == absorbed {
            return Err(Error::InvalidParameter {
                name: "merge",
                message: "a cluster cannot absorb itself",
            });
        }
        if self.retired[survivor] || self.retired[absorbed] {
            return Err(Error::InvalidParameter {
                name: "merge",
                message: "cluster id was already absorbed",
            });
        }
        self.push(Merge {
            survivor,
            absorbed,
            distance,
            size,
        });
        Ok(())
    }

    /// Number of original items.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// Clusters left after every recorded merge.
    pub fn n_clusters(&self) -> usize {
        self.n_items - self.merges.len()
    }

    /// Iterate over merges.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.merges.iter()
    }

    /// `(survivor, absorbed)` pairs in merge order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.merges.iter().map(|m| (m.survivor, m.absorbed))
    }

    /// Merge distances in merge order.
    pub fn distances(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.distance).collect()
    }

    /// Flat labels for `k` clusters, replaying the first `n - k` merges.
    ///
    /// `k` must lie between [`n_clusters`](Self::n_clusters) and `n_items`.
    pub fn cut_to_k(&self, k: usize) -> Result<Vec<usize>> {
        if k == 0 || k > self.n_items || k < self.n_clusters() {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: self.n_items,
            });
        }
        Ok(self.labels(self.merges.iter().take(self.n_items - k)))
    }

    /// Flat labels after replaying merges in order up to the first one whose
    /// distance exceeds `threshold`.
    ///
    /// Average linkage can emit a merge slightly below an earlier one; replay
    /// still stops at the first merge above the threshold.
    pub fn cut_at_distance(&self, threshold: f64) -> Vec<usize> {
        self.labels(self.merges.iter().take_while(|m| m.distance <= threshold))
    }

    fn labels<'a>(&self, merges: impl Iterator<Item = &'a Merge>) -> Vec<usize> {
        let mut sets = DisjointSet::new(self.n_items);
        for m in merges {
            let _ = sets.union(m.survivor, m.absorbed);
        }

        // Renumber roots to consecutive labels by first appearance.
        let mut label_of_root = vec![usize::MAX; self.n_items];
        let mut next = 0;
        (0..self.n_items)
            .map(|item| {
                let root = sets.find(item);
                if label_of_root[root] == usize::MAX {
                    label_of_root[root] = next;
                    next += 1;
                }
                label_of_root[root]
            })
            .collect()
    }

    /// Member lists of the clusters left after every merge.
    ///
    /// Clusters are ordered by surviving id. Each list starts with the
    /// surviving id, followed by absorbed members in the order they were
    /// chained on.
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let n = self.n_items;
        let mut next: Vec<Option<usize>> = vec![None; n];
        let mut tail: Vec<usize> = (0..n).collect();
        let mut head = vec![true; n];

        for m in &self.merges {
            let (a, b) = (m.survivor, m.absorbed);
            next[tail[a]] = Some(b);
            tail[a] = tail[b];
            head[b] = false;
        }

        (0..n)
            .filter(|&id| head[id])
            .map(|id| {
                let mut members = vec![id];
                let mut cur = id;
                while let Some(nx) = next[cur] {
                    members.push(nx);
                    cur = nx;
                }
                members
            })
            .collect()
    }
}
