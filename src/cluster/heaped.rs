//! Heap-indexed engine for complete and average linkage.
//!
//! Every cluster owns an [`IndexedMinHeap`] over its distances to all other
//! alive clusters, so its nearest neighbour is the heap root. A merge of `b`
//! into `a` touches each other alive cluster `i` with a constant number of
//! O(log n) heap operations:
//!
//! 1. remove `b` from `i`'s heap,
//! 2. ask the [`MergeRule`] for the new `d(i, a ∪ b)`,
//! 3. if it changed, re-key `a` in `i`'s heap and `i` in `a`'s heap.
//!
//! Both heaps hold the same value for the pair afterwards, which keeps the
//! implied matrix symmetric. O(n log n) per merge, O(n² log n) total.

use std::marker::PhantomData;

use super::driver::{Engine, Neighbor};
use super::registry::ClusterRegistry;
use crate::buffer;
use crate::error::Result;
use crate::heap::IndexedMinHeap;
use crate::matrix::DistanceMatrix;

/// Lance-Williams style update for `d(i, a ∪ b)`.
pub(crate) trait MergeRule {
    /// New distance from `i` to the merged cluster, or `None` when
    /// `d_survivor` already holds it.
    fn merge(d_survivor: f64, d_absorbed: f64, n_survivor: usize, n_absorbed: usize)
        -> Option<f64>;
}

/// Complete linkage: `max(d(i, a), d(i, b))`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Farthest;

impl MergeRule for Farthest {
    fn merge(d_survivor: f64, d_absorbed: f64, _: usize, _: usize) -> Option<f64> {
        (d_survivor < d_absorbed).then_some(d_absorbed)
    }
}

/// Average linkage: size-weighted mean of the two distances.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WeightedMean;

impl MergeRule for WeightedMean {
    fn merge(d_survivor: f64, d_absorbed: f64, n_survivor: usize, n_absorbed: usize) -> Option<f64> {
        let (ns, na) = (n_survivor as f64, n_absorbed as f64);
        Some((d_survivor * ns + d_absorbed * na) / (ns + na))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HeapLinkage<R> {
    heaps: Vec<IndexedMinHeap<f64>>,
    rule: PhantomData<R>,
}

pub(crate) type CompleteLinkage = HeapLinkage<Farthest>;
pub(crate) type AverageLinkage = HeapLinkage<WeightedMean>;

impl<R: MergeRule> HeapLinkage<R> {
    pub(crate) fn new(distances: &DistanceMatrix) -> Result<Self> {
        let n = distances.n_items();
        let mut heaps = buffer::reserve(n)?;
        for i in 0..n {
            let row = buffer::collect(distances.row(i).iter().copied())?;
            let mut heap = IndexedMinHeap::from_values(row)?;
            // The self-distance never takes part in selection.
            let _ = heap.remove(i);
            heaps.push(heap);
        }
        Ok(Self {
            heaps,
            rule: PhantomData,
        })
    }

    /// Every alive pair appears in both heaps with the same value, and each
    /// heap holds exactly the other alive clusters.
    #[cfg(test)]
    pub(crate) fn is_symmetric(&self, registry: &ClusterRegistry) -> bool {
        registry.alive_ids().all(|i| {
            let heap = &self.heaps[i];
            heap.is_consistent()
                && heap.len() == registry.n_alive() - 1
                && registry.alive_ids().filter(|&j| j != i).all(|j| {
                    heap.contains(j) && heap.value(j) == self.heaps[j].value(i)
                })
        })
    }
}

impl<R: MergeRule> Engine for HeapLinkage<R> {
    fn nearest(&self, id: usize) -> Option<Neighbor> {
        self.heaps[id]
            .peek()
            .map(|(nn, distance)| Neighbor { id: nn, distance })
    }

    fn absorb(&mut self, registry: &ClusterRegistry, survivor: usize, absorbed: usize) {
        let n_survivor = registry.size(survivor);
        let n_absorbed = registry.size(absorbed);
        let _ = self.heaps[survivor].remove(absorbed);

        for i in registry.alive_ids().filter(|&i| i != survivor) {
            let heap = &mut self.heaps[i];
            let Some(d_absorbed) = heap.remove(absorbed) else {
                continue;
            };
            let d_survivor = heap.value(survivor);
            if let Some(merged) = R::merge(d_survivor, d_absorbed, n_survivor, n_absorbed) {
                heap.push(survivor, merged);
                self.heaps[survivor].push(i, merged);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_condensed(&[2.0, 5.0, 3.0], 3).unwrap()
    }

    #[test]
    fn self_distance_is_removed() {
        let engine = CompleteLinkage::new(&matrix()).unwrap();
        let reg = ClusterRegistry::new(3).unwrap();
        assert!(engine.is_symmetric(&reg));
        assert_eq!(engine.nearest(2), Some(Neighbor { id: 1, distance: 3.0 }));
    }

    #[test]
    fn farthest_only_updates_when_larger() {
        assert_eq!(Farthest::merge(1.0, 4.0, 3, 1), Some(4.0));
        assert_eq!(Farthest::merge(4.0, 1.0, 3, 1), None);
        assert_eq!(Farthest::merge(2.0, 2.0, 1, 1), None);
    }

    #[test]
    fn weighted_mean_uses_pre_merge_sizes() {
        assert_eq!(WeightedMean::merge(5.0, 3.0, 1, 1), Some(4.0));
        assert_eq!(WeightedMean::merge(6.0, 3.0, 2, 1), Some(5.0));
    }

    #[test]
    fn complete_absorb_keeps_maximum() {
        let mut engine = CompleteLinkage::new(&matrix()).unwrap();
        let mut reg = ClusterRegistry::new(3).unwrap();
        reg.retire(1);
        engine.absorb(&reg, 0, 1);
        reg.merge_size(0, 1);

        assert!(engine.is_symmetric(&reg));
        assert_eq!(engine.nearest(0), Some(Neighbor { id: 2, distance: 5.0 }));
        assert_eq!(engine.nearest(2), Some(Neighbor { id: 0, distance: 5.0 }));
    }

    #[test]
    fn average_absorb_weights_by_size() {
        let mut engine = AverageLinkage::new(&matrix()).unwrap();
        let mut reg = ClusterRegistry::new(3).unwrap();
        reg.retire(1);
        engine.absorb(&reg, 0, 1);
        reg.merge_size(0, 1);

        assert!(engine.is_symmetric(&reg));
        assert_eq!(engine.nearest(2), Some(Neighbor { id: 0, distance: 4.0 }));
    }
}
