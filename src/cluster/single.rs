//! Single-linkage engine.
//!
//! Keeps a private copy of the matrix plus one cached nearest neighbour per
//! cluster. Under single linkage a merge can only lower distances to the
//! merged cluster, so every other cache stays valid once pointers at the
//! absorbed id are redirected to the survivor. Only the survivor's own row
//! needs a fresh scan.
//!
//! ```text
//! d(i, a ∪ b) = min(d(i, a), d(i, b))
//! ```
//!
//! O(n) per merge for the row scan, O(n²) per merge overall because every
//! alive row is touched, O(n³) total. No heap is needed.

use super::driver::{Engine, Neighbor};
use super::registry::ClusterRegistry;
use crate::buffer;
use crate::error::Result;
use crate::matrix::DistanceMatrix;

#[derive(Debug, Clone)]
pub(crate) struct SingleLinkage {
    distances: DistanceMatrix,
    nearest: Vec<Option<usize>>,
}

impl SingleLinkage {
    pub(crate) fn new(distances: &DistanceMatrix) -> Result<Self> {
        let n = distances.n_items();
        let nearest = buffer::collect(
            (0..n).map(|i| closest(distances.row(i), (0..n).filter(|&j| j != i))),
        )?;
        Ok(Self {
            distances: distances.try_clone()?,
            nearest,
        })
    }

    #[cfg(test)]
    pub(crate) fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }

    /// Alive rows are symmetric and every cache points at a row minimum.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self, registry: &ClusterRegistry) -> bool {
        registry.alive_ids().all(|i| {
            let others = || registry.alive_ids().filter(move |&j| j != i);
            let symmetric = others().all(|j| self.distances.get(i, j) == self.distances.get(j, i));
            let min = others()
                .map(|j| self.distances.get(i, j))
                .fold(f64::INFINITY, f64::min);
            let cached = match self.nearest[i] {
                Some(nn) => nn != i && registry.is_alive(nn) && self.distances.get(i, nn) == min,
                None => registry.n_alive() == 1,
            };
            symmetric && cached
        })
    }
}

/// First strictly smallest entry of `row` among `candidates`.
fn closest(row: &[f64], candidates: impl Iterator<Item = usize>) -> Option<usize> {
    let mut best: Option<usize> = None;
    for j in candidates {
        if best.map_or(true, |b| row[j] < row[b]) {
            best = Some(j);
        }
    }
    best
}

impl Engine for SingleLinkage {
    fn nearest(&self, id: usize) -> Option<Neighbor> {
        self.nearest[id].map(|nn| Neighbor {
            id: nn,
            distance: self.distances.get(id, nn),
        })
    }

    fn absorb(&mut self, registry: &ClusterRegistry, survivor: usize, absorbed: usize) {
        for i in registry.alive_ids().filter(|&i| i != survivor) {
            if self.nearest[i] == Some(absorbed) {
                self.nearest[i] = Some(survivor);
            }
            let merged = self
                .distances
                .get(survivor, i)
                .min(self.distances.get(absorbed, i));
            self.distances.set_symmetric(survivor, i, merged);
        }
        self.nearest[absorbed] = None;
        self.nearest[survivor] = closest(
            self.distances.row(survivor),
            registry.alive_ids().filter(|&i| i != survivor),
        );
    }
}
