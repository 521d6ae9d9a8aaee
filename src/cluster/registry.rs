//! Per-cluster bookkeeping shared by every engine.

use crate::buffer;
use crate::error::Result;

/// Alive flag and absorbed-item count for each cluster id in `[0, n)`.
///
/// Ids never change: a merge keeps the survivor's id and retires the other.
#[derive(Debug, Clone)]
pub struct ClusterRegistry {
    alive: Vec<bool>,
    size: Vec<usize>,
    n_alive: usize,
}

impl ClusterRegistry {
    /// All `n` clusters alive with size 1.
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self {
            alive: buffer::filled(n, true)?,
            size: buffer::filled(n, 1)?,
            n_alive: n,
        })
    }

    /// Total number of ids, alive or retired.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Whether the registry tracks no ids at all.
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Number of clusters still alive.
    pub fn n_alive(&self) -> usize {
        self.n_alive
    }

    /// Whether `id` is still alive.
    #[inline]
    pub fn is_alive(&self, id: usize) -> bool {
        self.alive[id]
    }

    /// Number of original items absorbed into `id`.
    #[inline]
    pub fn size(&self, id: usize) -> usize {
        self.size[id]
    }

    /// Alive ids in ascending order.
    pub fn alive_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(id, &alive)| alive.then_some(id))
    }

    /// Mark `id` as retired. Retiring twice is a no-op.
    pub fn retire(&mut self, id: usize) {
        if std::mem::replace(&mut self.alive[id], false) {
            self.n_alive -= 1;
        }
    }

    /// Fold the size of `absorbed` into `survivor`.
    pub fn merge_size(&mut self, survivor: usize, absorbed: usize) {
        self.size[survivor] += self.size[absorbed];
    }
}
