//! Indexed binary min-heap.
//!
//! A min-heap over a fixed key domain `[0, n)` where every key also knows its
//! current slot, so an arbitrary entry can be removed in O(log n) without a
//! scan.
//!
//! ```text
//! keys   : slot -> key      [0, len) is the heap, [len, n) holds removed keys
//! slots  : key  -> slot     always the exact inverse of `keys`
//! values : key  -> value    kept after removal, readable at any time
//!
//! parent(s) = (s - 1) / 2     children(s) = 2s + 1, 2s + 2
//! invariant : values[keys[parent(s)]] <= values[keys[s]]  for 0 < s < len
//! ```
//!
//! Equal values are ordered by array position only. There is no secondary
//! key, so which of two equal entries sits at the root depends on the exact
//! sequence of operations. The clustering engines rely on that sequence being
//! reproducible, not on any particular tie order.

use crate::buffer;
use crate::error::Result;

/// Min-heap of `(key, value)` entries with O(1) key-to-slot lookup.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<V> {
    keys: Vec<usize>,
    slots: Vec<usize>,
    values: Vec<V>,
    len: usize,
}

impl<V: PartialOrd + Copy> IndexedMinHeap<V> {
    /// Build a heap holding every key `0..values.len()`, keyed to
    /// `values[key]`, in O(n).
    pub fn from_values(values: Vec<V>) -> Result<Self> {
        let n = values.len();
        let mut heap = Self {
            keys: buffer::collect(0..n)?,
            slots: buffer::collect(0..n)?,
            values,
            len: n,
        };
        for slot in (0..n / 2).rev() {
            heap.sift_down(slot);
        }
        Ok(heap)
    }

    /// Size of the key domain.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Number of entries currently in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The minimum entry.
    pub fn peek(&self) -> Option<(usize, V)> {
        (self.len > 0).then(|| {
            let key = self.keys[0];
            (key, self.values[key])
        })
    }

    /// Whether `key` is currently in the heap.
    pub fn contains(&self, key: usize) -> bool {
        self.slots[key] < self.len
    }

    /// Current slot of `key`, if present.
    pub fn slot_of(&self, key: usize) -> Option<usize> {
        self.contains(key).then(|| self.slots[key])
    }

    /// Last value assigned to `key`, whether or not it is still in the heap.
    pub fn value(&self, key: usize) -> V {
        self.values[key]
    }

    /// Remove and return the minimum entry.
    pub fn pop(&mut self) -> Option<(usize, V)> {
        self.pop_at(0)
    }

    /// Remove the entry sitting at `slot`.
    ///
    /// The last entry takes its place and is sifted up or down as needed.
    pub fn pop_at(&mut self, slot: usize) -> Option<(usize, V)> {
        if slot >= self.len {
            return None;
        }
        let key = self.keys[slot];
        self.len -= 1;
        self.swap(slot, self.len);
        if slot < self.len {
            let settled = self.sift_up(slot);
            self.sift_down(settled);
        }
        Some((key, self.values[key]))
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: usize) -> Option<V> {
        let slot = self.slot_of(key)?;
        self.pop_at(slot).map(|(_, value)| value)
    }

    /// Insert `key` with `value`. A key that is already present is removed
    /// first, so this also serves as an update.
    ///
    /// # Panics
    ///
    /// If `key` is outside the key domain.
    pub fn push(&mut self, key: usize, value: V) {
        if self.contains(key) {
            let _ = self.remove(key);
        }
        self.values[key] = value;
        let slot = self.slots[key];
        self.swap(slot, self.len);
        self.len += 1;
        let _ = self.sift_up(self.len - 1);
    }

    /// Entries in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, V)> + '_ {
        self.keys[..self.len].iter().map(|&k| (k, self.values[k]))
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.values[self.keys[a]] < self.values[self.keys[b]]
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.keys.swap(a, b);
        self.slots[self.keys[a]] = a;
        self.slots[self.keys[b]] = b;
    }

    /// Returns the slot the entry settled in.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let mut child = 2 * slot + 1;
            if child >= self.len {
                break;
            }
            if child + 1 < self.len && self.less(child + 1, child) {
                child += 1;
            }
            if !self.less(child, slot) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let inverse = (0..self.capacity()).all(|k| self.keys[self.slots[k]] == k);
        let ordered = (1..self.len).all(|s| !self.less(s, (s - 1) / 2));
        inverse && ordered
    }
}
