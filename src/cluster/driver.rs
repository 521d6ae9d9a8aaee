//! Merge driver shared by every linkage.
//!
//! ```text
//! ACTIVE ── select ─ record ─ retire ─ propagate ──┐
//!   ^                                              │  × (n - g)
//!   └──────────────────────────────────────────────┘
//!                                                  └─> DONE
//! ```
//!
//! The driver never looks at distances directly. An [`Engine`] answers "who is
//! your nearest alive neighbour" and absorbs a retired cluster into a
//! survivor; everything linkage-specific lives behind that seam.

use super::registry::ClusterRegistry;
use crate::error::Result;
use crate::hierarchy::{Dendrogram, Merge};
use tracing::trace;

/// Nearest alive neighbour of a cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Neighbor {
    pub(crate) id: usize,
    pub(crate) distance: f64,
}

/// Linkage-specific nearest-neighbour index.
pub(crate) trait Engine {
    /// Nearest alive neighbour of the alive cluster `id`.
    fn nearest(&self, id: usize) -> Option<Neighbor>;

    /// Fold `absorbed` into `survivor`.
    ///
    /// Called after `absorbed` is retired and before the registry folds the
    /// sizes, so `registry.size` still reports pre-merge sizes.
    fn absorb(&mut self, registry: &ClusterRegistry, survivor: usize, absorbed: usize);
}

/// Closest alive pair, scanning ids in ascending order.
///
/// A candidate replaces the incumbent only when strictly closer, or equally
/// close with a strictly smaller cluster size.
pub(crate) fn select<E: Engine>(engine: &E, registry: &ClusterRegistry) -> Option<(usize, Neighbor)> {
    let mut best: Option<(usize, Neighbor)> = None;
    for id in registry.alive_ids() {
        let Some(nn) = engine.nearest(id) else {
            continue;
        };
        let wins = match best {
            None => true,
            Some((incumbent, current)) => {
                nn.distance < current.distance
                    || (nn.distance == current.distance
                        && registry.size(id) < registry.size(incumbent))
            }
        };
        if wins {
            best = Some((id, nn));
        }
    }
    best
}

/// One select/record/retire/propagate iteration.
pub(crate) fn step<E: Engine>(engine: &mut E, registry: &mut ClusterRegistry) -> Option<Merge> {
    let (survivor, nn) = select(engine, registry)?;
    let absorbed = nn.id;
    let merge = Merge {
        survivor,
        absorbed,
        distance: nn.distance,
        size: registry.size(survivor) + registry.size(absorbed),
    };
    registry.retire(absorbed);
    engine.absorb(registry, survivor, absorbed);
    registry.merge_size(survivor, absorbed);
    Some(merge)
}

/// Run merges until `n_clusters` clusters remain.
///
/// The caller guarantees `0 < n_clusters < registry.len()`.
pub(crate) fn agglomerate<E: Engine>(
    mut engine: E,
    mut registry: ClusterRegistry,
    n_clusters: usize,
) -> Result<Dendrogram> {
    let n_items = registry.len();
    let n_steps = n_items - n_clusters;
    let mut dendrogram = Dendrogram::with_capacity(n_items, n_steps)?;

    for iteration in 0..n_steps {
        let Some(merge) = step(&mut engine, &mut registry) else {
            break;
        };
        trace!(
            iteration,
            survivor = merge.survivor,
            absorbed = merge.absorbed,
            distance = merge.distance,
            size = merge.size,
            "merge"
        );
        dendrogram.push(merge);
    }

    Ok(dendrogram)
}
