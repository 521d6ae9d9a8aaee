//! Merge queues and their replay.
//!
//! A [`Dendrogram`] is the ordered list of merges an engine performed:
//!
//! ```text
//!  step │ survivor absorbed │ distance  size
//! ──────┼───────────────────┼────────────────
//!    1  │     0        1    │   2.0      2
//!    2  │     2        0    │   3.0      3
//! ```
//!
//! It is not a materialised tree. Replaying a prefix of the queue through a
//! [`DisjointSet`] gives the flat clustering at that level, and
//! [`Dendrogram::clusters`] lists members of the clusters left at the end.

mod dendrogram;
mod union_find;

pub use dendrogram::{Dendrogram, Merge};
pub use union_find::DisjointSet;
