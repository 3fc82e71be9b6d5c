//! Overlays: transforms stacked on [crate::Storage] that re-map indices
//! between table-row space and storage-element space.
//!
//! An overlay is expressed as a capability trait rather than a deep
//! inheritance hierarchy: a handful of narrow methods rather than a class
//! hierarchy.

use std::ops::Range;

use crate::bitvector::BitVector;
use crate::value::OverlayOp;

mod null;

pub use null::NullOverlay;

/// A bidirectional mapping between an outer (table-side) index space and an
/// inner (storage-side) index space.
///
/// Overlays stack: the executor applies them outermost-first going "toward
/// storage" and innermost-first (reverse order) lifting a storage-space bit
/// vector back to the table.
pub trait Overlay {
    /// Number of rows in this overlay's outer (table-facing) space.
    fn outer_len(&self) -> usize;

    /// Given a range of outer-space rows, the corresponding contiguous
    /// range of inner (storage-facing) indices.
    fn map_to_storage_range(&self, range: Range<usize>) -> Range<usize>;

    /// Given outer-space indices already known to require a storage lookup,
    /// the corresponding inner-space indices, in the same order.
    fn map_to_storage_index_vector(&self, indices: &[usize]) -> Vec<usize>;

    /// For `op` and a list of outer-space indices, a bit vector (length
    /// `indices.len()`) stating which of those indices must still reach
    /// storage; the rest can be decided by this overlay alone.
    fn is_storage_lookup_required(&self, op: OverlayOp, indices: &[usize]) -> BitVector;

    /// For the indices that [Overlay::is_storage_lookup_required] marked as
    /// not needing storage, a bit vector (length `indices.len()`) of which
    /// satisfy `op` purely at this overlay's level.
    fn index_search(&self, op: OverlayOp, indices: &[usize]) -> BitVector;

    /// Given a storage-space bit vector of matches (and the op that produced
    /// it), the corresponding outer-space bit vector, of length
    /// [Overlay::outer_len].
    fn map_to_table_bitvector(&self, storage_bits: &BitVector, op: OverlayOp) -> BitVector;
}
