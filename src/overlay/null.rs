//! Null-mask overlay.
//!
//! Wraps storage whose element count equals the number of non-null rows,
//! translating table-row positions through a null mask (bit set == row is
//! non-null).

use std::ops::Range;

use super::Overlay;
use crate::bitvector::BitVector;
use crate::value::OverlayOp;

pub struct NullOverlay {
    /// Length equals the outer (table) row count. Bit set iff the row is
    /// non-null.
    non_null: BitVector,
    /// Exclusive prefix sum of `non_null`: `prefix[i]` is the number of
    /// non-null rows in `[0, i)`. Length `outer_len() + 1`.
    ///
    /// Precomputed once at construction so every forward/reverse mapping
    /// call during a filter is O(1) rather than rescanning the mask, the
    /// same tradeoff a block index makes for repeated lookups over an
    /// immutable structure.
    prefix: Vec<u32>,
}

impl NullOverlay {
    /// Build a null overlay from a table-length null mask (bit set == row
    /// is non-null).
    pub fn new(non_null: BitVector) -> NullOverlay {
        let mut prefix = Vec::with_capacity(non_null.size() + 1);
        let mut running = 0u32;
        prefix.push(0);
        for i in 0..non_null.size() {
            if non_null.is_set(i) {
                running += 1;
            }
            prefix.push(running);
        }
        NullOverlay { non_null, prefix }
    }

    /// Number of non-null rows, i.e. the storage element count this overlay
    /// expects to sit above.
    pub fn storage_len(&self) -> usize {
        *self.prefix.last().unwrap_or(&0) as usize
    }
}

impl Overlay for NullOverlay {
    fn outer_len(&self) -> usize {
        self.non_null.size()
    }

    fn map_to_storage_range(&self, range: Range<usize>) -> Range<usize> {
        debug_assert!(range.end <= self.outer_len(), "range exceeds overlay's outer space");
        self.prefix[range.start] as usize..self.prefix[range.end] as usize
    }

    fn map_to_storage_index_vector(&self, indices: &[usize]) -> Vec<usize> {
        indices
            .iter()
            .map(|&i| self.prefix[i] as usize)
            .collect()
    }

    fn is_storage_lookup_required(&self, op: OverlayOp, indices: &[usize]) -> BitVector {
        let mut bv = BitVector::new(indices.len());
        if op == OverlayOp::Other {
            for (pos, &i) in indices.iter().enumerate() {
                if self.non_null.is_set(i) {
                    bv.set(pos);
                }
            }
        }
        // IsNull / IsNotNull are answered entirely by this overlay: no row
        // requires a storage lookup.
        bv
    }

    fn index_search(&self, op: OverlayOp, indices: &[usize]) -> BitVector {
        let mut bv = BitVector::new(indices.len());
        match op {
            OverlayOp::IsNull => {
                for (pos, &i) in indices.iter().enumerate() {
                    if !self.non_null.is_set(i) {
                        bv.set(pos);
                    }
                }
            }
            OverlayOp::IsNotNull => {
                for (pos, &i) in indices.iter().enumerate() {
                    if self.non_null.is_set(i) {
                        bv.set(pos);
                    }
                }
            }
            // Rows reaching this branch under Other are exactly the null
            // rows (is_storage_lookup_required routed non-null rows to
            // storage); a null row never satisfies a value comparison.
            OverlayOp::Other => {}
        }
        bv
    }

    fn map_to_table_bitvector(&self, storage_bits: &BitVector, op: OverlayOp) -> BitVector {
        let mut bv = BitVector::new(self.outer_len());
        match op {
            OverlayOp::IsNull => {
                for i in 0..self.outer_len() {
                    if !self.non_null.is_set(i) {
                        bv.set(i);
                    }
                }
            }
            OverlayOp::IsNotNull => {
                for i in 0..self.outer_len() {
                    if self.non_null.is_set(i) {
                        bv.set(i);
                    }
                }
            }
            OverlayOp::Other => {
                for i in 0..self.outer_len() {
                    if self.non_null.is_set(i) && storage_bits.is_set(self.prefix[i] as usize) {
                        bv.set(i);
                    }
                }
            }
        }
        bv
    }
}

#[cfg(test)]
#[path = "null_test.rs"]
mod null_test;
