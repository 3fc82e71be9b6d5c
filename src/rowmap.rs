//! Row map: a set of row indices into a table of row count `N`.
//!
//! Internally a sum type, [RowMap] transitions between a dense [Range] form
//! and a sparse [BitVector] form only on an explicit construction or fuse —
//! never implicitly on every mutation.

use std::ops::Range;

use crate::bitvector::BitVector;

/// A set of row indices, always sorted ascending, distinct, and `< N` for
/// whatever table this row map was derived from.
#[derive(Clone, Debug)]
pub enum RowMap {
    /// A half-open interval `[begin, end)`.
    Dense(Range<usize>),
    /// A dense bit vector of length exactly `N`. `count` caches the number
    /// of set bits so that `size()` stays `O(1)`.
    Sparse { bits: BitVector, count: usize },
}

impl RowMap {
    /// Build a row map from a contiguous range of table rows.
    pub fn from_range(range: Range<usize>) -> RowMap {
        debug_assert!(range.start <= range.end, "range begin must not exceed end");
        RowMap::Dense(range)
    }

    /// Build a row map from a table-length bit vector.
    pub fn from_bitmap(bits: BitVector) -> RowMap {
        let count = bits.count_set_bits();
        RowMap::Sparse { bits, count }
    }

    /// Number of set rows.
    pub fn size(&self) -> usize {
        match self {
            RowMap::Dense(r) => r.end - r.start,
            RowMap::Sparse { count, .. } => *count,
        }
    }

    /// True iff `size() == 0`.
    #[inline]
    pub fn empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether `row` is a member of this set.
    pub fn contains(&self, row: usize) -> bool {
        match self {
            RowMap::Dense(r) => r.contains(&row),
            RowMap::Sparse { bits, .. } => row < bits.size() && bits.is_set(row),
        }
    }

    /// The `i`-th row index (0-based). Panics (debug) if `i >= size()`.
    pub fn get(&self, i: usize) -> usize {
        debug_assert!(i < self.size(), "row-map index out of range");
        match self {
            RowMap::Dense(r) => r.start + i,
            RowMap::Sparse { bits, .. } => bits
                .iterate_set_bits()
                .nth(i)
                .expect("row-map index out of range"),
        }
    }

    /// Iterate all member row indices in ascending order.
    pub fn iterate_rows(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            RowMap::Dense(r) => Box::new(r.clone()),
            RowMap::Sparse { bits, .. } => Box::new(bits.iterate_set_bits()),
        }
    }

    /// Intersect this row map with `other`, in place.
    ///
    /// Stays a [RowMap::Dense] only when both operands are dense; any
    /// involvement of a sparse side produces a fused [RowMap::Sparse] over
    /// the wider operand's universe length.
    pub fn intersect(&mut self, other: &RowMap) {
        match (&*self, other) {
            (RowMap::Dense(a), RowMap::Dense(b)) => {
                let start = a.start.max(b.start);
                let end = a.end.min(b.end).max(start);
                *self = RowMap::Dense(start..end);
            }
            _ => {
                let universe = self.universe_len().max(other.universe_len());
                let mut bits = BitVector::new(universe);
                for row in 0..universe {
                    if self.contains(row) && other.contains(row) {
                        bits.set(row);
                    }
                }
                *self = RowMap::from_bitmap(bits);
            }
        }
    }

    /// Upper bound on row indices this row map could contain: for a dense
    /// range, its `end`; for a sparse bitmap, its declared length.
    fn universe_len(&self) -> usize {
        match self {
            RowMap::Dense(r) => r.end,
            RowMap::Sparse { bits, .. } => bits.size(),
        }
    }
}

#[cfg(test)]
#[path = "rowmap_test.rs"]
mod rowmap_test;
