//! Filter executor: strategy selector and driver of the two filter
//! algorithms.

use log::debug;

use crate::bitvector::BitVector;
use crate::column::SimpleColumn;
use crate::constraint::Constraint;
use crate::rowmap::RowMap;
use crate::value::OverlayOp;
use crate::Result;

/// Applies a single [Constraint] to a [SimpleColumn], narrowing a [RowMap].
///
/// Thresholds that decide between the bounded and indexed algorithms are
/// kept as overridable fields rather than literals buried in the selection
/// logic, the same way a block-size config exposes its constants as named,
/// overridable values.
pub struct FilterExecutor {
    size_threshold: usize,
    ratio_threshold: f64,
}

impl FilterExecutor {
    /// Default row-map size below which the indexed algorithm is even
    /// considered.
    pub const DENSE_SIZE_THRESHOLD: usize = 1024;
    /// Default density (`size / range_size`) below which the indexed
    /// algorithm is preferred over the bounded one.
    pub const DENSE_RATIO_THRESHOLD: f64 = 0.5;

    pub fn new() -> FilterExecutor {
        FilterExecutor {
            size_threshold: Self::DENSE_SIZE_THRESHOLD,
            ratio_threshold: Self::DENSE_RATIO_THRESHOLD,
        }
    }

    /// Override the strategy-selection thresholds.
    pub fn with_thresholds(size_threshold: usize, ratio_threshold: f64) -> FilterExecutor {
        FilterExecutor { size_threshold, ratio_threshold }
    }

    /// Apply `constraint` to `column`, narrowing `row_map` in place.
    ///
    /// Empty `row_map` is a no-op.
    pub fn filter_column(
        &self,
        constraint: &Constraint,
        column: &SimpleColumn,
        row_map: &mut RowMap,
    ) -> Result<()> {
        if row_map.empty() {
            return Ok(());
        }

        let first = row_map.get(0);
        let last = row_map.get(row_map.size() - 1);
        let range_size = last - first;

        let use_indexed = range_size > 0
            && row_map.size() < self.size_threshold
            && (row_map.size() as f64 / range_size as f64) < self.ratio_threshold;

        if use_indexed {
            debug!(
                "filter_column: indexed strategy, size={} range_size={}",
                row_map.size(),
                range_size
            );
            *row_map = self.indexed_filter(constraint, column, row_map)?;
        } else {
            debug!(
                "filter_column: bounded strategy, size={} range_size={}",
                row_map.size(),
                range_size
            );
            let result = self.bounded_filter(constraint, column, first, last)?;
            row_map.intersect(&result);
        }

        Ok(())
    }

    /// Scan a contiguous storage range, touching overlays only at the
    /// boundaries.
    fn bounded_filter(
        &self,
        constraint: &Constraint,
        column: &SimpleColumn,
        first: usize,
        last: usize,
    ) -> Result<RowMap> {
        let overlay_op = OverlayOp::from(constraint.op);

        let mut range = first..(last + 1);
        for overlay in column.overlays() {
            range = overlay.map_to_storage_range(range);
        }

        let mut bits: BitVector =
            column.storage().linear_search(constraint.op, constraint.value, range);

        for overlay in column.overlays().iter().rev() {
            bits = overlay.map_to_table_bitvector(&bits, overlay_op);
        }

        Ok(RowMap::from_bitmap(bits))
    }

    /// Probe storage only at the indices named by `row_map`, letting
    /// overlays short-circuit rows they can decide alone.
    fn indexed_filter(
        &self,
        constraint: &Constraint,
        column: &SimpleColumn,
        row_map: &RowMap,
    ) -> Result<RowMap> {
        let overlay_op = OverlayOp::from(constraint.op);

        let mut global: Vec<usize> = row_map.iterate_rows().collect();
        let mut current: Vec<usize> = global.clone();

        let original_size = global.len();
        let mut valid: Vec<usize> = Vec::new();
        let mut removed: usize = 0;

        for overlay in column.overlays() {
            let partition = overlay.is_storage_lookup_required(overlay_op, &current);

            if partition.count_set_bits() == current.len() {
                // Fast path: every row still needs storage.
                current = overlay.map_to_storage_index_vector(&current);
                continue;
            }

            let mut lookup_global = Vec::new();
            let mut lookup_current = Vec::new();
            let mut settled_global = Vec::new();
            let mut settled_current = Vec::new();

            for (i, &c) in current.iter().enumerate() {
                let g = global[i];
                if partition.is_set(i) {
                    lookup_global.push(g);
                    lookup_current.push(c);
                } else {
                    settled_global.push(g);
                    settled_current.push(c);
                }
            }

            let settled_bits = overlay.index_search(overlay_op, &settled_current);
            // Append globals decided by this overlay BEFORE rewriting
            // `current` through map_to_storage_index_vector — this ordering
            // is load-bearing: `current` is about to shift into a nested
            // overlay's index space and these globals must stay table-row
            // numbers.
            for (i, &g) in settled_global.iter().enumerate() {
                if settled_bits.is_set(i) {
                    valid.push(g);
                } else {
                    removed += 1;
                }
            }

            global = lookup_global;
            current = overlay.map_to_storage_index_vector(&lookup_current);
        }

        let matched_bits = column.storage().index_search(constraint.op, constraint.value, &current);
        for (i, &g) in global.iter().enumerate() {
            if matched_bits.is_set(i) {
                valid.push(g);
            } else {
                removed += 1;
            }
        }

        debug_assert_eq!(
            original_size,
            valid.len() + removed,
            "indexed filter invariant violated: size != valid + removed"
        );

        valid.sort_unstable();
        let mut bits = BitVector::new(column.table_len());
        for row in &valid {
            bits.set(*row);
        }
        Ok(RowMap::from_bitmap(bits))
    }
}

impl Default for FilterExecutor {
    fn default() -> FilterExecutor {
        FilterExecutor::new()
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod executor_test;
