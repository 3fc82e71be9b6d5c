//! Legacy bridge: builds [SimpleColumn] bindings from a table's columns and
//! falls back to the legacy per-column filter for unsupported columns.
//!
//! The table/column data structures themselves live outside this crate;
//! this module only needs a capability-shaped view onto them, the same way
//! a `BuildIndex` trait stands in for whatever concrete index type calls it.

use log::{info, trace};

use crate::bitvector::BitVector;
use crate::column::SimpleColumn;
use crate::constraint::Constraint;
use crate::executor::FilterExecutor;
use crate::overlay::{NullOverlay, Overlay};
use crate::rowmap::RowMap;
use crate::storage::Storage;
use crate::value::Value;
use crate::Result;

/// Column type, as seen by the bridge. Only the numeric kinds this crate
/// supports are eligible for the new pipeline; the rest always disqualify.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    I64,
    U64,
    F64,
    /// String-dictionary-encoded column.
    StringDict,
    /// Placeholder column carrying no real data.
    Dummy,
    /// Synthetic row-id column.
    SyntheticId,
}

impl ColumnType {
    fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::I64 | ColumnType::U64 | ColumnType::F64)
    }
}

/// Metadata the bridge needs to decide eligibility for the new pipeline.
pub trait ColumnMeta {
    fn column_type(&self) -> ColumnType;
    fn is_sorted(&self) -> bool;
    fn is_dense(&self) -> bool;
    fn is_nullable(&self) -> bool;
}

/// Read access to a column's raw data, as the bridge needs it to build a
/// [SimpleColumn] binding.
pub trait ColumnView: ColumnMeta {
    fn storage_i64(&self) -> Option<&[i64]>;
    fn storage_u64(&self) -> Option<&[u64]>;
    fn storage_f64(&self) -> Option<&[f64]>;

    /// Null mask over the column's full row count (bit set == non-null),
    /// required iff [ColumnMeta::is_nullable].
    fn null_mask(&self) -> Option<BitVector>;

    /// Whether a column-level row selector is in effect. Its presence
    /// routes the predicate to legacy regardless of type/flags.
    fn has_row_selector(&self) -> bool;

    /// Whether `value`'s type matches this column's type.
    fn value_type_matches(&self, value: &Value) -> bool {
        matches!(
            (self.column_type(), value),
            (ColumnType::I64, Value::Int(_))
                | (ColumnType::U64, Value::Uint(_))
                | (ColumnType::F64, Value::Float(_))
                | (_, Value::Null)
        )
    }
}

/// The pre-existing per-column filter, used whenever a column is ineligible
/// for the new pipeline.
pub trait LegacyFilter {
    fn filter_legacy(&self, constraint: &Constraint, row_map: &mut RowMap);
}

/// Build a [SimpleColumn] binding for `column`, or `None` if it should be
/// routed to the legacy filter.
pub fn bind_column<C: ColumnView>(column: &C) -> Option<SimpleColumn> {
    let column_type = column.column_type();

    if !column_type.is_numeric() {
        info!("legacy bridge: column type {:?} ineligible, routing to legacy", column_type);
        return None;
    }
    if column.is_sorted() || column.is_dense() {
        info!("legacy bridge: sorted/dense column, routing to legacy");
        return None;
    }
    if column.has_row_selector() {
        info!("legacy bridge: column has a row selector, routing to legacy");
        return None;
    }

    let storage = match column_type {
        ColumnType::I64 => Storage::I64(column.storage_i64()?.to_vec()),
        ColumnType::U64 => Storage::U64(column.storage_u64()?.to_vec()),
        ColumnType::F64 => Storage::F64(column.storage_f64()?.to_vec()),
        ColumnType::StringDict | ColumnType::Dummy | ColumnType::SyntheticId => return None,
    };

    let mut overlays: Vec<Box<dyn Overlay>> = Vec::new();
    if column.is_nullable() {
        match column.null_mask() {
            Some(mask) => overlays.push(Box::new(NullOverlay::new(mask))),
            // Nullable but no mask supplied: inconsistent metadata, safer to
            // route to legacy than to silently treat every row as non-null.
            None => return None,
        }
    }

    let simple_column = SimpleColumn::new(storage, overlays).ok()?;
    trace!(
        "legacy bridge: bound column_type={:?} overlay_count={}",
        column_type,
        simple_column.overlays().len()
    );
    Some(simple_column)
}

/// Apply `constraint` to `column`'s row map, routing to `legacy` when the
/// column is ineligible or `constraint.value`'s type mismatches the
/// column's type.
pub fn filter_column<C, L>(
    executor: &FilterExecutor,
    constraint: &Constraint,
    column: &C,
    legacy: &L,
    row_map: &mut RowMap,
) -> Result<()>
where
    C: ColumnView,
    L: LegacyFilter,
{
    let eligible = column.value_type_matches(&constraint.value).then(|| bind_column(column)).flatten();

    match eligible {
        Some(simple_column) => executor.filter_column(constraint, &simple_column, row_map),
        None => {
            legacy.filter_legacy(constraint, row_map);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;
