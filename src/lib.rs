//! Columnar filter executor for an in-memory analytical table store.
//!
//! Given a table column wrapped in a stack of overlays, and a single
//! predicate, [FilterExecutor] narrows a [RowMap] of row indices to those
//! that satisfy the predicate. The executor picks between two evaluation
//! strategies — a bounded linear scan over storage, or a sparse indexed
//! probe — based on the incoming row map's density, and drives overlays
//! (e.g. a null mask) to translate between the table's row space and the
//! underlying storage's element space along the way.
//!
//! Query planning across multiple predicates, persistence, and
//! multi-threaded execution of a single filter are out of scope: each
//! predicate is filtered independently and intersected into the caller's
//! running row map (see [crate::rowmap::RowMap::intersect]).
//!
//! **Inventory of modules**
//!
//! * [rowmap] — the set of row indices a filter call narrows.
//! * [bitvector] — the dense bit set both row maps and storage results are
//!   built from.
//! * [storage] — typed element buffers and their linear/indexed search.
//! * [overlay] — transforms stacked on storage (e.g. [overlay::NullOverlay]).
//! * [column] — binds one storage to its overlay stack.
//! * [executor] — strategy selection and the two filter algorithms.
//! * [bridge] — builds column bindings from table metadata, or routes to a
//!   caller-supplied legacy filter when a column is ineligible.

mod error;

pub mod bitvector;
pub mod bridge;
pub mod column;
pub mod constraint;
pub mod executor;
pub mod overlay;
pub mod rowmap;
pub mod storage;
pub mod value;

pub use bitvector::BitVector;
pub use bridge::{bind_column, filter_column, ColumnMeta, ColumnType, ColumnView, LegacyFilter};
pub use column::{SimpleColumn, K_MAX_OVERLAY_COUNT};
pub use constraint::Constraint;
pub use error::{Error, Result};
pub use executor::FilterExecutor;
pub use overlay::{NullOverlay, Overlay};
pub use rowmap::RowMap;
pub use storage::Storage;
pub use value::{Op, OverlayOp, Value};
