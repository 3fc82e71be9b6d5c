//! Typed storage: the innermost element buffer of a column.
//!
//! `Storage` is a small closed sum-type over the numeric kinds this crate
//! supports, mirroring how a `Value<V>` enum wraps a native type rather
//! than going through a trait object, since the set of kinds is closed.

use std::ops::Range;

use crate::bitvector::BitVector;
use crate::value::{Op, Value};

/// Fixed-length typed vector of `S` elements.
#[derive(Clone, Debug, PartialEq)]
pub enum Storage {
    I64(Vec<i64>),
    U64(Vec<u64>),
    F64(Vec<f64>),
}

impl Storage {
    /// Number of elements `S`.
    pub fn len(&self) -> usize {
        match self {
            Storage::I64(v) => v.len(),
            Storage::U64(v) => v.len(),
            Storage::F64(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bit vector of length `S` with bits set at positions within `range`
    /// whose element satisfies `op value`, zero elsewhere.
    pub fn linear_search(&self, op: Op, value: Value, range: Range<usize>) -> BitVector {
        debug_assert!(range.end <= self.len(), "linear_search range exceeds storage");
        let mut bv = BitVector::new(self.len());
        match (self, value) {
            (Storage::I64(elems), Value::Int(rhs)) => {
                for i in range {
                    if op.apply_i64(elems[i], rhs) {
                        bv.set(i);
                    }
                }
            }
            (Storage::U64(elems), Value::Uint(rhs)) => {
                for i in range {
                    if op.apply_u64(elems[i], rhs) {
                        bv.set(i);
                    }
                }
            }
            (Storage::F64(elems), Value::Float(rhs)) => {
                for i in range {
                    if op.apply_f64(elems[i], rhs) {
                        bv.set(i);
                    }
                }
            }
            // IS NULL / IS NOT NULL carry a typed null and never reach a
            // value comparison here: null-handling is resolved by the
            // overlay stack (or, with zero overlays, there is nothing to
            // resolve and the result is vacuously empty). The returned
            // all-clear vector is discarded by callers for these ops.
            (_, Value::Null) => (),
            _ => debug_assert!(false, "value type mismatch reached storage"),
        }
        bv
    }

    /// Bit vector of length `indices.len()`: the i-th bit is set iff
    /// `storage[indices[i]]` satisfies `op value`.
    pub fn index_search(&self, op: Op, value: Value, indices: &[usize]) -> BitVector {
        let mut bv = BitVector::new(indices.len());
        match (self, value) {
            (Storage::I64(elems), Value::Int(rhs)) => {
                for (i, &idx) in indices.iter().enumerate() {
                    if op.apply_i64(elems[idx], rhs) {
                        bv.set(i);
                    }
                }
            }
            (Storage::U64(elems), Value::Uint(rhs)) => {
                for (i, &idx) in indices.iter().enumerate() {
                    if op.apply_u64(elems[idx], rhs) {
                        bv.set(i);
                    }
                }
            }
            (Storage::F64(elems), Value::Float(rhs)) => {
                for (i, &idx) in indices.iter().enumerate() {
                    if op.apply_f64(elems[idx], rhs) {
                        bv.set(i);
                    }
                }
            }
            (_, Value::Null) => (),
            _ => debug_assert!(false, "value type mismatch reached storage"),
        }
        bv
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;
