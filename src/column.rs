//! Simple column: a storage bound to its overlay stack.

use crate::err_at;
use crate::overlay::Overlay;
use crate::storage::Storage;
use crate::Result;

/// Maximum number of overlays a [SimpleColumn] may stack.
pub const K_MAX_OVERLAY_COUNT: usize = 8;

/// Binding of one storage plus an ordered stack of overlays.
///
/// `overlays[0]` is outermost (closest to the table); `overlays[k-1]` is
/// innermost (closest to storage).
pub struct SimpleColumn {
    storage: Storage,
    overlays: Vec<Box<dyn Overlay>>,
}

impl SimpleColumn {
    /// Build a column binding. Fails if `overlays.len() > K_MAX_OVERLAY_COUNT`
    /// — this is checked at construction time (not a debug assertion)
    /// because a caller builds this binding from table metadata that the
    /// legacy bridge has not fully validated.
    pub fn new(storage: Storage, overlays: Vec<Box<dyn Overlay>>) -> Result<SimpleColumn> {
        if overlays.len() > K_MAX_OVERLAY_COUNT {
            return err_at!(
                InvalidInput,
                msg: "overlay stack depth {} exceeds K_MAX_OVERLAY_COUNT {}",
                overlays.len(),
                K_MAX_OVERLAY_COUNT
            );
        }
        Ok(SimpleColumn { storage, overlays })
    }

    /// A column binding with no overlays: the table row space and the
    /// storage element space coincide.
    pub fn without_overlays(storage: Storage) -> SimpleColumn {
        SimpleColumn { storage, overlays: vec![] }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn overlays(&self) -> &[Box<dyn Overlay>] {
        &self.overlays
    }

    /// Row count in the outermost (table) space: the length of the
    /// outermost overlay's outer space, or the storage length if there are
    /// no overlays.
    pub fn table_len(&self) -> usize {
        match self.overlays.first() {
            Some(overlay) => overlay.outer_len(),
            None => self.storage.len(),
        }
    }
}

impl std::fmt::Debug for SimpleColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("SimpleColumn")
            .field("storage", &self.storage)
            .field("overlay_count", &self.overlays.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "column_test.rs"]
mod column_test;
