//! The single published "current target" value.
//!
//! Written by the resolver on the UI thread, read by the renderer on the render
//! pass. A stale read is harmless; the value is one word so it never tears.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use notemark_types::ItemId;

const NONE: ItemId = -1;

/// Shared handle to the item the tracked note currently represents.
///
/// Cloning yields another handle to the same slot.
#[derive(Debug, Clone)]
pub struct TargetSlot {
    current: Arc<AtomicI32>,
}

impl Default for TargetSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            current: Arc::new(AtomicI32::new(NONE)),
        }
    }

    /// Current target, `None` if unresolved
    pub fn get(&self) -> Option<ItemId> {
        let id = self.current.load(Ordering::Acquire);
        (id > 0).then_some(id)
    }

    /// Publish a new target. Non-positive ids are stored as none.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set(&self, target: Option<ItemId>) -> bool {
        let id = target.filter(|id| *id > 0).unwrap_or(NONE);
        self.current.swap(id, Ordering::AcqRel) != id
    }

    /// Reset to none
    pub fn clear(&self) -> bool {
        self.set(None)
    }
}
