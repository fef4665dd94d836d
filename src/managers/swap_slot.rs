//! Swap Slot for SelectionsSaver.
//!
//! One remembered selection per scope. `swap` exchanges it with the caller's
//! current selection, but only once a previous value is known to exist.

use tracing::debug;

use crate::managers::scope_lock::ScopeLocks;
use crate::managers::state_store::StateStore;
use crate::types::bookmark::SwapSlotRecord;
use crate::types::errors::StoreError;
use crate::types::scope::WorkspaceScope;

/// Trait defining swap-slot operations.
pub trait SwapSlotTrait {
    fn peek(&self, scope: &WorkspaceScope) -> Result<Option<SwapSlotRecord>, StoreError>;
    fn save(&self, scope: &WorkspaceScope, record: &SwapSlotRecord) -> Result<(), StoreError>;
    /// Stores `current` and returns the previous content. When the slot is
    /// empty, returns `None` and leaves the slot untouched.
    fn swap(&self, scope: &WorkspaceScope, current: &SwapSlotRecord) -> Result<Option<SwapSlotRecord>, StoreError>;
}

pub struct SwapSlot<'a, S: StateStore + ?Sized> {
    store: &'a S,
    locks: &'a ScopeLocks,
}

impl<'a, S: StateStore + ?Sized> SwapSlot<'a, S> {
    pub fn new(store: &'a S, locks: &'a ScopeLocks) -> Self {
        Self { store, locks }
    }
}

impl<'a, S: StateStore + ?Sized> SwapSlotTrait for SwapSlot<'a, S> {
    fn peek(&self, scope: &WorkspaceScope) -> Result<Option<SwapSlotRecord>, StoreError> {
        self.store.get_swap_slot(scope)
    }

    fn save(&self, scope: &WorkspaceScope, record: &SwapSlotRecord) -> Result<(), StoreError> {
        self.locks.with_scope(scope, || {
            self.store.set_swap_slot(scope, Some(record))?;
            debug!(scope = %scope, file = %record.file_path, "Swap slot saved");
            Ok(())
        })
    }

    fn swap(&self, scope: &WorkspaceScope, current: &SwapSlotRecord) -> Result<Option<SwapSlotRecord>, StoreError> {
        self.locks.with_scope(scope, || {
            let previous = match self.store.get_swap_slot(scope)? {
                Some(previous) => previous,
                None => {
                    debug!(scope = %scope, "Swap requested on empty slot");
                    return Ok(None);
                }
            };
            self.store.set_swap_slot(scope, Some(current))?;
            debug!(
                scope = %scope,
                stored = %current.file_path,
                returned = %previous.file_path,
                "Swap slot exchanged"
            );
            Ok(Some(previous))
        })
    }
}
