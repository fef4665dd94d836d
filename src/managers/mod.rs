// SelectionsSaver state managers
// Managers own stateful operations over the persistent store: bookmarks, the swap slot, scope locking.

pub mod marker_store;
pub mod scope_lock;
pub mod state_store;
pub mod swap_slot;
