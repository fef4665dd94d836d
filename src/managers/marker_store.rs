//! Marker Store for SelectionsSaver.
//!
//! Implements `MarkerStoreTrait`: ordered bookmark CRUD within one scope.
//! Every write reads the whole sequence, edits it in memory and writes the
//! whole sequence back, holding the scope lock for the full cycle.

use tracing::debug;

use crate::managers::scope_lock::ScopeLocks;
use crate::managers::state_store::StateStore;
use crate::types::bookmark::BookmarkRecord;
use crate::types::errors::StoreError;
use crate::types::scope::WorkspaceScope;

/// Trait defining bookmark storage operations.
pub trait MarkerStoreTrait {
    fn list(&self, scope: &WorkspaceScope) -> Result<Vec<BookmarkRecord>, StoreError>;
    fn find(&self, scope: &WorkspaceScope, id: &str) -> Result<Option<BookmarkRecord>, StoreError>;
    fn add(&self, scope: &WorkspaceScope, record: BookmarkRecord) -> Result<(), StoreError>;
    /// Builds the record from the scope's current sequence and appends it,
    /// all under the scope lock. Returns the appended record.
    fn add_with<F>(&self, scope: &WorkspaceScope, build: F) -> Result<BookmarkRecord, StoreError>
    where
        F: FnOnce(&[BookmarkRecord]) -> BookmarkRecord;
    /// Returns whether a record was removed. Absent ids are a no-op.
    fn remove_by_id(&self, scope: &WorkspaceScope, id: &str) -> Result<bool, StoreError>;
    /// Returns how many records were dropped.
    fn clear(&self, scope: &WorkspaceScope) -> Result<usize, StoreError>;
}

/// Marker store over a borrowed state store.
pub struct MarkerStore<'a, S: StateStore + ?Sized> {
    store: &'a S,
    locks: &'a ScopeLocks,
}

impl<'a, S: StateStore + ?Sized> MarkerStore<'a, S> {
    pub fn new(store: &'a S, locks: &'a ScopeLocks) -> Self {
        Self { store, locks }
    }
}

impl<'a, S: StateStore + ?Sized> MarkerStoreTrait for MarkerStore<'a, S> {
    fn list(&self, scope: &WorkspaceScope) -> Result<Vec<BookmarkRecord>, StoreError> {
        self.store.get_bookmarks(scope)
    }

    fn find(&self, scope: &WorkspaceScope, id: &str) -> Result<Option<BookmarkRecord>, StoreError> {
        Ok(self.list(scope)?.into_iter().find(|r| r.id == id))
    }

    /// Appends to the end of the scope's sequence. Duplicate ids are not
    /// rejected here; id uniqueness belongs to whoever mints them.
    fn add(&self, scope: &WorkspaceScope, record: BookmarkRecord) -> Result<(), StoreError> {
        self.add_with(scope, |_| record).map(|_| ())
    }

    fn add_with<F>(&self, scope: &WorkspaceScope, build: F) -> Result<BookmarkRecord, StoreError>
    where
        F: FnOnce(&[BookmarkRecord]) -> BookmarkRecord,
    {
        self.locks.with_scope(scope, || {
            let mut records = self.store.get_bookmarks(scope)?;
            let record = build(&records);
            records.push(record.clone());
            self.store.set_bookmarks(scope, &records)?;
            debug!(scope = %scope, bookmark_id = %record.id, count = records.len(), "Bookmark added");
            Ok(record)
        })
    }

    fn remove_by_id(&self, scope: &WorkspaceScope, id: &str) -> Result<bool, StoreError> {
        self.locks.with_scope(scope, || {
            let records = self.store.get_bookmarks(scope)?;
            let before = records.len();
            let kept: Vec<BookmarkRecord> = records.into_iter().filter(|r| r.id != id).collect();
            if kept.len() == before {
                debug!(scope = %scope, bookmark_id = %id, "Bookmark already absent");
                return Ok(false);
            }
            self.store.set_bookmarks(scope, &kept)?;
            debug!(scope = %scope, bookmark_id = %id, count = kept.len(), "Bookmark removed");
            Ok(true)
        })
    }

    fn clear(&self, scope: &WorkspaceScope) -> Result<usize, StoreError> {
        self.locks.with_scope(scope, || {
            let dropped = self.store.get_bookmarks(scope)?.len();
            self.store.set_bookmarks(scope, &[])?;
            debug!(scope = %scope, dropped, "Bookmarks cleared");
            Ok(dropped)
        })
    }
}
