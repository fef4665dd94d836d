//! Persistent state store: two logical tables per scope, `bookmarks` and
//! `swapSlot`.
//!
//! `SqliteStateStore` is the durable implementation; `MemoryStateStore` keeps
//! everything in process and counts accesses so callers can assert that an
//! operation never reached storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::database::connection::Database;
use crate::types::bookmark::{BookmarkRecord, SwapSlotRecord};
use crate::types::errors::StoreError;
use crate::types::scope::WorkspaceScope;

/// Key under which a scope's bookmark sequence is stored.
pub const BOOKMARKS_KEY: &str = "selectionssaver.bookmarks";
/// Key under which a scope's swap slot is stored.
pub const SWAP_SLOT_KEY: &str = "selectionssaver.swapSlot";

/// Scoped key-value persistence used by the marker store and swap slot.
pub trait StateStore {
    /// Returns the scope's bookmarks, or an empty sequence if none were written.
    fn get_bookmarks(&self, scope: &WorkspaceScope) -> Result<Vec<BookmarkRecord>, StoreError>;
    /// Replaces the scope's whole bookmark sequence.
    fn set_bookmarks(&self, scope: &WorkspaceScope, records: &[BookmarkRecord]) -> Result<(), StoreError>;
    fn get_swap_slot(&self, scope: &WorkspaceScope) -> Result<Option<SwapSlotRecord>, StoreError>;
    fn set_swap_slot(&self, scope: &WorkspaceScope, record: Option<&SwapSlotRecord>) -> Result<(), StoreError>;
}

impl<T: StateStore + ?Sized> StateStore for &T {
    fn get_bookmarks(&self, scope: &WorkspaceScope) -> Result<Vec<BookmarkRecord>, StoreError> {
        (**self).get_bookmarks(scope)
    }

    fn set_bookmarks(&self, scope: &WorkspaceScope, records: &[BookmarkRecord]) -> Result<(), StoreError> {
        (**self).set_bookmarks(scope, records)
    }

    fn get_swap_slot(&self, scope: &WorkspaceScope) -> Result<Option<SwapSlotRecord>, StoreError> {
        (**self).get_swap_slot(scope)
    }

    fn set_swap_slot(&self, scope: &WorkspaceScope, record: Option<&SwapSlotRecord>) -> Result<(), StoreError> {
        (**self).set_swap_slot(scope, record)
    }
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn get_bookmarks(&self, scope: &WorkspaceScope) -> Result<Vec<BookmarkRecord>, StoreError> {
        (**self).get_bookmarks(scope)
    }

    fn set_bookmarks(&self, scope: &WorkspaceScope, records: &[BookmarkRecord]) -> Result<(), StoreError> {
        (**self).set_bookmarks(scope, records)
    }

    fn get_swap_slot(&self, scope: &WorkspaceScope) -> Result<Option<SwapSlotRecord>, StoreError> {
        (**self).get_swap_slot(scope)
    }

    fn set_swap_slot(&self, scope: &WorkspaceScope, record: Option<&SwapSlotRecord>) -> Result<(), StoreError> {
        (**self).set_swap_slot(scope, record)
    }
}

// === SqliteStateStore ===

/// State store backed by the `scoped_state` table.
#[derive(Clone)]
pub struct SqliteStateStore {
    db: Arc<Database>,
}

impl SqliteStateStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn read_value<T: DeserializeOwned>(&self, scope: &WorkspaceScope, key: &str) -> Result<Option<T>, StoreError> {
        let raw: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM scoped_state WHERE scope = ?1 AND key = ?2",
                params![scope.as_str(), key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write_value<T: Serialize + ?Sized>(&self, scope: &WorkspaceScope, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        let now = chrono::Utc::now().timestamp_millis();
        self.db.connection().execute(
            "INSERT INTO scoped_state (scope, key, value, updated_at) VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(scope, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![scope.as_str(), key, json, now],
        )?;
        Ok(())
    }
}

impl StateStore for SqliteStateStore {
    fn get_bookmarks(&self, scope: &WorkspaceScope) -> Result<Vec<BookmarkRecord>, StoreError> {
        Ok(self.read_value(scope, BOOKMARKS_KEY)?.unwrap_or_default())
    }

    fn set_bookmarks(&self, scope: &WorkspaceScope, records: &[BookmarkRecord]) -> Result<(), StoreError> {
        self.write_value(scope, BOOKMARKS_KEY, records)
    }

    fn get_swap_slot(&self, scope: &WorkspaceScope) -> Result<Option<SwapSlotRecord>, StoreError> {
        // A stored JSON `null` decodes to `Some(None)`.
        Ok(self.read_value::<Option<SwapSlotRecord>>(scope, SWAP_SLOT_KEY)?.flatten())
    }

    fn set_swap_slot(&self, scope: &WorkspaceScope, record: Option<&SwapSlotRecord>) -> Result<(), StoreError> {
        self.write_value(scope, SWAP_SLOT_KEY, &record)
    }
}

// === MemoryStateStore ===

/// In-process state store. Nothing survives the value being dropped.
#[derive(Default)]
pub struct MemoryStateStore {
    bookmarks: Mutex<HashMap<WorkspaceScope, Vec<BookmarkRecord>>>,
    swap_slots: Mutex<HashMap<WorkspaceScope, SwapSlotRecord>>,
    accesses: AtomicUsize,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of get/set calls served so far.
    pub fn access_count(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.accesses.fetch_add(1, Ordering::SeqCst);
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> StoreError {
    StoreError::LockPoisoned(err.to_string())
}

impl StateStore for MemoryStateStore {
    fn get_bookmarks(&self, scope: &WorkspaceScope) -> Result<Vec<BookmarkRecord>, StoreError> {
        self.touch();
        let map = self.bookmarks.lock().map_err(poisoned)?;
        Ok(map.get(scope).cloned().unwrap_or_default())
    }

    fn set_bookmarks(&self, scope: &WorkspaceScope, records: &[BookmarkRecord]) -> Result<(), StoreError> {
        self.touch();
        let mut map = self.bookmarks.lock().map_err(poisoned)?;
        map.insert(scope.clone(), records.to_vec());
        Ok(())
    }

    fn get_swap_slot(&self, scope: &WorkspaceScope) -> Result<Option<SwapSlotRecord>, StoreError> {
        self.touch();
        let map = self.swap_slots.lock().map_err(poisoned)?;
        Ok(map.get(scope).cloned())
    }

    fn set_swap_slot(&self, scope: &WorkspaceScope, record: Option<&SwapSlotRecord>) -> Result<(), StoreError> {
        self.touch();
        let mut map = self.swap_slots.lock().map_err(poisoned)?;
        match record {
            Some(r) => map.insert(scope.clone(), r.clone()),
            None => map.remove(scope),
        };
        Ok(())
    }
}
