//! Per-scope mutual exclusion for read-modify-write cycles on the store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::types::errors::StoreError;
use crate::types::scope::WorkspaceScope;

/// Hands out one mutex per scope. Two cycles on the same scope never
/// interleave; different scopes proceed independently.
#[derive(Debug, Default)]
pub struct ScopeLocks {
    locks: Mutex<HashMap<WorkspaceScope, Arc<Mutex<()>>>>,
}

impl ScopeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, scope: &WorkspaceScope) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(locks.entry(scope.clone()).or_default().clone())
    }

    /// Runs `f` while holding the scope's lock.
    pub fn with_scope<T, E, F>(&self, scope: &WorkspaceScope, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce() -> Result<T, E>,
    {
        let lock = self.lock_for(scope)?;
        let _guard = lock
            .lock()
            .map_err(|e| StoreError::LockPoisoned(format!("{}: {}", scope, e)))?;
        f()
    }

    /// Number of scopes that have been locked at least once.
    pub fn tracked_scopes(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }
}
