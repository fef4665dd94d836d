use thiserror::Error;

// === StoreError ===

/// Errors raised by a persistent state store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database rejected a statement.
    #[error("State store database error: {0}")]
    Database(String),
    /// A stored value could not be encoded or decoded.
    #[error("State store serialization error: {0}")]
    Serialization(String),
    /// A scope lock was poisoned by a panicking holder.
    #[error("Scope lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// === SaverError ===

/// Failures reported by the bookmark and swap-slot core.
#[derive(Debug, Error)]
pub enum SaverError {
    /// No document or selection is available to save from.
    #[error("No active editor found")]
    NoActiveEditor,
    /// No project root is open, so no scope can be resolved.
    #[error("No workspace folder is open")]
    NoWorkspace,
    /// The target document could not be opened.
    #[error("Failed to open {path}: {reason}")]
    FileOpenFailure { path: String, reason: String },
    /// Swap was requested before anything was saved to the slot.
    #[error("Swap slot is empty; save a selection to the swap slot first")]
    EmptySwapSlot,
    /// A stored position lies outside the document as it is now.
    #[error("Position {line}:{character} is outside the document")]
    PositionOutOfRange { line: u32, character: u32 },
    /// No bookmark with the given ID exists in the current scope.
    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// === SettingsError ===

/// Errors related to loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings IO error: {0}")]
    Io(String),
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
