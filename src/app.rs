//! App Core for SelectionsSaver.
//!
//! Holds what outlives a single command: the state database, the settings
//! and the scope locks. Each command gets a fresh [`SelectionSaver`] wired
//! to the host's editor and prompt for that call.

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::database::connection::Database;
use crate::host::editor::Editor;
use crate::host::prompt::Prompt;
use crate::managers::scope_lock::ScopeLocks;
use crate::managers::state_store::SqliteStateStore;
use crate::saver::SelectionSaver;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::settings::SaverSettings;

pub struct App {
    pub db: Arc<Database>,
    pub settings: SaverSettings,
    locks: Arc<ScopeLocks>,
}

impl App {
    /// Opens the database at `db_path` and loads settings from the platform
    /// config file, falling back to defaults if that file is unreadable.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut engine = SettingsEngine::new(None);
        let settings = engine.load().unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default settings");
            SaverSettings::default()
        });
        Self::with_settings(db_path, settings)
    }

    pub fn with_settings<P: AsRef<Path>>(db_path: P, settings: SaverSettings) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);
        Ok(Self {
            db,
            settings,
            locks: Arc::new(ScopeLocks::new()),
        })
    }

    pub fn saver<E: Editor, P: Prompt>(&self, editor: E, prompt: P) -> SelectionSaver<SqliteStateStore, E, P> {
        SelectionSaver::new(SqliteStateStore::new(self.db.clone()), editor, prompt)
            .with_settings(&self.settings)
            .with_locks(self.locks.clone())
    }
}
