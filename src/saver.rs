//! The bookmark and swap-slot core.
//!
//! `SelectionSaver` owns the three collaborators (state store, editor, prompt)
//! and exposes one method per logical command. Every scoped command resolves
//! the scope from the editor's open roots first and refuses with
//! `NoWorkspace` before touching storage when there is none.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::host::editor::{ActiveSelection, Editor};
use crate::host::prompt::{NameInput, Prompt};
use crate::managers::marker_store::{MarkerStore, MarkerStoreTrait};
use crate::managers::scope_lock::ScopeLocks;
use crate::managers::state_store::StateStore;
use crate::managers::swap_slot::{SwapSlot, SwapSlotTrait};
use crate::services::restore_engine::{RestoreEngine, RestoreRequest};
use crate::services::scope_resolver::resolve_scope;
use crate::types::bookmark::{BookmarkListEntry, BookmarkRecord, PickerChoice, SwapSlotRecord};
use crate::types::errors::SaverError;
use crate::types::scope::WorkspaceScope;
use crate::types::settings::SaverSettings;

const NAME_PROMPT: &str = "Enter a name for this bookmark (optional)";
const NAME_PLACEHOLDER: &str = "Bookmark name";
const CLEAR_PROMPT: &str = "Are you sure you want to delete all bookmarks?";

/// Mints bookmark ids from the wall clock in milliseconds, strictly
/// increasing even when the clock stalls or steps back.
#[derive(Debug, Default)]
pub struct IdClock {
    last: AtomicI64,
}

impl IdClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_tick(&self) -> i64 {
        self.next_tick_at(Utc::now().timestamp_millis())
    }

    fn next_tick_at(&self, now: i64) -> i64 {
        let prev = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(now.max(prev + 1)))
        {
            Ok(p) | Err(p) => p,
        };
        now.max(prev + 1)
    }

    /// Guarantees later ticks are greater than `tick`.
    pub fn observe(&self, tick: i64) {
        self.last.fetch_max(tick, Ordering::SeqCst);
    }
}

/// Result of presenting the bookmark picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    NothingToPick,
    Dismissed,
    Restored { name: String, request: RestoreRequest },
    Deleted { id: String, removed: bool },
}

pub struct SelectionSaver<S: StateStore, E: Editor, P: Prompt> {
    store: S,
    editor: E,
    prompt: P,
    locks: Arc<ScopeLocks>,
    engine: RestoreEngine,
    confirm_clear: bool,
    ids: IdClock,
}

impl<S: StateStore, E: Editor, P: Prompt> SelectionSaver<S, E, P> {
    pub fn new(store: S, editor: E, prompt: P) -> Self {
        let settings = SaverSettings::default();
        Self {
            store,
            editor,
            prompt,
            locks: Arc::new(ScopeLocks::new()),
            engine: RestoreEngine::new(settings.restore.out_of_range),
            confirm_clear: settings.commands.confirm_clear,
            ids: IdClock::new(),
        }
    }

    pub fn with_settings(mut self, settings: &SaverSettings) -> Self {
        self.engine = RestoreEngine::new(settings.restore.out_of_range);
        self.confirm_clear = settings.commands.confirm_clear;
        self
    }

    /// Shares scope locks with other instances over the same store.
    pub fn with_locks(mut self, locks: Arc<ScopeLocks>) -> Self {
        self.locks = locks;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    /// Resolves the scope for the roots open right now and logs the binding.
    pub fn init(&self) -> Option<WorkspaceScope> {
        let scope = resolve_scope(&self.editor.open_roots());
        match &scope {
            Some(scope) => info!(scope = %scope, "Bound to workspace scope"),
            None => info!("No workspace open; scoped commands are disabled"),
        }
        scope
    }

    pub fn current_scope(&self) -> Result<WorkspaceScope, SaverError> {
        resolve_scope(&self.editor.open_roots()).ok_or(SaverError::NoWorkspace)
    }

    fn active(&self) -> Result<ActiveSelection, SaverError> {
        self.editor.active_selection().ok_or(SaverError::NoActiveEditor)
    }

    fn markers(&self) -> MarkerStore<'_, S> {
        MarkerStore::new(&self.store, &self.locks)
    }

    fn swap_slot(&self) -> SwapSlot<'_, S> {
        SwapSlot::new(&self.store, &self.locks)
    }

    /// Saves the active selection. With no `name`, asks for one; a dismissed
    /// prompt cancels and returns `Ok(None)`. Blank names get the default.
    pub fn save_bookmark(&mut self, name: Option<String>) -> Result<Option<BookmarkRecord>, SaverError> {
        let scope = self.current_scope()?;
        let active = self.active()?;

        let name = match name {
            Some(name) => name,
            None => match self.prompt.ask_name(NAME_PROMPT, NAME_PLACEHOLDER) {
                NameInput::Provided(name) => name,
                NameInput::Dismissed => {
                    debug!(scope = %scope, "Bookmark naming dismissed");
                    return Ok(None);
                }
            },
        };

        let ids = &self.ids;
        // Ids are minted under the scope lock.
        let record = self.markers().add_with(&scope, |existing| {
            for r in existing {
                if let Ok(tick) = r.id.parse::<i64>() {
                    ids.observe(tick);
                }
            }
            let id = ids.next_tick().to_string();
            let name = if name.trim().is_empty() {
                BookmarkRecord::default_name(&id)
            } else {
                name
            };
            BookmarkRecord {
                id,
                name: Some(name),
                file_path: active.file_path,
                selection: active.selection,
                scroll_anchor_line: active.scroll_top_line,
                timestamp: Utc::now().timestamp_millis(),
                workspace_folder_name: active.workspace_folder_name,
            }
        })?;
        info!(scope = %scope, bookmark_id = %record.id, name = record.display_name(), "Bookmark saved");
        Ok(Some(record))
    }

    pub fn restore_bookmark(&mut self, id: &str) -> Result<RestoreRequest, SaverError> {
        let scope = self.current_scope()?;
        let record = self
            .markers()
            .find(&scope, id)?
            .ok_or_else(|| SaverError::BookmarkNotFound(id.to_string()))?;
        let request = self.engine.restore(&mut self.editor, &record)?;
        info!(scope = %scope, bookmark_id = %id, clamped = request.clamped, "Bookmark restored");
        Ok(request)
    }

    /// Returns whether a record was removed; absent ids are not an error.
    pub fn delete_bookmark(&mut self, id: &str) -> Result<bool, SaverError> {
        let scope = self.current_scope()?;
        Ok(self.markers().remove_by_id(&scope, id)?)
    }

    pub fn list_bookmarks(&self) -> Result<Vec<BookmarkRecord>, SaverError> {
        let scope = self.current_scope()?;
        Ok(self.markers().list(&scope)?)
    }

    /// Bookmarks shaped for a picker, each offering a delete button.
    pub fn list_entries(&self) -> Result<Vec<BookmarkListEntry>, SaverError> {
        Ok(self
            .list_bookmarks()?
            .into_iter()
            .map(|record| BookmarkListEntry::from_record(record, true))
            .collect())
    }

    /// Drops every bookmark in scope. Returns `Ok(None)` when the user
    /// declines the confirmation.
    pub fn clear_all_bookmarks(&mut self) -> Result<Option<usize>, SaverError> {
        let scope = self.current_scope()?;
        if self.confirm_clear && !self.prompt.confirm(CLEAR_PROMPT) {
            debug!(scope = %scope, "Clear declined");
            return Ok(None);
        }
        let dropped = self.markers().clear(&scope)?;
        info!(scope = %scope, dropped, "All bookmarks cleared");
        Ok(Some(dropped))
    }

    /// Shows the picker, then restores or deletes the chosen entry.
    pub fn pick_bookmark(&mut self) -> Result<PickOutcome, SaverError> {
        let entries = self.list_entries()?;
        if entries.is_empty() {
            return Ok(PickOutcome::NothingToPick);
        }

        match self.prompt.pick_bookmark(&entries) {
            PickerChoice::Dismissed => Ok(PickOutcome::Dismissed),
            PickerChoice::Delete(id) => {
                let removed = self.delete_bookmark(&id)?;
                Ok(PickOutcome::Deleted { id, removed })
            }
            PickerChoice::Restore(id) => {
                let name = entries
                    .iter()
                    .find(|e| e.id() == id)
                    .map(|e| e.label.clone())
                    .unwrap_or_else(|| id.clone());
                let request = self.restore_bookmark(&id)?;
                Ok(PickOutcome::Restored { name, request })
            }
        }
    }

    pub fn save_to_swap_slot(&mut self) -> Result<SwapSlotRecord, SaverError> {
        let scope = self.current_scope()?;
        let active = self.active()?;
        let record = SwapSlotRecord {
            file_path: active.file_path,
            selection: active.selection,
        };
        self.swap_slot().save(&scope, &record)?;
        info!(scope = %scope, file = %record.file_path, "Selection saved to swap slot");
        Ok(record)
    }

    /// Stores the active selection in the slot and jumps to what it held.
    /// An empty slot is left empty and reported as `EmptySwapSlot`. If the
    /// previous selection cannot be restored, the slot gets it back and the
    /// restore error is returned; a failed put-back is logged.
    pub fn swap_with_swap_slot(&mut self) -> Result<RestoreRequest, SaverError> {
        let scope = self.current_scope()?;
        let active = self.active()?;
        let current = SwapSlotRecord {
            file_path: active.file_path,
            selection: active.selection,
        };

        let previous = self
            .swap_slot()
            .swap(&scope, &current)?
            .ok_or(SaverError::EmptySwapSlot)?;

        match self.engine.restore_swap(&mut self.editor, &previous) {
            Ok(request) => {
                info!(scope = %scope, file = %request.file_path, "Swapped with swap slot");
                Ok(request)
            }
            Err(err) => {
                if let Err(rollback) = self.swap_slot().save(&scope, &previous) {
                    error!(
                        scope = %scope,
                        restore_error = %err,
                        error = %rollback,
                        "Could not put previous selection back into swap slot"
                    );
                }
                Err(err)
            }
        }
    }
}
