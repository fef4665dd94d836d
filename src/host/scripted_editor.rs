//! Editor driven by its caller: the host supplies the active selection and
//! open roots, and the editor records every selection and scroll applied.
//!
//! Documents come either from an in-memory table or straight from disk.

use std::collections::HashMap;
use std::fs;

use crate::host::editor::{ActiveSelection, DocumentHandle, Editor};
use crate::types::errors::SaverError;
use crate::types::scope::WorkspaceRoot;
use crate::types::selection::SelectionRange;

#[derive(Debug, Clone)]
enum DocumentSource {
    Memory(HashMap<String, String>),
    Disk,
}

/// A selection or scroll the core asked the editor to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Select { path: String, range: SelectionRange },
    RevealTop { path: String, line: u32 },
}

#[derive(Debug, Clone)]
pub struct ScriptedEditor {
    source: DocumentSource,
    active: Option<ActiveSelection>,
    roots: Vec<WorkspaceRoot>,
    actions: Vec<EditorAction>,
}

impl ScriptedEditor {
    /// Editor whose documents are registered with [`with_document`](Self::with_document).
    pub fn in_memory() -> Self {
        Self::with_source(DocumentSource::Memory(HashMap::new()))
    }

    /// Editor that opens documents from the filesystem.
    pub fn on_disk() -> Self {
        Self::with_source(DocumentSource::Disk)
    }

    fn with_source(source: DocumentSource) -> Self {
        Self {
            source,
            active: None,
            roots: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_document(path, text);
        self
    }

    pub fn with_roots(mut self, roots: Vec<WorkspaceRoot>) -> Self {
        self.roots = roots;
        self
    }

    pub fn with_active(mut self, active: ActiveSelection) -> Self {
        self.active = Some(active);
        self
    }

    /// Adds or replaces an in-memory document. Ignored for disk editors.
    pub fn add_document(&mut self, path: impl Into<String>, text: impl Into<String>) {
        if let DocumentSource::Memory(docs) = &mut self.source {
            docs.insert(path.into(), text.into());
        }
    }

    pub fn remove_document(&mut self, path: &str) {
        if let DocumentSource::Memory(docs) = &mut self.source {
            docs.remove(path);
        }
    }

    pub fn set_active(&mut self, active: Option<ActiveSelection>) {
        self.active = active;
    }

    pub fn set_roots(&mut self, roots: Vec<WorkspaceRoot>) {
        self.roots = roots;
    }

    pub fn actions(&self) -> &[EditorAction] {
        &self.actions
    }

    /// The last selection applied, if any.
    pub fn last_selection(&self) -> Option<(&str, SelectionRange)> {
        self.actions.iter().rev().find_map(|a| match a {
            EditorAction::Select { path, range } => Some((path.as_str(), *range)),
            EditorAction::RevealTop { .. } => None,
        })
    }

    pub fn last_top_line(&self) -> Option<u32> {
        self.actions.iter().rev().find_map(|a| match a {
            EditorAction::RevealTop { line, .. } => Some(*line),
            EditorAction::Select { .. } => None,
        })
    }
}

impl Editor for ScriptedEditor {
    fn active_selection(&self) -> Option<ActiveSelection> {
        self.active.clone()
    }

    fn open_document(&mut self, path: &str) -> Result<DocumentHandle, SaverError> {
        let text = match &self.source {
            DocumentSource::Memory(docs) => docs.get(path).cloned().ok_or_else(|| SaverError::FileOpenFailure {
                path: path.to_string(),
                reason: "no such document".to_string(),
            })?,
            DocumentSource::Disk => {
                let bytes = fs::read(path).map_err(|e| SaverError::FileOpenFailure {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;
                // Undecodable bytes still occupy a column each.
                String::from_utf8_lossy(&bytes).into_owned()
            }
        };
        Ok(DocumentHandle::from_text(path, &text))
    }

    fn set_selection(&mut self, doc: &DocumentHandle, range: SelectionRange) {
        let (scroll_top_line, workspace_folder_name) = match &self.active {
            Some(a) if a.file_path == doc.path => (a.scroll_top_line, a.workspace_folder_name.clone()),
            _ => (0, None),
        };
        self.active = Some(ActiveSelection {
            file_path: doc.path.clone(),
            selection: range,
            scroll_top_line,
            workspace_folder_name,
        });
        self.actions.push(EditorAction::Select {
            path: doc.path.clone(),
            range,
        });
    }

    fn reveal_top_line(&mut self, doc: &DocumentHandle, line: u32) {
        if let Some(active) = self.active.as_mut().filter(|a| a.file_path == doc.path) {
            active.scroll_top_line = line;
        }
        self.actions.push(EditorAction::RevealTop {
            path: doc.path.clone(),
            line,
        });
    }

    fn open_roots(&self) -> Vec<WorkspaceRoot> {
        self.roots.clone()
    }
}
