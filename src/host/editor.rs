//! Editor collaborator: where selections come from and where restores go.

use serde::{Deserialize, Serialize};

use crate::types::errors::SaverError;
use crate::types::scope::WorkspaceRoot;
use crate::types::selection::{Position, SelectionRange};

/// The editor's current selection and viewport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSelection {
    pub file_path: String,
    pub selection: SelectionRange,
    /// Topmost visible line.
    #[serde(default)]
    pub scroll_top_line: u32,
    /// Name of the project root containing the file, if any.
    #[serde(default)]
    pub workspace_folder_name: Option<String>,
}

/// A document loaded by the editor, with its current shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    pub path: String,
    /// Character count of every line; never empty.
    pub line_lengths: Vec<u32>,
}

impl DocumentHandle {
    /// Measures `text` the way an editor numbers it: a trailing newline
    /// starts one more, empty, line, and lengths are in UTF-16 code units.
    pub fn from_text(path: impl Into<String>, text: &str) -> Self {
        let line_lengths = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').encode_utf16().count() as u32)
            .collect();
        Self {
            path: path.into(),
            line_lengths,
        }
    }

    pub fn line_count(&self) -> u32 {
        self.line_lengths.len() as u32
    }

    pub fn last_line(&self) -> u32 {
        self.line_count().saturating_sub(1)
    }

    pub fn line_len(&self, line: u32) -> Option<u32> {
        self.line_lengths.get(line as usize).copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        matches!(self.line_len(pos.line), Some(len) if pos.character <= len)
    }

    /// Nearest position inside the document.
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        let len = self.line_len(line).unwrap_or(0);
        Position::new(line, pos.character.min(len))
    }
}

/// Editor operations the core relies on.
pub trait Editor {
    fn active_selection(&self) -> Option<ActiveSelection>;
    /// Loads a document without changing what the user sees.
    fn open_document(&mut self, path: &str) -> Result<DocumentHandle, SaverError>;
    /// Shows the document and makes `range` its selection.
    fn set_selection(&mut self, doc: &DocumentHandle, range: SelectionRange);
    /// Scrolls so `line` is the first visible line.
    fn reveal_top_line(&mut self, doc: &DocumentHandle, line: u32);
    fn open_roots(&self) -> Vec<WorkspaceRoot>;
}
