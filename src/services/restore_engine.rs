//! Restore Engine for SelectionsSaver.
//!
//! Turns a stored record into editor calls: open the file, select the range,
//! scroll the anchor line to the top. Nothing visible changes unless the
//! whole restore can proceed.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::host::editor::{DocumentHandle, Editor};
use crate::types::bookmark::{BookmarkRecord, SwapSlotRecord};
use crate::types::errors::SaverError;
use crate::types::selection::{Position, SelectionRange};
use crate::types::settings::OutOfRangePolicy;

/// What was applied to the editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    pub file_path: String,
    pub selection: SelectionRange,
    pub top_line: u32,
    /// True when the stored range had to be moved inside the document.
    pub clamped: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RestoreEngine {
    policy: OutOfRangePolicy,
}

impl RestoreEngine {
    pub fn new(policy: OutOfRangePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OutOfRangePolicy {
        self.policy
    }

    pub fn restore<E: Editor + ?Sized>(&self, editor: &mut E, record: &BookmarkRecord) -> Result<RestoreRequest, SaverError> {
        debug!(bookmark_id = %record.id, file = %record.file_path, "Restoring bookmark");
        self.apply(editor, &record.file_path, record.selection, Some(record.scroll_anchor_line))
    }

    /// Swap records carry no scroll anchor; the selection start goes to the top.
    pub fn restore_swap<E: Editor + ?Sized>(&self, editor: &mut E, record: &SwapSlotRecord) -> Result<RestoreRequest, SaverError> {
        debug!(file = %record.file_path, "Restoring swap slot selection");
        self.apply(editor, &record.file_path, record.selection, None)
    }

    fn apply<E: Editor + ?Sized>(
        &self,
        editor: &mut E,
        path: &str,
        selection: SelectionRange,
        anchor: Option<u32>,
    ) -> Result<RestoreRequest, SaverError> {
        let doc = editor.open_document(path)?;
        let fitted = self.fit(&doc, selection)?;
        let top_line = anchor.unwrap_or(fitted.start.line).min(doc.last_line());

        editor.set_selection(&doc, fitted);
        editor.reveal_top_line(&doc, top_line);

        Ok(RestoreRequest {
            file_path: doc.path,
            selection: fitted,
            top_line,
            clamped: fitted != selection,
        })
    }

    /// Brings `selection` inside `doc` according to the policy.
    pub fn fit(&self, doc: &DocumentHandle, selection: SelectionRange) -> Result<SelectionRange, SaverError> {
        match self.policy {
            OutOfRangePolicy::Clamp => {
                let fitted = SelectionRange::new(doc.clamp(selection.start), doc.clamp(selection.end));
                if fitted != selection {
                    warn!(file = %doc.path, "Stored selection lies outside the document, clamping");
                }
                Ok(fitted)
            }
            OutOfRangePolicy::Reject => {
                for pos in [selection.start, selection.end] {
                    if !doc.contains(pos) {
                        return Err(out_of_range(pos));
                    }
                }
                Ok(selection)
            }
        }
    }
}

fn out_of_range(pos: Position) -> SaverError {
    SaverError::PositionOutOfRange {
        line: pos.line,
        character: pos.character,
    }
}
