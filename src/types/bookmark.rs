use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::selection::SelectionRange;

/// Label shown for records stored without a name.
pub const UNNAMED_LABEL: &str = "Unnamed Bookmark";

/// A persisted marker: file, selection and scroll position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub file_path: String,
    pub selection: SelectionRange,
    pub scroll_anchor_line: u32,
    /// Creation instant in Unix epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub workspace_folder_name: Option<String>,
}

impl BookmarkRecord {
    /// Default name assigned when the user gives none.
    pub fn default_name(id: &str) -> String {
        format!("Bookmark {}", id)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_LABEL)
    }
}

/// The single remembered selection of a scope's swap slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapSlotRecord {
    pub file_path: String,
    pub selection: SelectionRange,
}

/// A bookmark as presented in a picker list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkListEntry {
    pub record: BookmarkRecord,
    pub label: String,
    pub description: String,
    pub detail: String,
    /// Whether the picker should offer a delete button on this entry.
    pub deletable: bool,
}

impl BookmarkListEntry {
    pub fn from_record(record: BookmarkRecord, deletable: bool) -> Self {
        let label = record.display_name().to_string();
        let description = format!(
            "{} (Line {})",
            record.file_path,
            u64::from(record.selection.start.line) + 1
        );
        let detail = format!("Saved: {}", format_timestamp(record.timestamp));
        Self {
            record,
            label,
            description,
            detail,
            deletable,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }
}

/// What the user did with a bookmark picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerChoice {
    Restore(String),
    Delete(String),
    Dismissed,
}

/// Formats epoch milliseconds as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}
