//! Command layer: runs one logical command against a [`SelectionSaver`] and
//! turns the result into user notifications. No error escapes `run_command`.

use tracing::{info, warn};

use crate::host::editor::Editor;
use crate::host::prompt::Prompt;
use crate::managers::state_store::StateStore;
use crate::saver::{PickOutcome, SelectionSaver};
use crate::services::restore_engine::RestoreRequest;
use crate::types::bookmark::{BookmarkRecord, SwapSlotRecord};
use crate::types::errors::SaverError;

/// Commands a host can bind to menu entries or key chords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SaveBookmark { name: Option<String> },
    RestoreBookmark { id: String },
    DeleteBookmark { id: String },
    ListBookmarks,
    /// Present the picker; the user restores or deletes an entry.
    PickBookmark,
    /// Enumerate bookmarks in an info message.
    ShowBookmarks,
    ClearAllBookmarks,
    SaveToSwapSlot,
    SwapWithSwapSlot,
}

impl Command {
    /// Stable identifier for host command registration.
    pub fn id(&self) -> &'static str {
        match self {
            Command::SaveBookmark { .. } => "selectionssaver.saveBookmark",
            Command::RestoreBookmark { .. } => "selectionssaver.restoreBookmarkById",
            Command::DeleteBookmark { .. } => "selectionssaver.deleteBookmark",
            Command::ListBookmarks => "selectionssaver.getBookmarks",
            Command::PickBookmark => "selectionssaver.restoreBookmark",
            Command::ShowBookmarks => "selectionssaver.listBookmarks",
            Command::ClearAllBookmarks => "selectionssaver.clearAllBookmarks",
            Command::SaveToSwapSlot => "selectionssaver.saveToSwapSlot",
            Command::SwapWithSwapSlot => "selectionssaver.swapWithSwapSlot",
        }
    }
}

#[derive(Debug)]
pub enum CommandOutcome {
    Saved(BookmarkRecord),
    Restored(RestoreRequest),
    Deleted { id: String, removed: bool },
    Listed(Vec<BookmarkRecord>),
    Cleared(usize),
    SwapSaved(SwapSlotRecord),
    Swapped(RestoreRequest),
    /// The user backed out; nothing changed.
    Cancelled,
    /// The error was already shown to the user.
    Failed(SaverError),
}

impl CommandOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CommandOutcome::Failed(_))
    }
}

pub fn run_command<S, E, P>(saver: &mut SelectionSaver<S, E, P>, command: Command) -> CommandOutcome
where
    S: StateStore,
    E: Editor,
    P: Prompt,
{
    let name = command.id();
    match execute(saver, command) {
        Ok((outcome, message)) => {
            if let Some(message) = message {
                saver.prompt_mut().show_info(&message);
            }
            info!(command = name, "Command finished");
            outcome
        }
        Err((err, context)) => {
            let message = match context {
                Some(context) => format!("{}: {}", context, err),
                None => err.to_string(),
            };
            warn!(command = name, error = %err, "Command failed");
            saver.prompt_mut().show_error(&message);
            CommandOutcome::Failed(err)
        }
    }
}

type Executed = Result<(CommandOutcome, Option<String>), (SaverError, Option<&'static str>)>;

fn plain<T>(result: Result<T, SaverError>) -> Result<T, (SaverError, Option<&'static str>)> {
    result.map_err(|e| (e, None))
}

fn restoring<T>(result: Result<T, SaverError>) -> Result<T, (SaverError, Option<&'static str>)> {
    result.map_err(|e| (e, Some("Failed to restore bookmark")))
}

fn execute<S, E, P>(saver: &mut SelectionSaver<S, E, P>, command: Command) -> Executed
where
    S: StateStore,
    E: Editor,
    P: Prompt,
{
    match command {
        Command::SaveBookmark { name } => match plain(saver.save_bookmark(name))? {
            Some(record) => {
                let message = format!("Bookmark \"{}\" saved!", record.display_name());
                Ok((CommandOutcome::Saved(record), Some(message)))
            }
            None => Ok((CommandOutcome::Cancelled, None)),
        },
        Command::RestoreBookmark { id } => {
            let request = restoring(saver.restore_bookmark(&id))?;
            Ok((CommandOutcome::Restored(request), None))
        }
        Command::DeleteBookmark { id } => {
            let removed = plain(saver.delete_bookmark(&id))?;
            let message = removed.then(|| "Bookmark deleted".to_string());
            Ok((CommandOutcome::Deleted { id, removed }, message))
        }
        Command::ListBookmarks => {
            let records = plain(saver.list_bookmarks())?;
            Ok((CommandOutcome::Listed(records), None))
        }
        Command::ShowBookmarks => {
            let records = plain(saver.list_bookmarks())?;
            let message = describe_bookmarks(&records);
            Ok((CommandOutcome::Listed(records), Some(message)))
        }
        Command::PickBookmark => match restoring(saver.pick_bookmark())? {
            PickOutcome::NothingToPick => Ok((CommandOutcome::Listed(Vec::new()), Some(NO_BOOKMARKS.to_string()))),
            PickOutcome::Dismissed => Ok((CommandOutcome::Cancelled, None)),
            PickOutcome::Deleted { id, removed } => {
                let message = removed.then(|| "Bookmark deleted".to_string());
                Ok((CommandOutcome::Deleted { id, removed }, message))
            }
            PickOutcome::Restored { name, request } => {
                let message = format!("Restored bookmark: {}", name);
                Ok((CommandOutcome::Restored(request), Some(message)))
            }
        },
        Command::ClearAllBookmarks => match plain(saver.clear_all_bookmarks())? {
            Some(dropped) => Ok((CommandOutcome::Cleared(dropped), Some("All bookmarks cleared!".to_string()))),
            None => Ok((CommandOutcome::Cancelled, None)),
        },
        Command::SaveToSwapSlot => {
            let record = plain(saver.save_to_swap_slot())?;
            Ok((CommandOutcome::SwapSaved(record), Some("Selection saved to swap slot".to_string())))
        }
        Command::SwapWithSwapSlot => {
            let request = plain(saver.swap_with_swap_slot())?;
            Ok((CommandOutcome::Swapped(request), None))
        }
    }
}

const NO_BOOKMARKS: &str = "No bookmarks saved yet";

/// One bullet line per bookmark, or a short notice when there are none.
pub fn describe_bookmarks(records: &[BookmarkRecord]) -> String {
    if records.is_empty() {
        return NO_BOOKMARKS.to_string();
    }
    let lines: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "• {} - {} (Line {})",
                r.display_name(),
                r.file_path,
                u64::from(r.selection.start.line) + 1
            )
        })
        .collect();
    format!("Saved Bookmarks:\n{}", lines.join("\n"))
}
