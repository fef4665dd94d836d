//! Prompt and notification collaborator.

use crate::types::bookmark::{BookmarkListEntry, PickerChoice};

/// Answer to a free-text name request. A dismissed prompt is distinct from
/// an empty answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameInput {
    Provided(String),
    Dismissed,
}

pub trait Prompt {
    fn ask_name(&mut self, prompt: &str, placeholder: &str) -> NameInput;
    fn confirm(&mut self, message: &str) -> bool;
    fn pick_bookmark(&mut self, entries: &[BookmarkListEntry]) -> PickerChoice;
    fn show_info(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
}
