//! Prompt that answers from queues and records every notification.

use std::collections::VecDeque;

use crate::host::prompt::{NameInput, Prompt};
use crate::types::bookmark::{BookmarkListEntry, PickerChoice};

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Unanswered questions fall back to: dismissed name, declined confirmation,
/// dismissed picker.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    names: VecDeque<NameInput>,
    confirmations: VecDeque<bool>,
    picks: VecDeque<PickerChoice>,
    notices: Vec<Notice>,
    last_entries: Vec<BookmarkListEntry>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_name(mut self, input: NameInput) -> Self {
        self.names.push_back(input);
        self
    }

    pub fn answer_confirm(mut self, yes: bool) -> Self {
        self.confirmations.push_back(yes);
        self
    }

    pub fn answer_pick(mut self, choice: PickerChoice) -> Self {
        self.picks.push_back(choice);
        self
    }

    pub fn push_name(&mut self, input: NameInput) {
        self.names.push_back(input);
    }

    pub fn push_confirm(&mut self, yes: bool) {
        self.confirmations.push_back(yes);
    }

    pub fn push_pick(&mut self, choice: PickerChoice) {
        self.picks.push_back(choice);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn errors(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                Notice::Error(m) => Some(m.as_str()),
                Notice::Info(_) => None,
            })
            .collect()
    }

    /// Entries offered by the most recent picker.
    pub fn last_entries(&self) -> &[BookmarkListEntry] {
        &self.last_entries
    }
}

impl Prompt for ScriptedPrompt {
    fn ask_name(&mut self, _prompt: &str, _placeholder: &str) -> NameInput {
        self.names.pop_front().unwrap_or(NameInput::Dismissed)
    }

    fn confirm(&mut self, _message: &str) -> bool {
        self.confirmations.pop_front().unwrap_or(false)
    }

    fn pick_bookmark(&mut self, entries: &[BookmarkListEntry]) -> PickerChoice {
        self.last_entries = entries.to_vec();
        self.picks.pop_front().unwrap_or(PickerChoice::Dismissed)
    }

    fn show_info(&mut self, message: &str) {
        self.notices.push(Notice::Info(message.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.notices.push(Notice::Error(message.to_string()));
    }
}
