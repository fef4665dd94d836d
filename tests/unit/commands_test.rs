//! Unit tests for the command layer: outcomes and the notifications shown.

use selectionsaver::commands::{describe_bookmarks, run_command, Command, CommandOutcome};
use selectionsaver::host::editor::ActiveSelection;
use selectionsaver::host::prompt::NameInput;
use selectionsaver::host::scripted_editor::ScriptedEditor;
use selectionsaver::host::scripted_prompt::{Notice, ScriptedPrompt};
use selectionsaver::managers::state_store::MemoryStateStore;
use selectionsaver::saver::SelectionSaver;
use selectionsaver::types::bookmark::{BookmarkRecord, PickerChoice};
use selectionsaver::types::errors::SaverError;
use selectionsaver::types::scope::WorkspaceRoot;
use selectionsaver::types::selection::SelectionRange;

type TestSaver<'a> = SelectionSaver<&'a MemoryStateStore, ScriptedEditor, ScriptedPrompt>;

fn saver(store: &MemoryStateStore) -> TestSaver<'_> {
    let editor = ScriptedEditor::in_memory()
        .with_roots(vec![WorkspaceRoot::new("/w/proj", "proj")])
        .with_document("src/lib.rs", "pub mod a;\npub mod b;\n\nfn main() {}\n")
        .with_active(ActiveSelection {
            file_path: "src/lib.rs".to_string(),
            selection: SelectionRange::from_pairs((1, 0), (1, 9)),
            scroll_top_line: 0,
            workspace_folder_name: Some("proj".to_string()),
        });
    SelectionSaver::new(store, editor, ScriptedPrompt::new())
}

fn save_named(saver: &mut TestSaver<'_>, name: &str) -> BookmarkRecord {
    match run_command(saver, Command::SaveBookmark { name: Some(name.to_string()) }) {
        CommandOutcome::Saved(record) => record,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_command_ids() {
    assert_eq!(Command::SaveBookmark { name: None }.id(), "selectionssaver.saveBookmark");
    assert_eq!(Command::PickBookmark.id(), "selectionssaver.restoreBookmark");
    assert_eq!(Command::ShowBookmarks.id(), "selectionssaver.listBookmarks");
    assert_eq!(Command::SwapWithSwapSlot.id(), "selectionssaver.swapWithSwapSlot");
}

#[test]
fn test_save_shows_confirmation() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    save_named(&mut saver, "entry point");
    assert_eq!(
        saver.prompt().notices(),
        &[Notice::Info("Bookmark \"entry point\" saved!".to_string())]
    );
}

#[test]
fn test_dismissed_save_is_silent() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    saver.prompt_mut().push_name(NameInput::Dismissed);

    let outcome = run_command(&mut saver, Command::SaveBookmark { name: None });
    assert!(matches!(outcome, CommandOutcome::Cancelled));
    assert!(saver.prompt().notices().is_empty());
}

#[test]
fn test_no_workspace_is_reported_not_raised() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    saver.editor_mut().set_roots(Vec::new());

    let outcome = run_command(&mut saver, Command::ListBookmarks);
    assert!(matches!(outcome, CommandOutcome::Failed(SaverError::NoWorkspace)));
    assert_eq!(saver.prompt().errors(), vec!["No workspace folder is open"]);
}

#[test]
fn test_restore_failure_is_prefixed() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    let record = save_named(&mut saver, "gone");
    saver.editor_mut().remove_document("src/lib.rs");

    let outcome = run_command(&mut saver, Command::RestoreBookmark { id: record.id });
    assert!(outcome.is_failure());
    let errors = saver.prompt().errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Failed to restore bookmark: Failed to open src/lib.rs"));
}

#[test]
fn test_restore_applies_selection() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    let record = save_named(&mut saver, "b");

    match run_command(&mut saver, Command::RestoreBookmark { id: record.id }) {
        CommandOutcome::Restored(request) => assert_eq!(request.selection, record.selection),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(
        saver.editor().last_selection(),
        Some(("src/lib.rs", SelectionRange::from_pairs((1, 0), (1, 9))))
    );
}

#[test]
fn test_pick_with_no_bookmarks_shows_notice() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    run_command(&mut saver, Command::PickBookmark);
    assert_eq!(
        saver.prompt().notices(),
        &[Notice::Info("No bookmarks saved yet".to_string())]
    );
}

#[test]
fn test_pick_restore_announces_name() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    let record = save_named(&mut saver, "modules");
    saver.prompt_mut().push_pick(PickerChoice::Restore(record.id));

    let outcome = run_command(&mut saver, Command::PickBookmark);
    assert!(matches!(outcome, CommandOutcome::Restored(_)));
    assert_eq!(
        saver.prompt().notices().last(),
        Some(&Notice::Info("Restored bookmark: modules".to_string()))
    );
}

#[test]
fn test_delete_unknown_id_is_quiet() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    let outcome = run_command(&mut saver, Command::DeleteBookmark { id: "nope".to_string() });
    assert!(matches!(outcome, CommandOutcome::Deleted { removed: false, .. }));
    assert!(saver.prompt().notices().is_empty());
}

#[test]
fn test_clear_needs_confirmation() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    save_named(&mut saver, "one");

    assert!(matches!(run_command(&mut saver, Command::ClearAllBookmarks), CommandOutcome::Cancelled));
    saver.prompt_mut().push_confirm(true);
    assert!(matches!(run_command(&mut saver, Command::ClearAllBookmarks), CommandOutcome::Cleared(1)));
    assert_eq!(
        saver.prompt().notices().last(),
        Some(&Notice::Info("All bookmarks cleared!".to_string()))
    );
}

#[test]
fn test_swap_without_save_reports_empty_slot() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    let outcome = run_command(&mut saver, Command::SwapWithSwapSlot);
    assert!(matches!(outcome, CommandOutcome::Failed(SaverError::EmptySwapSlot)));

    assert!(matches!(run_command(&mut saver, Command::SaveToSwapSlot), CommandOutcome::SwapSaved(_)));
    assert!(matches!(run_command(&mut saver, Command::SwapWithSwapSlot), CommandOutcome::Swapped(_)));
}

#[test]
fn test_show_bookmarks_message() {
    let store = MemoryStateStore::new();
    let mut saver = saver(&store);
    save_named(&mut saver, "first");
    run_command(&mut saver, Command::ShowBookmarks);
    assert_eq!(
        saver.prompt().notices().last(),
        Some(&Notice::Info("Saved Bookmarks:\n• first - src/lib.rs (Line 2)".to_string()))
    );
}

#[test]
fn test_describe_empty_list() {
    assert_eq!(describe_bookmarks(&[]), "No bookmarks saved yet");
}
