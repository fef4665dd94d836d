//! RPC method handler for the SelectionsSaver JSON-RPC protocol.
//!
//! The editor host sends its open roots and active selection with every
//! request; documents are opened from disk. Restores come back as the
//! selection and top line the host should apply.

use std::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::host::editor::ActiveSelection;
use crate::host::prompt::NameInput;
use crate::host::scripted_editor::ScriptedEditor;
use crate::host::scripted_prompt::ScriptedPrompt;
use crate::services::scope_resolver::resolve_scope;
use crate::types::scope::WorkspaceRoot;

/// Host state sent along with each request.
#[derive(Debug, Default, Deserialize)]
struct HostContext {
    #[serde(default)]
    roots: Vec<WorkspaceRoot>,
    #[serde(default)]
    active: Option<ActiveSelection>,
    #[serde(default)]
    name: Option<String>,
    /// The host's name prompt was dismissed.
    #[serde(default)]
    dismissed: bool,
    #[serde(default)]
    confirm: bool,
}

impl HostContext {
    fn parse(params: &Value) -> Result<Self, String> {
        if params.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(params.clone()).map_err(|e| format!("invalid params: {}", e))
    }

    fn editor(&self) -> ScriptedEditor {
        let mut editor = ScriptedEditor::on_disk().with_roots(self.roots.clone());
        editor.set_active(self.active.clone());
        editor
    }

    fn prompt(&self) -> ScriptedPrompt {
        let mut prompt = ScriptedPrompt::new();
        if self.dismissed {
            prompt.push_name(NameInput::Dismissed);
        } else {
            prompt.push_name(NameInput::Provided(self.name.clone().unwrap_or_default()));
        }
        prompt.push_confirm(self.confirm);
        prompt
    }
}

fn required_id(params: &Value) -> Result<&str, String> {
    params.get("id").and_then(|v| v.as_str()).ok_or_else(|| "missing id".to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatches one JSON-RPC call. Errors come back as display strings.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let ctx = HostContext::parse(params)?;
    let app = app.lock().map_err(|e| e.to_string())?;
    let mut saver = app.saver(ctx.editor(), ctx.prompt());

    match method {
        "ping" => Ok(json!({"pong": true})),
        "scope.resolve" => {
            let scope = resolve_scope(&ctx.roots);
            Ok(json!({"scope": scope.as_ref().map(|s| s.as_str())}))
        }

        // ─── Bookmarks ───
        "bookmark.save" => match saver.save_bookmark(None).map_err(|e| e.to_string())? {
            Some(record) => to_json(&record),
            None => Ok(json!({"cancelled": true})),
        },
        "bookmark.restore" => {
            let id = required_id(params)?;
            let request = saver.restore_bookmark(id).map_err(|e| e.to_string())?;
            to_json(&request)
        }
        "bookmark.delete" => {
            let id = required_id(params)?;
            let removed = saver.delete_bookmark(id).map_err(|e| e.to_string())?;
            Ok(json!({"removed": removed}))
        }
        "bookmark.list" => {
            let records = saver.list_bookmarks().map_err(|e| e.to_string())?;
            to_json(&records)
        }
        "bookmark.clear" => match saver.clear_all_bookmarks().map_err(|e| e.to_string())? {
            Some(cleared) => Ok(json!({"cleared": cleared})),
            None => Ok(json!({"cancelled": true})),
        },

        // ─── Swap slot ───
        "swap.save" => {
            let record = saver.save_to_swap_slot().map_err(|e| e.to_string())?;
            to_json(&record)
        }
        "swap.exchange" => {
            let request = saver.swap_with_swap_slot().map_err(|e| e.to_string())?;
            to_json(&request)
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
