//! Unit tests for the RPC handler, driving every method through the same
//! path the `selectionsaver-rpc` binary uses, over a temp SQLite database
//! and real files on disk.

use std::fs;
use std::sync::Mutex;

use serde_json::{json, Value};
use tempfile::TempDir;

use selectionsaver::app::App;
use selectionsaver::rpc_handler::handle_method;
use selectionsaver::types::settings::SaverSettings;

struct Fixture {
    app: Mutex<App>,
    tmp: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let app = App::with_settings(tmp.path().join("test.db"), SaverSettings::default())
            .expect("Failed to init App");
        Self {
            app: Mutex::new(app),
            tmp,
        }
    }

    /// Writes `lines` lines of text and returns the absolute path.
    fn file(&self, name: &str, lines: usize) -> String {
        let path = self.tmp.path().join(name);
        let text: Vec<String> = (0..lines).map(|i| format!("line number {}", i)).collect();
        fs::write(&path, text.join("\n")).unwrap();
        path.to_string_lossy().to_string()
    }

    fn call(&self, method: &str, params: Value) -> Result<Value, String> {
        handle_method(&self.app, method, &params)
    }
}

fn host(file: &str, line: u32, extra: Value) -> Value {
    let mut params = json!({
        "roots": [{"path": "/w/proj", "name": "proj"}],
        "active": {
            "filePath": file,
            "selection": {
                "start": {"line": line, "character": 0},
                "end": {"line": line, "character": 4}
            },
            "scrollTopLine": line.saturating_sub(2),
            "workspaceFolderName": "proj"
        }
    });
    if let (Some(target), Some(extra)) = (params.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }
    params
}

// ─── Basics ───

#[test]
fn test_ping() {
    let fx = Fixture::new();
    assert_eq!(fx.call("ping", json!({})).unwrap(), json!({"pong": true}));
}

#[test]
fn test_unknown_method_returns_error() {
    let fx = Fixture::new();
    let err = fx.call("nonexistent.method", json!({})).unwrap_err();
    assert!(err.contains("unknown method"));
}

#[test]
fn test_scope_resolve() {
    let fx = Fixture::new();
    let res = fx
        .call("scope.resolve", json!({"roots": [
            {"path": "/w/web", "name": "web"},
            {"path": "/w/api", "name": "api"}
        ]}))
        .unwrap();
    assert_eq!(res, json!({"scope": "api | web"}));

    let none = fx.call("scope.resolve", Value::Null).unwrap();
    assert_eq!(none, json!({"scope": null}));
}

// ─── Bookmarks ───

#[test]
fn test_bookmark_save_list_restore() {
    let fx = Fixture::new();
    let file = fx.file("main.rs", 20);

    let saved = fx.call("bookmark.save", host(&file, 12, json!({"name": "hot loop"}))).unwrap();
    assert_eq!(saved["name"], "hot loop");
    assert_eq!(saved["scrollAnchorLine"], 10);
    let id = saved["id"].as_str().unwrap().to_string();

    let list = fx.call("bookmark.list", host(&file, 0, json!({}))).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let restored = fx.call("bookmark.restore", host(&file, 0, json!({"id": id}))).unwrap();
    assert_eq!(restored["filePath"], file.as_str());
    assert_eq!(restored["topLine"], 10);
    assert_eq!(restored["selection"]["start"]["line"], 12);
    assert_eq!(restored["clamped"], false);
}

#[test]
fn test_bookmarks_survive_app_restart() {
    let fx = Fixture::new();
    let file = fx.file("a.txt", 5);
    fx.call("bookmark.save", host(&file, 1, json!({"name": "kept"}))).unwrap();

    let reopened = App::with_settings(fx.tmp.path().join("test.db"), SaverSettings::default()).unwrap();
    let reopened = Mutex::new(reopened);
    let list = handle_method(&reopened, "bookmark.list", &host(&file, 0, json!({}))).unwrap();
    assert_eq!(list[0]["name"], "kept");
}

#[test]
fn test_restore_after_file_shrinks_is_clamped() {
    let fx = Fixture::new();
    let file = fx.file("shrink.txt", 30);
    let saved = fx.call("bookmark.save", host(&file, 25, json!({"name": "deep"}))).unwrap();
    fs::write(&file, "short\nfile").unwrap();

    let restored = fx
        .call("bookmark.restore", host(&file, 0, json!({"id": saved["id"]})))
        .unwrap();
    assert_eq!(restored["clamped"], true);
    assert_eq!(restored["selection"]["start"]["line"], 1);
    assert_eq!(restored["topLine"], 1);
}

#[test]
fn test_restore_missing_file_errors() {
    let fx = Fixture::new();
    let file = fx.file("temp.txt", 3);
    let saved = fx.call("bookmark.save", host(&file, 1, json!({"name": "t"}))).unwrap();
    fs::remove_file(&file).unwrap();

    let err = fx
        .call("bookmark.restore", host(&file, 0, json!({"id": saved["id"]})))
        .unwrap_err();
    assert!(err.starts_with("Failed to open"));
}

#[test]
fn test_dismissed_save_is_cancelled() {
    let fx = Fixture::new();
    let file = fx.file("a.txt", 3);
    let res = fx.call("bookmark.save", host(&file, 0, json!({"dismissed": true}))).unwrap();
    assert_eq!(res, json!({"cancelled": true}));
    let list = fx.call("bookmark.list", host(&file, 0, json!({}))).unwrap();
    assert_eq!(list, json!([]));
}

#[test]
fn test_save_without_roots_refused() {
    let fx = Fixture::new();
    let err = fx.call("bookmark.save", json!({"name": "x"})).unwrap_err();
    assert_eq!(err, "No workspace folder is open");
}

#[test]
fn test_restore_requires_id() {
    let fx = Fixture::new();
    let file = fx.file("a.txt", 3);
    let err = fx.call("bookmark.restore", host(&file, 0, json!({}))).unwrap_err();
    assert_eq!(err, "missing id");
}

#[test]
fn test_delete_and_clear() {
    let fx = Fixture::new();
    let file = fx.file("a.txt", 5);
    let first = fx.call("bookmark.save", host(&file, 0, json!({"name": "one"}))).unwrap();
    fx.call("bookmark.save", host(&file, 1, json!({"name": "two"}))).unwrap();
    fx.call("bookmark.save", host(&file, 2, json!({"name": "three"}))).unwrap();

    let res = fx.call("bookmark.delete", host(&file, 0, json!({"id": first["id"]}))).unwrap();
    assert_eq!(res, json!({"removed": true}));
    let res = fx.call("bookmark.delete", host(&file, 0, json!({"id": first["id"]}))).unwrap();
    assert_eq!(res, json!({"removed": false}));

    let declined = fx.call("bookmark.clear", host(&file, 0, json!({}))).unwrap();
    assert_eq!(declined, json!({"cancelled": true}));
    let cleared = fx.call("bookmark.clear", host(&file, 0, json!({"confirm": true}))).unwrap();
    assert_eq!(cleared, json!({"cleared": 2}));
}

// ─── Swap slot ───

#[test]
fn test_swap_flow() {
    let fx = Fixture::new();
    let a = fx.file("a.txt", 10);
    let b = fx.file("b.txt", 10);

    let err = fx.call("swap.exchange", host(&a, 3, json!({}))).unwrap_err();
    assert_eq!(err, "Swap slot is empty; save a selection to the swap slot first");

    let saved = fx.call("swap.save", host(&a, 3, json!({}))).unwrap();
    assert_eq!(saved["filePath"], a.as_str());

    let jumped = fx.call("swap.exchange", host(&b, 7, json!({}))).unwrap();
    assert_eq!(jumped["filePath"], a.as_str());
    assert_eq!(jumped["topLine"], 3);

    let back = fx.call("swap.exchange", host(&a, 3, json!({}))).unwrap();
    assert_eq!(back["filePath"], b.as_str());
    assert_eq!(back["selection"]["start"]["line"], 7);
}
