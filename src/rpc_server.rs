//! SelectionsSaver RPC Server: JSON-RPC over stdin/stdout for editor hosts.
//!
//! Protocol: one JSON object per line.
//! Request:  {"id":1, "method":"bookmark.save", "params":{"roots":[...],"active":{...}}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries only protocol lines.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use serde_json::{json, Value};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use selectionsaver::app::App;
use selectionsaver::platform;
use selectionsaver::rpc_handler::handle_method;
use selectionsaver::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

const LOG_ENV: &str = "SELECTIONSAVER_LOG";

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn database_path(file: &str) -> io::Result<PathBuf> {
    let file = PathBuf::from(file);
    if file.is_absolute() {
        return Ok(file);
    }
    let dir = platform::get_data_dir();
    fs::create_dir_all(&dir)?;
    Ok(dir.join(file))
}

fn send(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() -> ExitCode {
    setup_logging();

    let mut settings_engine = SettingsEngine::new(None);
    let settings = match settings_engine.load() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, path = settings_engine.get_config_path(), "Failed to load settings");
            return ExitCode::FAILURE;
        }
    };

    let db_path = match database_path(&settings.storage.database_file) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Failed to prepare data directory");
            return ExitCode::FAILURE;
        }
    };

    let app = match App::with_settings(&db_path, settings) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!(error = %e, path = %db_path.display(), "Failed to open state database");
            return ExitCode::FAILURE;
        }
    };
    info!(path = %db_path.display(), "SelectionsSaver RPC ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if send(&mut out, &json!({"event":"ready","version":env!("CARGO_PKG_VERSION")})).is_err() {
        return ExitCode::FAILURE;
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(Value::Null);
                match handle_method(&app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => {
                        info!(method, error = %err, "Request failed");
                        json!({"id": id, "error": err})
                    }
                }
            }
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
        };

        if send(&mut out, &response).is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
