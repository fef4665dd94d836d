//! Unit tests for the SettingsEngine public API against a temp config file.

use selectionsaver::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use selectionsaver::types::errors::SettingsError;
use selectionsaver::types::settings::{OutOfRangePolicy, SaverSettings};
use serde_json::json;
use tempfile::TempDir;

fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir.path().join("settings.json").to_string_lossy().to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();
    assert_eq!(settings, SaverSettings::default());
    assert_eq!(settings.restore.out_of_range, OutOfRangePolicy::Clamp);
    assert!(settings.commands.confirm_clear);
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();
    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine.set_value("restore.out_of_range", json!("reject")).unwrap();
    }

    let mut fresh = engine_in_temp(&dir);
    let settings = fresh.load().unwrap();
    assert_eq!(settings.restore.out_of_range, OutOfRangePolicy::Reject);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{"commands":{"confirm_clear":false}}"#).unwrap();

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert!(!settings.commands.confirm_clear);
    assert_eq!(settings.storage.database_file, "selectionssaver.db");
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(SettingsError::Serialization(_))));
}

#[test]
fn test_unknown_key_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    assert!(matches!(engine.set_value("", json!(1)), Err(SettingsError::InvalidKey(_))));
    assert!(matches!(engine.set_value("restore.wrap", json!(true)), Err(SettingsError::InvalidKey(_))));
    assert!(matches!(engine.set_value("nope.at.all", json!(true)), Err(SettingsError::InvalidKey(_))));
}

#[test]
fn test_invalid_value_rejected_and_settings_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine.set_value("restore.out_of_range", json!("wrap")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings(), &SaverSettings::default());
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.set_value("commands.confirm_clear", json!(false)).unwrap();
    engine.set_value("storage.database_file", json!("other.db")).unwrap();

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &SaverSettings::default());

    let mut fresh = engine_in_temp(&dir);
    assert_eq!(fresh.load().unwrap(), SaverSettings::default());
}

#[test]
fn test_default_config_path() {
    let engine = SettingsEngine::new(None);
    let path = engine.get_config_path();
    assert!(path.ends_with("settings.json"));
    assert!(path.to_lowercase().contains("selectionssaver"));
}
