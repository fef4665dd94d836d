// SelectionsSaver Settings Engine
// Loads, saves, updates and resets settings kept as a JSON file, by default
// `settings.json` in the platform config directory.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::SaverSettings;

pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<SaverSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &SaverSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

pub struct SettingsEngine {
    config_path: String,
    settings: SaverSettings,
}

impl SettingsEngine {
    /// Uses `path_override` when given, otherwise `<config dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: SaverSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// A missing file yields defaults; a malformed one is an error.
    fn load(&mut self) -> Result<SaverSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!(path = %self.config_path, "No settings file, using defaults");
            self.settings = SaverSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::Serialization(format!("Failed to parse config file: {}", e))
        })?;
        info!(path = %self.config_path, "Settings loaded");
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::Serialization(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::Io(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &SaverSettings {
        &self.settings
    }

    /// Updates one setting by dot path (`"restore.out_of_range"`), validates
    /// the result by round-tripping it through `SaverSettings`, then saves.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::Serialization(format!("Failed to serialize settings: {}", e))
        })?;

        let parts: Vec<&str> = key.split('.').collect();
        let (leaf, parents) = parts
            .split_last()
            .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;

        let mut current = &mut json_value;
        for part in parents {
            current = current
                .get_mut(*part)
                .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        }

        match current {
            Value::Object(map) if map.contains_key(*leaf) => {
                map.insert(leaf.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )))
            }
        }

        self.settings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = SaverSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
