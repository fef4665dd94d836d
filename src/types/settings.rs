use serde::{Deserialize, Serialize};

/// Top-level settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SaverSettings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub restore: RestoreSettings,
    #[serde(default)]
    pub commands: CommandSettings,
}

/// Where bookmark state is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// Database file name, resolved against the data directory when relative.
    pub database_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "selectionssaver.db".to_string(),
        }
    }
}

/// How restore treats positions past the end of the current document.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Move each position to the nearest valid one.
    #[default]
    Clamp,
    /// Refuse the restore with `PositionOutOfRange`.
    Reject,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RestoreSettings {
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandSettings {
    /// Ask before deleting every bookmark in the scope.
    pub confirm_clear: bool,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            confirm_clear: true,
        }
    }
}
