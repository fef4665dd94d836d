// SelectionsSaver platform paths
// Linux:   $XDG_CONFIG_HOME/selectionssaver, $XDG_DATA_HOME/selectionssaver
// macOS:   ~/Library/Application Support/SelectionsSaver (both)
// Windows: %APPDATA%/SelectionsSaver (both)

use std::env;
use std::path::PathBuf;

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "SELECTIONSAVER_DATA_DIR";

fn home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";
    PathBuf::from(env::var(var).unwrap_or_else(|_| String::from("/tmp")))
}

#[cfg(target_os = "linux")]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join("selectionssaver"),
        _ => fallback
            .iter()
            .fold(home_dir(), |p, part| p.join(part))
            .join("selectionssaver"),
    }
}

#[cfg(target_os = "macos")]
fn app_support_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("SelectionsSaver")
}

#[cfg(target_os = "windows")]
fn app_data_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
        .join("SelectionsSaver")
}

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
    #[cfg(target_os = "macos")]
    {
        app_support_dir()
    }
    #[cfg(target_os = "windows")]
    {
        app_data_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(".selectionssaver")
    }
}

/// Directory holding the state database. Honors [`DATA_DIR_ENV`].
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
    #[cfg(target_os = "macos")]
    {
        app_support_dir()
    }
    #[cfg(target_os = "windows")]
    {
        app_data_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(".selectionssaver")
    }
}
