//! Plugin directory layout
//!
//! Everything the plugin writes lives under one directory:
//! - `EQUIP_HOTKEYS_DIR` if set
//! - Unix/macOS: `$XDG_CONFIG_HOME/equip-hotkeys` or `~/.config/equip-hotkeys`
//! - Windows: `%APPDATA%\equip-hotkeys`
//!
//! This module is the single source of truth for plugin paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "equip-hotkeys";

/// Environment variable that overrides the plugin directory
pub const DIR_ENV: &str = "EQUIP_HOTKEYS_DIR";

/// Base plugin directory
pub fn plugin_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(DIR_ENV).filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }

    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
            .or_else(|| dirs::config_dir().map(|d| d.join(APP_DIR)))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `<plugin dir>/settings.json`
pub fn settings_file() -> Option<PathBuf> {
    plugin_dir().map(|dir| dir.join("settings.json"))
}

/// `<plugin dir>/profiles/`
pub fn profiles_dir() -> Option<PathBuf> {
    plugin_dir().map(|dir| dir.join("profiles"))
}

/// `<plugin dir>/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    plugin_dir().map(|dir| dir.join("logs"))
}

/// `<plugin dir>/imgui.ini`, the editor's window layout
pub fn imgui_ini() -> Option<PathBuf> {
    plugin_dir().map(|dir| dir.join("imgui.ini"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the profiles dir exists, returning it
pub fn ensure_profiles_dir() -> Result<PathBuf, String> {
    let dir = profiles_dir().ok_or_else(|| "No plugin directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure the logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let dir = logs_dir().ok_or_else(|| "No plugin directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure the full directory structure
pub fn ensure_all_dirs() {
    match ensure_profiles_dir().and_then(|_| ensure_logs_dir()) {
        Ok(logs) => {
            tracing::info!("Plugin directories ready (logs dir: {})", logs.display());
        }
        Err(e) => {
            tracing::warn!("Failed to ensure plugin directories: {}", e);
        }
    }
}
