//! Plugin settings
//!
//! Stored as JSON in the plugin directory (see [`crate::config_paths`]).
//! Unknown fields are ignored and missing ones take their defaults. An
//! unrecognized log level or color style falls back to its default without
//! discarding the other fields.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::keys::{Keyset, Keysets};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}

/// Editor palette
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorStyle {
    #[default]
    Dark,
    Light,
    Classic,
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default + fmt::Debug,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        let fallback = T::default();
        tracing::warn!("Invalid setting ({}), using {:?}", e, fallback);
        fallback
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "or_default")]
    pub log_level: LogLevel,
    pub menu_font_scale: f32,
    /// Font file for the editor, empty for the built-in font
    pub menu_font_file: String,
    #[serde(deserialize_with = "or_default")]
    pub menu_color_style: ColorStyle,
    /// Chords that open and close the editor, as key names
    pub menu_toggle_keysets: Vec<Vec<String>>,
    /// Show a host notification naming the hotkey on every actuation
    pub notify_equipset_change: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            menu_font_scale: 1.0,
            menu_font_file: String::new(),
            menu_color_style: ColorStyle::Dark,
            menu_toggle_keysets: vec![
                vec!["leftshift".into(), "backslash".into()],
                vec!["gamepad_back".into(), "gamepad_left_thumb".into()],
            ],
            notify_equipset_change: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or return defaults if it is missing or invalid
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from the plugin directory
    pub fn load_default() -> Self {
        let Some(path) = crate::config_paths::settings_file() else {
            tracing::debug!("No plugin directory available, using default settings");
            return Self::default();
        };
        Self::load(&path)
    }

    /// Save settings, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings to {}: {}", path.display(), e))?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Editor toggle chords; unknown key names are dropped
    pub fn toggle_keysets(&self) -> Keysets {
        Keysets::new(
            self.menu_toggle_keysets
                .iter()
                .map(Keyset::from_names)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"menu_color_style": "classic", "extra": 5}"#).unwrap();
        assert_eq!(settings.menu_color_style, ColorStyle::Classic);
        assert_eq!(settings.menu_font_scale, 1.0);
        assert!(settings.notify_equipset_change);
        assert_eq!(settings.log_level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        assert_eq!(Settings::load(&dir.path().join("missing.json")), Settings::default());
    }

    #[test]
    fn test_unknown_enum_values_keep_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"menu_color_style": "neon", "log_level": "verbose",
                "notify_equipset_change": false, "menu_toggle_keysets": [["f12"]]}"#,
        )
        .unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.menu_color_style, ColorStyle::Dark);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert!(!settings.notify_equipset_change);
        assert_eq!(settings.menu_toggle_keysets, vec![vec!["f12".to_string()]]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            log_level: LogLevel::Debug,
            menu_font_scale: 1.5,
            menu_toggle_keysets: vec![vec!["f12".into()]],
            notify_equipset_change: false,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_toggle_keysets_skip_unknown_names() {
        let settings = Settings {
            menu_toggle_keysets: vec![vec!["nosuchkey".into()], vec!["f12".into(), "bogus".into()]],
            ..Settings::default()
        };
        let keysets = settings.toggle_keysets();
        assert_eq!(keysets.len(), 1);
        assert_eq!(keysets.as_slice()[0].names(), vec!["f12"]);
    }
}
