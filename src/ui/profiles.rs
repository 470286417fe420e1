//! Named profiles on disk
//!
//! Profiles are `<name>.json` files in one directory. Failures come back as
//! short messages for the editor's status popup.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::gear::Equipset;
use crate::host::Forms;
use crate::hotkeys::Hotkeys;
use crate::persist::profile;

/// Longest profile name, in bytes
pub const MAX_PROFILE_NAME: usize = 32;

const PROFILE_EXT: &str = "json";

/// Sanitize a user-typed profile name
///
/// Keeps ASCII letters, digits, `_` and `-`, collapses whitespace runs into
/// single spaces, trims, and truncates to [`MAX_PROFILE_NAME`] bytes.
pub fn normalize_profile_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len().min(MAX_PROFILE_NAME));
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        } else if c.is_whitespace() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    out.truncate(MAX_PROFILE_NAME);
    out.trim_end().to_string()
}

#[derive(Debug)]
pub struct ProfileStore {
    dir: PathBuf,
    cache: Option<Vec<String>>,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: None,
        }
    }

    /// Store in the plugin's profile directory
    pub fn open_default() -> Option<Self> {
        crate::config_paths::profiles_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File for a profile name; rejects names that are not already normalized
    pub fn path_for(&self, name: &str) -> Result<PathBuf, Error> {
        let normalized = normalize_profile_name(name);
        if normalized.is_empty() || normalized != name {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", normalized, PROFILE_EXT)))
    }

    /// Sorted profile names, read from disk on first use after a change
    pub fn list(&mut self) -> &[String] {
        let dir = &self.dir;
        self.cache.get_or_insert_with(|| {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!("Failed to list profiles in {}: {}", dir.display(), e);
                    }
                    return Vec::new();
                }
            };
            let mut names: Vec<String> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(PROFILE_EXT))
                .filter_map(|path| path.file_stem()?.to_str().map(String::from))
                .collect();
            names.sort();
            names
        })
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn import(&self, name: &str, forms: &dyn Forms) -> Result<Hotkeys<Equipset>, String> {
        let path = self.path_for(name).map_err(|e| e.to_string())?;
        profile::read_profile(&path, forms)
            .map_err(|e| format!("Failed to import profile '{}': {}", name, e))
    }

    pub fn export(
        &mut self,
        name: &str,
        hotkeys: &Hotkeys<Equipset>,
        forms: &dyn Forms,
    ) -> Result<(), String> {
        let path = self.path_for(name).map_err(|e| e.to_string())?;
        self.invalidate();
        profile::write_profile(&path, hotkeys, forms)
            .map_err(|e| format!("Failed to export profile '{}': {}", name, e))
    }

    pub fn delete(&mut self, name: &str) -> Result<(), String> {
        let path = self.path_for(name).map_err(|e| e.to_string())?;
        self.invalidate();
        std::fs::remove_file(&path)
            .map_err(|e| format!("Failed to delete profile '{}': {}", name, e))?;
        tracing::info!("Deleted profile {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_allowed_chars() {
        assert_eq!(normalize_profile_name("  My  Build!! v2 "), "My Build v2");
        assert_eq!(normalize_profile_name("two_handed-heavy"), "two_handed-heavy");
        assert_eq!(normalize_profile_name("\t\n"), "");
        assert_eq!(normalize_profile_name("a/../b"), "ab");
    }

    #[test]
    fn test_normalize_truncates() {
        let long = "x".repeat(40);
        assert_eq!(normalize_profile_name(&long).len(), MAX_PROFILE_NAME);
        // truncation never leaves a trailing space
        let name = format!("{} tail", "y".repeat(31));
        assert_eq!(normalize_profile_name(&name), "y".repeat(31));
    }

    #[test]
    fn test_normalize_idempotent() {
        let repeated = "ab ".repeat(20);
        for raw in ["  a  b  ", "Ünïcode name", "x-y_z 1 2 3", repeated.as_str()] {
            let once = normalize_profile_name(raw);
            assert_eq!(normalize_profile_name(&once), once);
            assert!(once.len() <= MAX_PROFILE_NAME);
            assert!(!once.starts_with(' ') && !once.ends_with(' '));
            assert!(once
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ' '));
        }
    }

    #[test]
    fn test_unnormalized_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProfileStore::new(dir.path());
        assert!(store.delete("../evil").is_err());
        assert!(store.delete("").is_err());
        assert!(store.path_for("../../x").is_err());
        assert!(store.path_for("a/b").is_err());
        assert_eq!(store.path_for("My Build").unwrap(), dir.path().join("My Build.json"));
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProfileStore::new(dir.path().join("missing"));
        assert!(store.list().is_empty());
    }
}
