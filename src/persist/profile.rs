//! JSON profiles: hotkey lists saved by name outside of the game save

use std::path::Path;

use crate::error::Result;
use crate::gear::Equipset;
use crate::host::Forms;
use crate::hotkeys::Hotkeys;

use super::ir::HotkeysIr;

/// Pretty JSON for a hotkey list
pub fn to_json(hotkeys: &Hotkeys<Equipset>, forms: &dyn Forms, persist_active: bool) -> Result<String> {
    let ir = hotkeys.to_ir(forms, persist_active);
    Ok(serde_json::to_string_pretty(&ir)?)
}

/// Parse a hotkey list, dropping entries that no longer resolve
pub fn from_json(bytes: &[u8], forms: &dyn Forms) -> Result<Hotkeys<Equipset>> {
    let ir: HotkeysIr = serde_json::from_slice(bytes)?;
    Ok(Hotkeys::from_ir(ir, forms))
}

pub fn read_profile(path: &Path, forms: &dyn Forms) -> Result<Hotkeys<Equipset>> {
    let bytes = std::fs::read(path)?;
    let hotkeys = from_json(&bytes, forms)?;
    tracing::info!("Loaded {} hotkeys from {}", hotkeys.len(), path.display());
    Ok(hotkeys)
}

/// Write a profile, creating the parent directory if needed
///
/// Cursors are not part of profiles.
pub fn write_profile(path: &Path, hotkeys: &Hotkeys<Equipset>, forms: &dyn Forms) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = to_json(hotkeys, forms, false)?;
    std::fs::write(path, content)?;
    tracing::info!("Saved {} hotkeys to {}", hotkeys.len(), path.display());
    Ok(())
}
