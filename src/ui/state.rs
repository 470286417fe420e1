//! Editor state and the commands the draw code hands back
//!
//! Drawing never mutates anything directly: it returns a [`UiCmd`] that is
//! applied once the frame is done.

use crate::gear::{Equipset, Gearslot};
use crate::host::HostActor;
use crate::hotkeys::Hotkeys;
use crate::keys::Keyset;

use super::profiles::{normalize_profile_name, ProfileStore};
use super::view_model::{Choice, EquipsetUi, HotkeyUi, HotkeysUi};

// ============================================================================
// Commands
// ============================================================================

/// A deferred edit produced by one frame of the editor
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiCmd {
    #[default]
    None,
    AddHotkey,
    RemoveHotkey(usize),
    SwapHotkeys(usize, usize),
    Rename {
        hotkey: usize,
        name: String,
    },
    AddKeyset(usize),
    RemoveKeyset {
        hotkey: usize,
        keyset: usize,
    },
    SetKeyset {
        hotkey: usize,
        keyset: usize,
        keys: Keyset,
    },
    /// Append an equipset captured from the current equipment
    AddEquipset(usize),
    /// Recapture an equipset from the current equipment
    UpdateEquipset {
        hotkey: usize,
        equipset: usize,
    },
    RemoveEquipset {
        hotkey: usize,
        equipset: usize,
    },
    SwapEquipsets {
        hotkey: usize,
        a: usize,
        b: usize,
    },
    SetChoice {
        hotkey: usize,
        equipset: usize,
        slot: Gearslot,
        choice: Choice,
    },
    SetExportName(String),
    /// Load a profile into the editor (not yet live)
    ImportProfile(String),
    /// Save the edited list under the export name
    ExportProfile,
    DeleteProfile(String),
    /// Push the edited list to the live hotkeys and keep editing
    Commit,
    /// Commit and close the editor
    Close,
}

// ============================================================================
// Editor state
// ============================================================================

#[derive(Debug)]
pub struct UiState {
    open: bool,
    pub hotkeys: HotkeysUi,
    pub export_name: String,
    /// Message for the status popup, e.g. a failed profile write
    pub status: Option<String>,
    pub profiles: ProfileStore,
}

impl UiState {
    pub fn new(profiles: ProfileStore) -> Self {
        Self {
            open: false,
            hotkeys: HotkeysUi::default(),
            export_name: String::new(),
            status: None,
            profiles,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the editor on a snapshot of the live hotkeys
    pub fn activate(&mut self, hotkeys: &Hotkeys<Equipset>) {
        self.hotkeys = HotkeysUi::from_hotkeys(hotkeys);
        self.status = None;
        self.profiles.invalidate();
        self.open = true;
        tracing::debug!("Editor opened with {} hotkeys", self.hotkeys.len());
    }

    /// Close the editor, committing its edits
    ///
    /// Returns true if the live list was replaced.
    pub fn deactivate(&mut self, hotkeys: &mut Hotkeys<Equipset>) -> bool {
        self.open = false;
        self.commit(hotkeys)
    }

    /// Drop the edit buffer without touching the live list
    pub fn reset(&mut self) {
        self.open = false;
        self.hotkeys = HotkeysUi::default();
        self.status = None;
    }

    fn commit(&mut self, hotkeys: &mut Hotkeys<Equipset>) -> bool {
        let edited = self.hotkeys.to_hotkeys();
        if edited == *hotkeys {
            return false;
        }
        tracing::info!("Committing {} hotkeys", edited.len());
        *hotkeys = edited;
        true
    }

    /// Apply one command; returns true if the live list was replaced
    pub fn apply(
        &mut self,
        cmd: UiCmd,
        actor: &dyn HostActor,
        hotkeys: &mut Hotkeys<Equipset>,
    ) -> bool {
        tracing::trace!("ui command {:?}", cmd);
        match cmd {
            UiCmd::None => {}
            UiCmd::AddHotkey => {
                let name = format!("Hotkey {}", self.hotkeys.len() + 1);
                self.hotkeys.hotkeys.push(HotkeyUi {
                    name,
                    ..HotkeyUi::default()
                });
            }
            UiCmd::RemoveHotkey(idx) => {
                if idx < self.hotkeys.len() {
                    self.hotkeys.hotkeys.remove(idx);
                }
            }
            UiCmd::SwapHotkeys(a, b) => {
                if a < self.hotkeys.len() && b < self.hotkeys.len() {
                    self.hotkeys.hotkeys.swap(a, b);
                }
            }
            UiCmd::Rename { hotkey, name } => {
                if let Some(h) = self.hotkeys.get_mut(hotkey) {
                    h.name = name;
                }
            }
            UiCmd::AddKeyset(hotkey) => {
                if let Some(h) = self.hotkeys.get_mut(hotkey) {
                    h.keysets.push(Keyset::default());
                }
            }
            UiCmd::RemoveKeyset { hotkey, keyset } => {
                if let Some(h) = self.hotkeys.get_mut(hotkey) {
                    if keyset < h.keysets.len() {
                        h.keysets.remove(keyset);
                    }
                }
            }
            UiCmd::SetKeyset {
                hotkey,
                keyset,
                keys,
            } => {
                if let Some(slot) = self
                    .hotkeys
                    .get_mut(hotkey)
                    .and_then(|h| h.keysets.get_mut(keyset))
                {
                    *slot = keys;
                }
            }
            UiCmd::AddEquipset(hotkey) => {
                if let Some(h) = self.hotkeys.get_mut(hotkey) {
                    h.equipsets.push(EquipsetUi::from_equipped(actor));
                }
            }
            UiCmd::UpdateEquipset { hotkey, equipset } => {
                if let Some(set) = self
                    .hotkeys
                    .get_mut(hotkey)
                    .and_then(|h| h.equipsets.get_mut(equipset))
                {
                    *set = EquipsetUi::from_equipped(actor);
                }
            }
            UiCmd::RemoveEquipset { hotkey, equipset } => {
                if let Some(h) = self.hotkeys.get_mut(hotkey) {
                    if equipset < h.equipsets.len() {
                        h.equipsets.remove(equipset);
                    }
                }
            }
            UiCmd::SwapEquipsets { hotkey, a, b } => {
                if let Some(h) = self.hotkeys.get_mut(hotkey) {
                    if a < h.equipsets.len() && b < h.equipsets.len() {
                        h.equipsets.swap(a, b);
                    }
                }
            }
            UiCmd::SetChoice {
                hotkey,
                equipset,
                slot,
                choice,
            } => {
                if let Some(set) = self
                    .hotkeys
                    .get_mut(hotkey)
                    .and_then(|h| h.equipsets.get_mut(equipset))
                {
                    set.slot_mut(slot).choice = choice;
                }
            }
            UiCmd::SetExportName(name) => {
                self.export_name = normalize_profile_name(&name);
            }
            UiCmd::ImportProfile(name) => match self.profiles.import(&name, actor.as_forms()) {
                Ok(imported) => {
                    self.hotkeys = HotkeysUi::from_hotkeys(&imported);
                    self.export_name = name;
                    self.status = None;
                }
                Err(e) => self.set_status(e),
            },
            UiCmd::ExportProfile => {
                let edited = self.hotkeys.to_hotkeys();
                let name = self.export_name.clone();
                match self.profiles.export(&name, &edited, actor.as_forms()) {
                    Ok(()) => self.status = Some(format!("Saved profile '{}'", name)),
                    Err(e) => self.set_status(e),
                }
            }
            UiCmd::DeleteProfile(name) => match self.profiles.delete(&name) {
                Ok(()) => self.status = None,
                Err(e) => self.set_status(e),
            },
            UiCmd::Commit => return self.commit(hotkeys),
            UiCmd::Close => return self.deactivate(hotkeys),
        }
        false
    }

    fn set_status(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.status = Some(message);
    }
}
