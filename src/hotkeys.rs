//! Hotkey engine: which equipset a chord press should apply next
//!
//! Hotkeys are scanned in order and the first one whose chord is satisfied
//! decides the outcome:
//! - press on the active hotkey cycles to its next equipset
//! - press on another hotkey activates it without advancing its cursor
//! - hold resets the hotkey to its first equipset
//! - semi-hold does nothing until the hold threshold is crossed
//!
//! The same equipset is never emitted twice in a row.

use crate::gear::{EquipsetLike, Equipsets};
use crate::keys::{KeysetMatch, Keysets, Keystroke};

/// A named chord list bound to a cycle of equipsets
#[derive(Clone, Debug, PartialEq)]
pub struct Hotkey<Q> {
    pub name: String,
    pub keysets: Keysets,
    pub equipsets: Equipsets<Q>,
}

impl<Q: EquipsetLike> Hotkey<Q> {
    pub fn new(name: impl Into<String>, keysets: Keysets, equipsets: Equipsets<Q>) -> Self {
        Self {
            name: name.into(),
            keysets,
            equipsets,
        }
    }

    /// Neither chords nor equipsets: nothing worth keeping
    pub fn is_degenerate(&self) -> bool {
        self.keysets.is_empty() && self.equipsets.is_empty()
    }
}

/// The live hotkey list with its activation cursor
#[derive(Clone, Debug)]
pub struct Hotkeys<Q> {
    hotkeys: Vec<Hotkey<Q>>,
    /// Index of the active hotkey; `hotkeys.len()` means none
    active: usize,
    last_emitted: Option<Q>,
}

impl<Q: EquipsetLike> Hotkeys<Q> {
    /// Create an inactive engine, dropping degenerate hotkeys
    pub fn new(hotkeys: Vec<Hotkey<Q>>) -> Self {
        let hotkeys: Vec<_> = hotkeys.into_iter().filter(|h| !h.is_degenerate()).collect();
        let active = hotkeys.len();
        Self {
            hotkeys,
            active,
            last_emitted: None,
        }
    }

    pub fn hotkeys(&self) -> &[Hotkey<Q>] {
        &self.hotkeys
    }

    /// Mutable access to one hotkey's equipset cursor
    pub fn equipsets_mut(&mut self, idx: usize) -> Option<&mut Equipsets<Q>> {
        self.hotkeys.get_mut(idx).map(|h| &mut h.equipsets)
    }

    pub fn len(&self) -> usize {
        self.hotkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotkeys.is_empty()
    }

    /// Index of the active hotkey, None when inactive
    pub fn active(&self) -> Option<usize> {
        (self.active < self.hotkeys.len()).then_some(self.active)
    }

    /// Mark hotkey `idx` active; out-of-range indices deactivate
    pub fn set_active(&mut self, idx: Option<usize>) {
        match idx {
            Some(i) if i < self.hotkeys.len() => self.active = i,
            _ => self.deactivate(),
        }
    }

    pub fn last_emitted(&self) -> Option<&Q> {
        self.last_emitted.as_ref()
    }

    /// Forget the active hotkey, e.g. after gear was changed by other means
    pub fn deactivate(&mut self) {
        self.active = self.hotkeys.len();
        self.last_emitted = None;
    }

    /// Selected equipset of the active hotkey
    pub fn get_active_equipset(&self) -> Option<&Q> {
        self.hotkeys.get(self.active)?.equipsets.get_selected()
    }

    /// Name of the active hotkey
    pub fn active_name(&self) -> Option<&str> {
        self.hotkeys.get(self.active).map(|h| h.name.as_str())
    }

    /// Feed a keystroke snapshot; returns the equipset to apply, if any
    pub fn get_next_equipset(&mut self, keystrokes: &[Keystroke]) -> Option<&Q> {
        if keystrokes.is_empty() {
            return None;
        }

        let (idx, matched) = self
            .hotkeys
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.equipsets.is_empty())
            .map(|(i, h)| (i, h.keysets.match_keystrokes(keystrokes)))
            .find(|&(_, m)| m != KeysetMatch::None)?;
        if matched == KeysetMatch::Semihold {
            return None;
        }

        let previous = self.active;
        self.active = idx;
        if matched == KeysetMatch::Hold {
            self.hotkeys[idx].equipsets.select_first();
        } else if previous == idx {
            self.hotkeys[idx].equipsets.select_next();
        }

        let hotkey = &self.hotkeys[idx];
        let next = hotkey.equipsets.get_selected()?;
        if self.last_emitted.as_ref() == Some(next) {
            return None;
        }
        tracing::debug!(
            "hotkey {} '{}' -> equipset {} ({:?})",
            idx,
            hotkey.name,
            hotkey.equipsets.selected(),
            matched
        );
        self.last_emitted = Some(next.clone());
        self.last_emitted.as_ref()
    }
}

impl<Q: EquipsetLike> Default for Hotkeys<Q> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<Q: EquipsetLike> PartialEq for Hotkeys<Q> {
    /// Structural equality; cursors are ignored
    fn eq(&self, other: &Self) -> bool {
        self.hotkeys.len() == other.hotkeys.len()
            && self
                .hotkeys
                .iter()
                .zip(&other.hotkeys)
                .all(|(a, b)| {
                    a.name == b.name
                        && a.keysets == b.keysets
                        && a.equipsets.as_slice() == b.equipsets.as_slice()
                })
    }
}
