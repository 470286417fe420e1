//! Editable copy of the hotkey list
//!
//! Unlike [`Hotkeys`], nothing here is pruned: the editor shows empty
//! chords and half-built equipsets while the user works on them.

use crate::gear::{Equipset, Equipsets, Gear, GearAction, Gearslot};
use crate::host::HostActor;
use crate::hotkeys::{Hotkey, Hotkeys};
use crate::keys::{Keyset, Keysets};

/// What an equipset does with one slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Choice {
    /// Equip the slot's gear
    Gear,
    /// Leave the slot alone
    #[default]
    Ignore,
    /// Empty the slot
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotUi {
    pub gear: Option<Gear>,
    pub slot: Gearslot,
    pub choice: Choice,
}

impl SlotUi {
    pub fn ignored(slot: Gearslot) -> Self {
        Self {
            gear: None,
            slot,
            choice: Choice::Ignore,
        }
    }

    /// The action this slot contributes, if any
    ///
    /// `Gear` without gear data behaves as `Ignore`.
    pub fn to_action(&self) -> Option<GearAction> {
        match self.choice {
            Choice::Gear => self.gear.map(GearAction::Equip),
            Choice::Clear => Some(GearAction::Clear(self.slot)),
            Choice::Ignore => None,
        }
    }
}

/// One row per gearslot, indexed by [`Gearslot::index`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipsetUi(pub [SlotUi; Gearslot::COUNT]);

impl Default for EquipsetUi {
    fn default() -> Self {
        Self(Gearslot::ALL.map(SlotUi::ignored))
    }
}

impl EquipsetUi {
    pub fn from_equipset(equipset: &Equipset) -> Self {
        let mut out = Self::default();
        for action in equipset.actions() {
            let row = &mut out.0[action.slot().index()];
            match action {
                GearAction::Equip(gear) => {
                    row.gear = Some(*gear);
                    row.choice = Choice::Gear;
                }
                GearAction::Clear(_) => row.choice = Choice::Clear,
            }
        }
        out
    }

    /// Capture what the actor wears now; empty slots become clears
    pub fn from_equipped(actor: &dyn HostActor) -> Self {
        Self::from_equipset(&Equipset::from_equipped(actor, true))
    }

    pub fn to_equipset(&self) -> Equipset {
        Equipset::new(self.0.iter().filter_map(SlotUi::to_action))
    }

    pub fn slot(&self, slot: Gearslot) -> &SlotUi {
        &self.0[slot.index()]
    }

    pub fn slot_mut(&mut self, slot: Gearslot) -> &mut SlotUi {
        &mut self.0[slot.index()]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotkeyUi {
    pub name: String,
    pub keysets: Vec<Keyset>,
    pub equipsets: Vec<EquipsetUi>,
}

impl HotkeyUi {
    pub fn from_hotkey(hotkey: &Hotkey<Equipset>) -> Self {
        Self {
            name: hotkey.name.clone(),
            keysets: hotkey.keysets.as_slice().to_vec(),
            equipsets: hotkey.equipsets.iter().map(EquipsetUi::from_equipset).collect(),
        }
    }

    pub fn to_hotkey(&self) -> Hotkey<Equipset> {
        Hotkey::new(
            self.name.clone(),
            Keysets::new(self.keysets.clone()),
            Equipsets::new(self.equipsets.iter().map(EquipsetUi::to_equipset).collect()),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotkeysUi {
    pub hotkeys: Vec<HotkeyUi>,
}

impl HotkeysUi {
    pub fn from_hotkeys(hotkeys: &Hotkeys<Equipset>) -> Self {
        Self {
            hotkeys: hotkeys.hotkeys().iter().map(HotkeyUi::from_hotkey).collect(),
        }
    }

    /// Pruned engine list; cursors start fresh
    pub fn to_hotkeys(&self) -> Hotkeys<Equipset> {
        Hotkeys::new(self.hotkeys.iter().map(HotkeyUi::to_hotkey).collect())
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut HotkeyUi> {
        self.hotkeys.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.hotkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotkeys.is_empty()
    }
}
