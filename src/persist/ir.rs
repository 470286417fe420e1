//! Serialized form of the hotkey list, shared by profiles and the co-save
//!
//! Forms are stored as `(modname, id)` pairs so files survive load-order
//! changes. Default-valued fields are left out when writing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::gear::{Equipset, Equipsets, Gear, GearAction, Gearslot};
use crate::host::{ExtraData, FormLocator, FormRef, Forms};
use crate::hotkeys::{Hotkey, Hotkeys};
use crate::keys::{Keyset, Keysets};

fn is_zero_u8(v: &u8) -> bool {
    *v == 0
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_untempered(v: &f32) -> bool {
    v.is_nan()
}

fn untempered() -> f32 {
    f32::NAN
}

/// Decode one list item, `None` (with a warning) when it is malformed
fn item<T: DeserializeOwned>(value: Value, what: &str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::warn!("malformed {}: {}, skipping it", what, e);
            None
        }
    }
}

// Malformed hotkeys become empty placeholders so `active_hotkey` still
// indexes the stored list; they are pruned on load.
fn lenient_hotkeys<'de, D>(deserializer: D) -> Result<Vec<HotkeyIr>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|v| item(v, "hotkey").unwrap_or_default())
        .collect())
}

// Same for equipsets and `active_equipset`; bad gear entries are dropped.
fn lenient_equipsets<'de, D>(deserializer: D) -> Result<Vec<Vec<GearIr>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|set| {
            item::<Vec<Value>>(set, "equipset")
                .unwrap_or_default()
                .into_iter()
                .filter_map(|gear| item(gear, "gear"))
                .collect()
        })
        .collect())
}

/// Root of a profile file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HotkeysIr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_hotkey: Option<usize>,
    #[serde(default, deserialize_with = "lenient_hotkeys")]
    pub hotkeys: Vec<HotkeyIr>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HotkeyIr {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Chords as lists of canonical key names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keysets: Vec<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "lenient_equipsets"
    )]
    pub equipsets: Vec<Vec<GearIr>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_equipset: Option<usize>,
}

/// One gear action; `unequip` marks a clear action
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GearIr {
    #[serde(default, skip_serializing_if = "is_zero_u8")]
    pub slot: u8,
    #[serde(default, skip_serializing_if = "is_false")]
    pub unequip: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub modname: String,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub id: u32,
    /// Tempering level, NaN (omitted) when untempered
    #[serde(default = "untempered", skip_serializing_if = "is_untempered")]
    pub extra_health: f32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub extra_ench_modname: String,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub extra_ench_id: u32,
}

impl Default for GearIr {
    fn default() -> Self {
        Self {
            slot: 0,
            unequip: false,
            modname: String::new(),
            id: 0,
            extra_health: untempered(),
            extra_ench_modname: String::new(),
            extra_ench_id: 0,
        }
    }
}

impl PartialEq for GearIr {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
            && self.unequip == other.unequip
            && self.modname == other.modname
            && self.id == other.id
            && (self.extra_health == other.extra_health
                || (self.extra_health.is_nan() && other.extra_health.is_nan()))
            && self.extra_ench_modname == other.extra_ench_modname
            && self.extra_ench_id == other.extra_ench_id
    }
}

impl GearIr {
    /// Serialize an action; None if one of its forms has no stable reference
    pub fn from_action(action: &GearAction, forms: &dyn Forms) -> Option<Self> {
        let gear = match action {
            GearAction::Clear(slot) => {
                return Some(Self {
                    slot: slot.index() as u8,
                    unequip: true,
                    ..Self::default()
                })
            }
            GearAction::Equip(gear) => gear,
        };

        let Some(locator) = forms.locate(gear.form()) else {
            tracing::warn!("cannot locate form {}, dropping it", gear.form());
            return None;
        };
        let ench = match gear.extra().enchantment {
            Some(ench) => match forms.locate(ench) {
                Some(loc) => loc,
                None => {
                    tracing::warn!("cannot locate enchantment {}, dropping {}", ench, gear);
                    return None;
                }
            },
            None => FormLocator::default(),
        };
        Some(Self {
            slot: gear.slot().index() as u8,
            unequip: false,
            modname: locator.modname,
            id: locator.id,
            extra_health: gear.extra().tempering,
            extra_ench_modname: ench.modname,
            extra_ench_id: ench.id,
        })
    }

    /// Rebuild the action; None (with a warning) when it no longer makes sense
    pub fn to_action(&self, forms: &dyn Forms) -> Option<GearAction> {
        let Some(slot) = Gearslot::from_index(self.slot) else {
            tracing::warn!("{}, skipping gear", crate::error::Error::InvalidSlot(self.slot));
            return None;
        };
        if self.unequip {
            return Some(GearAction::Clear(slot));
        }

        let locator = FormLocator::new(self.modname.as_str(), self.id);
        let Some(form) = forms.resolve(&locator) else {
            tracing::warn!("form {} not found, skipping gear", locator);
            return None;
        };
        let enchantment = self.enchantment(forms)?;
        let extra = ExtraData::new(self.extra_health, enchantment);
        let gear = Gear::from_form(forms.form_kind(form), form, slot == Gearslot::Left, extra);
        match gear {
            Some(gear) if gear.slot() == slot => Some(GearAction::Equip(gear)),
            _ => {
                tracing::warn!("form {} does not fit {}, skipping gear", locator, slot);
                None
            }
        }
    }

    /// Outer None: the enchantment is referenced but missing
    fn enchantment(&self, forms: &dyn Forms) -> Option<Option<FormRef>> {
        if self.extra_ench_id == 0 && self.extra_ench_modname.is_empty() {
            return Some(None);
        }
        let locator = FormLocator::new(self.extra_ench_modname.as_str(), self.extra_ench_id);
        match forms.resolve(&locator) {
            Some(ench) => Some(Some(ench)),
            None => {
                tracing::warn!("enchantment {} not found, skipping gear", locator);
                None
            }
        }
    }
}

impl HotkeysIr {
    /// Capture the hotkey list
    ///
    /// Cursors (active hotkey, selected equipsets) are only written with
    /// `persist_active`.
    pub fn from_hotkeys(hotkeys: &Hotkeys<Equipset>, forms: &dyn Forms, persist_active: bool) -> Self {
        let items = hotkeys
            .hotkeys()
            .iter()
            .map(|hotkey| {
                let selected = hotkey.equipsets.selected();
                HotkeyIr {
                    name: hotkey.name.clone(),
                    keysets: hotkey
                        .keysets
                        .iter()
                        .map(|ks| ks.names().into_iter().map(String::from).collect())
                        .collect(),
                    equipsets: hotkey
                        .equipsets
                        .iter()
                        .map(|set| {
                            set.actions()
                                .iter()
                                .filter_map(|a| GearIr::from_action(a, forms))
                                .collect()
                        })
                        .collect(),
                    active_equipset: (persist_active && selected != 0).then_some(selected),
                }
            })
            .collect();
        Self {
            active_hotkey: if persist_active { hotkeys.active() } else { None },
            hotkeys: items,
        }
    }

    /// Rebuild the hotkey list, dropping whatever no longer resolves
    ///
    /// Cursors are remapped past pruned entries; a pruned or missing cursor
    /// target falls back to "inactive" / first equipset.
    pub fn into_hotkeys(self, forms: &dyn Forms) -> Hotkeys<Equipset> {
        let mut active = None;
        let mut selected = Vec::new();
        let mut kept = Vec::with_capacity(self.hotkeys.len());

        for (idx, ir) in self.hotkeys.into_iter().enumerate() {
            let keysets = Keysets::new(ir.keysets.iter().map(Keyset::from_names).collect());

            let mut sets = Vec::with_capacity(ir.equipsets.len());
            let mut cursor = 0;
            for (set_idx, set_ir) in ir.equipsets.iter().enumerate() {
                let set = Equipset::new(set_ir.iter().filter_map(|g| g.to_action(forms)));
                if set.is_empty() {
                    continue;
                }
                if Some(set_idx) == ir.active_equipset {
                    cursor = sets.len();
                }
                sets.push(set);
            }

            let hotkey = Hotkey::new(ir.name, keysets, Equipsets::new(sets));
            if hotkey.is_degenerate() {
                tracing::debug!("dropping empty hotkey {}", idx);
                continue;
            }
            if Some(idx) == self.active_hotkey {
                active = Some(kept.len());
            }
            selected.push(cursor);
            kept.push(hotkey);
        }

        let mut hotkeys = Hotkeys::new(kept);
        for (idx, cursor) in selected.into_iter().enumerate() {
            if let Some(sets) = hotkeys.equipsets_mut(idx) {
                sets.select(cursor);
            }
        }
        hotkeys.set_active(active);
        hotkeys
    }
}

impl Hotkeys<Equipset> {
    pub fn to_ir(&self, forms: &dyn Forms, persist_active: bool) -> HotkeysIr {
        HotkeysIr::from_hotkeys(self, forms, persist_active)
    }

    pub fn from_ir(ir: HotkeysIr, forms: &dyn Forms) -> Self {
        ir.into_hotkeys(forms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::host::{FormKind, SpellHands};

    const SWORD: FormRef = FormRef(0x0001_2EB7);
    const FLAMES: FormRef = FormRef(0x0001_2FCD);
    const CUSTOM_ENCH: FormRef = FormRef(0xFF00_0A01);

    fn forms() -> MemoryHost {
        MemoryHost::new()
            .with_form(SWORD, FormKind::Weapon { two_handed: false })
            .with_form(FLAMES, FormKind::Spell(SpellHands::Either))
            .with_form(CUSTOM_ENCH, FormKind::Other)
    }

    #[test]
    fn test_clear_action_ir() {
        let ir = GearIr::from_action(&GearAction::Clear(Gearslot::Ammo), &forms()).unwrap();
        assert_eq!(ir.slot, 2);
        assert!(ir.unequip);
        assert_eq!(serde_json::to_string(&ir).unwrap(), r#"{"slot":2,"unequip":true}"#);
    }

    #[test]
    fn test_equip_action_roundtrip() {
        let forms = forms();
        let extra = ExtraData::new(1.3, Some(CUSTOM_ENCH));
        let gear = Gear::from_form(FormKind::Weapon { two_handed: false }, SWORD, false, extra)
            .unwrap();
        let ir = GearIr::from_action(&GearAction::Equip(gear), &forms).unwrap();
        assert_eq!(ir.modname, "Skyrim.esm");
        assert_eq!(ir.id, 0x012EB7);
        assert_eq!(ir.extra_ench_modname, "");
        assert_eq!(ir.extra_ench_id, 0xFF00_0A01);
        assert_eq!(ir.to_action(&forms), Some(GearAction::Equip(gear)));
    }

    #[test]
    fn test_untempered_omitted() {
        let ir = GearIr {
            slot: 1,
            modname: "Skyrim.esm".into(),
            id: 0x12EB7,
            ..GearIr::default()
        };
        let json = serde_json::to_string(&ir).unwrap();
        assert!(!json.contains("extra_health"));
        let back: GearIr = serde_json::from_str(&json).unwrap();
        assert!(back.extra_health.is_nan());
        assert_eq!(back, ir);
    }

    #[test]
    fn test_bad_slot_skipped() {
        let ir = GearIr {
            slot: 7,
            unequip: true,
            ..GearIr::default()
        };
        assert_eq!(ir.to_action(&forms()), None);
    }

    #[test]
    fn test_unknown_form_skipped() {
        let ir = GearIr {
            modname: "Missing.esp".into(),
            id: 0x801,
            ..GearIr::default()
        };
        assert_eq!(ir.to_action(&forms()), None);
    }

    #[test]
    fn test_slot_mismatch_skipped() {
        // a spell stored in the ammo slot
        let ir = GearIr {
            slot: 2,
            modname: "Skyrim.esm".into(),
            id: 0x012FCD,
            ..GearIr::default()
        };
        assert_eq!(ir.to_action(&forms()), None);
    }

    #[test]
    fn test_malformed_items_skipped() {
        let json = r#"{
            "active_hotkey": 2,
            "hotkeys": [
                {"name": "bad", "keysets": 4},
                {"name": "good", "keysets": [["leftalt", "1"]], "equipsets": [[{"slot": 2, "unequip": true}]]},
                {
                    "name": "mixed",
                    "keysets": [["leftalt", "2"]],
                    "equipsets": [
                        "nope",
                        [{"slot": 300, "unequip": true}, {"slot": 1, "id": -5}, {"slot": 3, "unequip": "yes"}],
                        [{"slot": 1, "modname": "Skyrim.esm", "id": 77495}, {"slot": 300}]
                    ],
                    "active_equipset": 2
                }
            ]
        }"#;
        let ir: HotkeysIr = serde_json::from_str(json).unwrap();
        assert_eq!(ir.hotkeys.len(), 3);
        assert_eq!(ir.hotkeys[0], HotkeyIr::default());
        let mixed = &ir.hotkeys[2];
        assert_eq!(mixed.equipsets.len(), 3);
        assert!(mixed.equipsets[0].is_empty());
        assert!(mixed.equipsets[1].is_empty());
        assert_eq!(mixed.equipsets[2].len(), 1);

        let hotkeys = ir.into_hotkeys(&forms());
        assert_eq!(hotkeys.len(), 2);
        assert_eq!(hotkeys.active(), Some(1));
        assert_eq!(hotkeys.hotkeys()[0].name, "good");
        let mixed = &hotkeys.hotkeys()[1];
        assert_eq!(mixed.equipsets.len(), 1);
        assert_eq!(mixed.equipsets.selected(), 0);
    }

    #[test]
    fn test_cursor_remapped_past_pruned_items() {
        let forms = forms();
        let clear = GearIr {
            unequip: true,
            ..GearIr::default()
        };
        let missing = GearIr {
            modname: "Missing.esp".into(),
            id: 1,
            ..GearIr::default()
        };
        let ir = HotkeysIr {
            active_hotkey: Some(1),
            hotkeys: vec![
                HotkeyIr::default(),
                HotkeyIr {
                    name: "h".into(),
                    keysets: vec![vec!["a".into()], vec![]],
                    equipsets: vec![vec![missing], vec![clear.clone()], vec![clear]],
                    active_equipset: Some(2),
                },
            ],
        };
        let hotkeys = ir.into_hotkeys(&forms);
        assert_eq!(hotkeys.len(), 1);
        assert_eq!(hotkeys.active(), Some(0));
        let hotkey = &hotkeys.hotkeys()[0];
        assert_eq!(hotkey.keysets.len(), 1);
        assert_eq!(hotkey.equipsets.len(), 2);
        assert_eq!(hotkey.equipsets.selected(), 1);
    }
}
