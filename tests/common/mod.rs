//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use equip_hotkeys::gear::{Equipset, Equipsets, Gear, GearAction, Gearslot};
use equip_hotkeys::host::memory::MemoryHost;
use equip_hotkeys::host::{ExtraData, FormKind, FormRef, SpellHands};
use equip_hotkeys::hotkeys::{Hotkey, Hotkeys};
use equip_hotkeys::keys::{Keyset, Keysets, Keystroke};

pub const SWORD: FormRef = FormRef(0x0001_2EB7);
pub const DAGGER: FormRef = FormRef(0x0001_39AD);
pub const BOW: FormRef = FormRef(0x0001_3985);
pub const ARROWS: FormRef = FormRef(0x0001_397D);
pub const SHIELD: FormRef = FormRef(0x0001_2EB6);
pub const FLAMES: FormRef = FormRef(0x0001_2FCD);
pub const HEALING: FormRef = FormRef(0x0001_2FCC);
pub const UNRELENTING_FORCE: FormRef = FormRef(0x0001_3E09);
pub const DUMMY: FormRef = FormRef(0xFF00_0800);
/// A crafted item that only exists in one save
pub const CRAFTED_SWORD: FormRef = FormRef(0xFF00_0A10);

/// Keystrokes from `(code, held seconds)` pairs
pub fn strokes(codes: &[(u32, f32)]) -> Vec<Keystroke> {
    codes
        .iter()
        .map(|&(code, held)| Keystroke::new(code, held).expect("valid keystroke"))
        .collect()
}

pub fn keysets(chords: &[&[u32]]) -> Keysets {
    Keysets::new(
        chords
            .iter()
            .map(|codes| Keyset::from_codes(codes.iter().copied()))
            .collect(),
    )
}

pub fn hotkey(name: &str, chords: &[&[u32]], sets: &[&'static str]) -> Hotkey<&'static str> {
    Hotkey::new(name, keysets(chords), Equipsets::new(sets.to_vec()))
}

/// Three hotkeys on keys 1, 2 and 3, with the first one active
pub fn scenario_engine() -> Hotkeys<&'static str> {
    let mut hotkeys = Hotkeys::new(vec![
        hotkey("H0", &[&[1]], &["a1", "a2"]),
        hotkey("H1", &[&[2]], &["b1", "b2"]),
        hotkey("H2", &[&[3]], &["c1"]),
    ]);
    hotkeys.set_active(Some(0));
    hotkeys
}

/// A host with a small armory in the player's inventory
pub fn armed_host() -> MemoryHost {
    let mut host = MemoryHost::new()
        .with_form(SWORD, FormKind::Weapon { two_handed: false })
        .with_form(DAGGER, FormKind::Weapon { two_handed: false })
        .with_form(BOW, FormKind::Weapon { two_handed: true })
        .with_form(ARROWS, FormKind::Ammo)
        .with_form(SHIELD, FormKind::Shield)
        .with_form(FLAMES, FormKind::Spell(SpellHands::Either))
        .with_form(HEALING, FormKind::Spell(SpellHands::Either))
        .with_form(UNRELENTING_FORCE, FormKind::Shout)
        .with_dummy(DUMMY);
    host.add_form(
        CRAFTED_SWORD,
        FormKind::Weapon { two_handed: false },
        "",
        0,
    );

    host.add_item(SWORD, 1, vec![]);
    host.add_item(DAGGER, 2, vec![]);
    host.add_item(BOW, 1, vec![]);
    host.add_item(ARROWS, 40, vec![]);
    host.add_item(SHIELD, 1, vec![]);
    host.add_item(CRAFTED_SWORD, 1, vec![ExtraData::new(1.2, None)]);
    host.learn_spell(FLAMES);
    host.learn_spell(HEALING);
    host.learn_shout(UNRELENTING_FORCE);
    host
}

pub fn equip(host: &MemoryHost, form: FormRef, prefer_left: bool) -> GearAction {
    equip_with(host, form, prefer_left, ExtraData::default())
}

pub fn equip_with(host: &MemoryHost, form: FormRef, prefer_left: bool, extra: ExtraData) -> GearAction {
    use equip_hotkeys::host::Forms;
    let gear = Gear::from_form(host.form_kind(form), form, prefer_left, extra)
        .expect("form goes into a gearslot");
    GearAction::Equip(gear)
}

/// Sword and shield, bow and arrows, and a spell/shout set
pub fn sample_hotkeys(host: &MemoryHost) -> Hotkeys<Equipset> {
    let melee = Equipset::new([equip(host, SWORD, false), equip(host, SHIELD, true)]);
    let archery = Equipset::new([
        equip(host, BOW, false),
        equip(host, ARROWS, false),
        GearAction::Clear(Gearslot::Left),
    ]);
    let caster = Equipset::new([
        equip(host, FLAMES, true),
        equip(host, HEALING, false),
        equip(host, UNRELENTING_FORCE, false),
    ]);
    let crafted = Equipset::new([equip_with(
        host,
        CRAFTED_SWORD,
        false,
        ExtraData::new(1.2, None),
    )]);

    Hotkeys::new(vec![
        Hotkey::new(
            "Fight",
            Keysets::new(vec![
                Keyset::from_names(["leftalt", "1"]),
                Keyset::from_names(["gamepad_dpad_left"]),
            ]),
            Equipsets::new(vec![melee, archery]),
        ),
        Hotkey::new(
            "Magic",
            Keysets::new(vec![Keyset::from_names(["leftalt", "2"])]),
            Equipsets::new(vec![caster, crafted]),
        ),
    ])
}
