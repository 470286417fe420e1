//! In-memory host used by tests, benches and the profile CLI
//!
//! Models just enough of the host's equip rules to observe what the plugin
//! asks for: two hands, an ammo slot, a voice slot and an inventory.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::Mutex;

use super::{
    ControlState, EquipSlot, ExtraData, FormKind, FormLocator, FormRef, Forms, Hand, HostActor,
    InventoryItem,
};

/// A call the plugin made into the host
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    EquipObject(FormRef, Option<EquipSlot>),
    EquipSpell(FormRef, EquipSlot),
    EquipShout(FormRef),
    UnequipObject(FormRef, Option<EquipSlot>),
    UnequipSpell(FormRef, EquipSlot),
    UnequipShout(FormRef),
}

#[derive(Debug, Default)]
struct ActorState {
    left: Option<(FormRef, ExtraData)>,
    right: Option<(FormRef, ExtraData)>,
    ammo: Option<FormRef>,
    power: Option<FormRef>,
    spells: HashSet<FormRef>,
    shouts: HashSet<FormRef>,
    inventory: Vec<InventoryItem>,
}

#[derive(Debug)]
struct FormRecord {
    kind: FormKind,
    locator: FormLocator,
}

/// In-process [`HostActor`]
#[derive(Debug)]
pub struct MemoryHost {
    forms: HashMap<FormRef, FormRecord>,
    dummy: Option<FormRef>,
    actor: Mutex<ActorState>,
    controls: Mutex<ControlState>,
    clock_ms: AtomicU32,
    calls: Mutex<Vec<HostCall>>,
    notifications: Mutex<Vec<String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            forms: HashMap::new(),
            dummy: None,
            actor: Mutex::new(ActorState::default()),
            controls: Mutex::new(ControlState::GAMEPLAY),
            clock_ms: AtomicU32::new(0),
            calls: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Register a form from a plugin file (`local_id` without load-order byte)
    pub fn add_form(&mut self, form: FormRef, kind: FormKind, modname: &str, local_id: u32) {
        let locator = if modname.is_empty() {
            FormLocator::dynamic(form)
        } else {
            FormLocator::new(modname, local_id)
        };
        self.forms.insert(form, FormRecord { kind, locator });
    }

    /// Register a form whose locator is derived from its id (`Skyrim.esm`,
    /// or dynamic for ids in the `FF` range)
    pub fn with_form(mut self, form: FormRef, kind: FormKind) -> Self {
        if form.is_dynamic() {
            self.add_form(form, kind, "", 0);
        } else {
            self.add_form(form, kind, "Skyrim.esm", form.id() & 0x00FF_FFFF);
        }
        self
    }

    /// Register the placeholder weapon used to empty hands
    pub fn with_dummy(mut self, form: FormRef) -> Self {
        self.add_form(form, FormKind::Weapon { two_handed: false }, "equip-hotkeys.esp", 0x800);
        self.dummy = Some(form);
        self
    }

    pub fn add_item(&self, form: FormRef, count: i32, extra_lists: Vec<ExtraData>) {
        let mut actor = self.actor.lock();
        match actor.inventory.iter_mut().find(|it| it.form == form) {
            Some(item) => {
                item.count += count;
                item.extra_lists.extend(extra_lists);
            }
            None => actor.inventory.push(InventoryItem {
                form,
                count,
                extra_lists,
            }),
        }
    }

    pub fn learn_spell(&self, form: FormRef) {
        self.actor.lock().spells.insert(form);
    }

    pub fn learn_shout(&self, form: FormRef) {
        self.actor.lock().shouts.insert(form);
    }

    pub fn set_time(&self, ms: u32) {
        self.clock_ms.store(ms, Ordering::Relaxed);
    }

    pub fn advance(&self, ms: u32) {
        self.clock_ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn set_controls(&self, controls: ControlState) {
        *self.controls.lock() = controls;
    }

    /// Drain the recorded host calls
    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().push(call);
    }

    fn kind(&self, form: FormRef) -> FormKind {
        self.forms
            .get(&form)
            .map(|r| r.kind)
            .unwrap_or(FormKind::Other)
    }

    fn put_in_hand(actor: &mut ActorState, slot: EquipSlot, entry: (FormRef, ExtraData)) {
        match slot {
            EquipSlot::Left => actor.left = Some(entry),
            EquipSlot::Right | EquipSlot::Either => actor.right = Some(entry),
            EquipSlot::Both => {
                actor.left = Some(entry);
                actor.right = Some(entry);
            }
            EquipSlot::Voice => actor.power = Some(entry.0),
        }
    }

    fn clear_two_handed(actor: &mut ActorState, forms: &HashMap<FormRef, FormRecord>) {
        // a one-handed item displaces a two-handed one from both hands
        for hand in [&mut actor.left, &mut actor.right] {
            if let Some((form, _)) = *hand {
                let two_handed = matches!(
                    forms.get(&form).map(|r| r.kind),
                    Some(FormKind::Weapon { two_handed: true })
                        | Some(FormKind::Spell(super::SpellHands::Both))
                );
                if two_handed {
                    *hand = None;
                }
            }
        }
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Forms for MemoryHost {
    fn form_kind(&self, form: FormRef) -> FormKind {
        self.kind(form)
    }

    fn locate(&self, form: FormRef) -> Option<FormLocator> {
        self.forms.get(&form).map(|r| r.locator.clone())
    }

    fn resolve(&self, locator: &FormLocator) -> Option<FormRef> {
        self.forms
            .iter()
            .find(|(_, r)| r.locator == *locator)
            .map(|(form, _)| *form)
    }
}

impl HostActor for MemoryHost {
    fn as_forms(&self) -> &dyn Forms {
        self
    }

    fn equipped(&self, hand: Hand) -> Option<FormRef> {
        let actor = self.actor.lock();
        match hand {
            Hand::Left => actor.left.map(|(f, _)| f),
            Hand::Right => actor.right.map(|(f, _)| f),
        }
    }

    fn equipped_extra(&self, hand: Hand) -> Option<ExtraData> {
        let actor = self.actor.lock();
        match hand {
            Hand::Left => actor.left.map(|(_, x)| x),
            Hand::Right => actor.right.map(|(_, x)| x),
        }
    }

    fn current_ammo(&self) -> Option<FormRef> {
        self.actor.lock().ammo
    }

    fn selected_power(&self) -> Option<FormRef> {
        self.actor.lock().power
    }

    fn has_spell(&self, form: FormRef) -> bool {
        self.actor.lock().spells.contains(&form)
    }

    fn has_shout(&self, form: FormRef) -> bool {
        self.actor.lock().shouts.contains(&form)
    }

    fn inventory(&self, filter: &dyn Fn(FormRef) -> bool) -> Vec<InventoryItem> {
        self.actor
            .lock()
            .inventory
            .iter()
            .filter(|it| filter(it.form))
            .cloned()
            .collect()
    }

    fn equip_object(
        &self,
        form: FormRef,
        extra: Option<&ExtraData>,
        count: i32,
        slot: Option<EquipSlot>,
    ) -> bool {
        self.record(HostCall::EquipObject(form, slot));
        let extra = extra.copied().unwrap_or_default();
        let kind = self.kind(form);
        let mut actor = self.actor.lock();
        let carried = Some(form) == self.dummy
            || actor
                .inventory
                .iter()
                .any(|it| it.form == form && it.count >= count.max(1));
        if !carried {
            return false;
        }
        match kind {
            FormKind::Weapon { two_handed: true } => {
                Self::put_in_hand(&mut actor, EquipSlot::Both, (form, extra));
            }
            FormKind::Weapon { two_handed: false } => {
                Self::clear_two_handed(&mut actor, &self.forms);
                Self::put_in_hand(&mut actor, slot.unwrap_or(EquipSlot::Right), (form, extra));
            }
            FormKind::Shield | FormKind::Torch => {
                Self::clear_two_handed(&mut actor, &self.forms);
                actor.left = Some((form, extra));
            }
            FormKind::Ammo => actor.ammo = Some(form),
            _ => return false,
        }
        true
    }

    fn equip_spell(&self, form: FormRef, slot: EquipSlot) -> bool {
        self.record(HostCall::EquipSpell(form, slot));
        let mut actor = self.actor.lock();
        if !actor.spells.contains(&form) {
            return false;
        }
        if slot != EquipSlot::Voice && slot != EquipSlot::Both {
            Self::clear_two_handed(&mut actor, &self.forms);
        }
        Self::put_in_hand(&mut actor, slot, (form, ExtraData::default()));
        true
    }

    fn equip_shout(&self, form: FormRef) -> bool {
        self.record(HostCall::EquipShout(form));
        let mut actor = self.actor.lock();
        if !actor.shouts.contains(&form) {
            return false;
        }
        actor.power = Some(form);
        true
    }

    fn unequip_object(&self, form: FormRef, slot: Option<EquipSlot>) -> bool {
        self.record(HostCall::UnequipObject(form, slot));
        let mut actor = self.actor.lock();
        let mut changed = false;
        let hands: &[Hand] = match slot {
            Some(EquipSlot::Left) => &[Hand::Left],
            Some(EquipSlot::Right) => &[Hand::Right],
            _ => &[Hand::Left, Hand::Right],
        };
        for hand in hands {
            let held = match hand {
                Hand::Left => &mut actor.left,
                Hand::Right => &mut actor.right,
            };
            if held.map(|(f, _)| f) == Some(form) {
                *held = None;
                changed = true;
            }
        }
        if actor.ammo == Some(form) {
            actor.ammo = None;
            changed = true;
        }
        changed
    }

    fn unequip_spell(&self, form: FormRef, slot: EquipSlot) -> bool {
        self.record(HostCall::UnequipSpell(form, slot));
        let mut actor = self.actor.lock();
        if slot == EquipSlot::Voice && actor.power == Some(form) {
            actor.power = None;
            return true;
        }
        false
    }

    fn unequip_shout(&self, form: FormRef) -> bool {
        self.record(HostCall::UnequipShout(form));
        let mut actor = self.actor.lock();
        if actor.power == Some(form) {
            actor.power = None;
            return true;
        }
        false
    }

    fn dummy_weapon(&self) -> Option<FormRef> {
        self.dummy
    }

    fn runtime_ms(&self) -> u32 {
        self.clock_ms.load(Ordering::Relaxed)
    }

    fn control_state(&self) -> ControlState {
        *self.controls.lock()
    }

    fn notify(&self, message: &str) {
        self.notifications.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWORD: FormRef = FormRef(0x0001_2EB7);
    const GREATSWORD: FormRef = FormRef(0x0001_359D);

    fn host() -> MemoryHost {
        let host = MemoryHost::new()
            .with_form(SWORD, FormKind::Weapon { two_handed: false })
            .with_form(GREATSWORD, FormKind::Weapon { two_handed: true })
            .with_dummy(FormRef(0xFF00_0800));
        host.add_item(SWORD, 1, vec![]);
        host.add_item(GREATSWORD, 1, vec![]);
        host
    }

    #[test]
    fn test_locate_resolve_roundtrip() {
        let host = host();
        let loc = host.locate(SWORD).unwrap();
        assert_eq!(loc, FormLocator::new("Skyrim.esm", 0x012EB7));
        assert_eq!(host.resolve(&loc), Some(SWORD));
    }

    #[test]
    fn test_two_handed_fills_both_hands() {
        let host = host();
        assert!(host.equip_object(GREATSWORD, None, 1, Some(EquipSlot::Right)));
        assert_eq!(host.equipped(Hand::Left), Some(GREATSWORD));
        assert_eq!(host.equipped(Hand::Right), Some(GREATSWORD));

        assert!(host.equip_object(SWORD, None, 1, Some(EquipSlot::Left)));
        assert_eq!(host.equipped(Hand::Left), Some(SWORD));
        assert_eq!(host.equipped(Hand::Right), None);
    }

    #[test]
    fn test_refuses_items_not_carried() {
        let host = MemoryHost::new().with_form(SWORD, FormKind::Weapon { two_handed: false });
        assert!(!host.equip_object(SWORD, None, 1, Some(EquipSlot::Right)));
        assert_eq!(host.take_calls().len(), 1);
    }
}
