//! A single piece of gear and the per-slot actions built from it

use std::fmt;

use crate::host::{EquipSlot, ExtraData, FormKind, FormRef, HostActor, SpellHands};

use super::slot::Gearslot;

/// A specific item, spell or shout, bound to the slot it goes into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gear {
    form: FormRef,
    slot: Gearslot,
    extra: ExtraData,
}

impl Gear {
    /// Build gear for `form`, deriving its slot from the form kind
    ///
    /// `prefer_left` picks the hand for items usable in either hand.
    /// Returns None for forms that don't go into any gearslot.
    pub fn from_form(
        kind: FormKind,
        form: FormRef,
        prefer_left: bool,
        extra: ExtraData,
    ) -> Option<Gear> {
        let either = if prefer_left {
            Gearslot::Left
        } else {
            Gearslot::Right
        };
        let (slot, extra) = match kind {
            FormKind::Weapon { two_handed: true } => (Gearslot::Right, extra),
            FormKind::Weapon { two_handed: false } => (either, extra),
            FormKind::Shield | FormKind::Torch => (Gearslot::Left, extra),
            FormKind::Spell(hands) => {
                let slot = match hands {
                    SpellHands::Either => either,
                    SpellHands::Left => Gearslot::Left,
                    SpellHands::Right | SpellHands::Both => Gearslot::Right,
                    SpellHands::Voice => Gearslot::Voice,
                };
                (slot, ExtraData::default())
            }
            FormKind::Shout => (Gearslot::Voice, ExtraData::default()),
            FormKind::Ammo => (Gearslot::Ammo, ExtraData::default()),
            FormKind::Other => return None,
        };
        Some(Gear { form, slot, extra })
    }

    /// Gear currently equipped in `slot`, if any
    pub fn from_equipped(actor: &dyn HostActor, slot: Gearslot) -> Option<Gear> {
        let form = match slot {
            Gearslot::Left | Gearslot::Right => actor.equipped(slot.hand()?)?,
            Gearslot::Ammo => actor.current_ammo()?,
            Gearslot::Voice => actor.selected_power()?,
        };
        let kind = actor.form_kind(form);
        let allowed = match slot {
            Gearslot::Left => matches!(
                kind,
                FormKind::Spell(_) | FormKind::Weapon { .. } | FormKind::Torch | FormKind::Shield
            ),
            Gearslot::Right => matches!(kind, FormKind::Spell(_) | FormKind::Weapon { .. }),
            Gearslot::Ammo => kind == FormKind::Ammo,
            Gearslot::Voice => matches!(kind, FormKind::Spell(SpellHands::Voice) | FormKind::Shout),
        };
        if !allowed {
            tracing::trace!("{} in {} is not gear ({:?})", form, slot, kind);
            return None;
        }

        let extra = match (kind, slot.hand()) {
            (FormKind::Weapon { .. } | FormKind::Torch | FormKind::Shield, Some(hand)) => {
                actor.equipped_extra(hand).unwrap_or_default()
            }
            _ => ExtraData::default(),
        };
        // a two-handed item seen from the left hand belongs to the right slot
        Gear::from_form(kind, form, slot == Gearslot::Left, extra).filter(|g| g.slot == slot)
    }

    #[inline]
    pub fn form(&self) -> FormRef {
        self.form
    }

    #[inline]
    pub fn slot(&self) -> Gearslot {
        self.slot
    }

    #[inline]
    pub fn extra(&self) -> &ExtraData {
        &self.extra
    }

    /// Equip this gear on the actor
    ///
    /// Spells and shouts must be known; items must be carried with matching
    /// extra data. Refusals are traced and otherwise ignored.
    pub fn equip(&self, actor: &dyn HostActor) {
        let kind = actor.form_kind(self.form);
        match kind {
            FormKind::Spell(hands) => {
                if !actor.has_spell(self.form) {
                    tracing::trace!("spell {} not known, skipping", self.form);
                    return;
                }
                let slot = if hands == SpellHands::Both {
                    EquipSlot::Both
                } else {
                    self.slot.equip_slot()
                };
                if !actor.equip_spell(self.form, slot) {
                    tracing::trace!("host refused spell {} into {:?}", self.form, slot);
                }
            }
            FormKind::Shout => {
                if !actor.has_shout(self.form) {
                    tracing::trace!("shout {} not known, skipping", self.form);
                    return;
                }
                if !actor.equip_shout(self.form) {
                    tracing::trace!("host refused shout {}", self.form);
                }
            }
            FormKind::Weapon { .. } | FormKind::Shield | FormKind::Torch | FormKind::Ammo => {
                self.equip_object(actor, kind)
            }
            FormKind::Other => tracing::trace!("form {} is no longer gear", self.form),
        }
    }

    fn equip_object(&self, actor: &dyn HostActor, kind: FormKind) {
        let form = self.form;
        let items = actor.inventory(&|f| f == form);
        let Some(item) = items.first() else {
            tracing::trace!("{} not in inventory", form);
            return;
        };

        let extra = match item.extra_lists.iter().find(|x| x.matches(&self.extra)) {
            Some(x) => Some(*x),
            None if self.extra.is_plain() && item.plain_count() > 0 => None,
            None => {
                tracing::trace!("no stack of {} matches {:?}", form, self.extra);
                return;
            }
        };
        let (count, slot) = match kind {
            FormKind::Ammo => (item.count, None),
            FormKind::Weapon { .. } => (1, Some(self.slot.equip_slot())),
            _ => (1, None),
        };
        if !actor.equip_object(form, extra.as_ref(), count, slot) {
            tracing::trace!("host refused {} into {}", form, self.slot);
        }
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.slot, self.form)?;
        if self.extra.is_tempered() {
            write!(f, " (tempered {:.2})", self.extra.tempering)?;
        }
        if let Some(ench) = self.extra.enchantment {
            write!(f, " (enchanted {})", ench)?;
        }
        Ok(())
    }
}

/// Empty `slot` on the actor
///
/// Hands are emptied by equipping and then unequipping the host's dummy
/// weapon in that hand.
pub fn unequip(actor: &dyn HostActor, slot: Gearslot) {
    match slot {
        Gearslot::Left | Gearslot::Right => {
            let Some(dummy) = actor.dummy_weapon() else {
                tracing::error!("dummy weapon missing, cannot empty {}", slot);
                return;
            };
            let equip_slot = Some(slot.equip_slot());
            if !actor.equip_object(dummy, None, 1, equip_slot) {
                tracing::trace!("host refused dummy weapon into {}", slot);
            }
            actor.unequip_object(dummy, equip_slot);
        }
        Gearslot::Ammo => {
            if let Some(ammo) = actor.current_ammo() {
                actor.unequip_object(ammo, None);
            }
        }
        Gearslot::Voice => {
            let Some(power) = actor.selected_power() else {
                return;
            };
            match actor.form_kind(power) {
                FormKind::Shout => {
                    actor.unequip_shout(power);
                }
                FormKind::Spell(_) => {
                    actor.unequip_spell(power, EquipSlot::Voice);
                }
                kind => tracing::trace!("unexpected {:?} in voice slot", kind),
            }
        }
    }
}

/// What an equipset does to one slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GearAction {
    Equip(Gear),
    Clear(Gearslot),
}

impl GearAction {
    pub fn slot(&self) -> Gearslot {
        match self {
            GearAction::Equip(gear) => gear.slot(),
            GearAction::Clear(slot) => *slot,
        }
    }

    /// Position of this action in an equipset's actuation order
    ///
    /// Clearing the left hand must precede equipping the right (a two-handed
    /// weapon occupies both). Equipping the right hand must precede any ammo
    /// action (bows auto-equip ammo).
    pub fn actuation_index(&self) -> u8 {
        match self {
            GearAction::Equip(gear) => match gear.slot() {
                Gearslot::Left => 0,
                Gearslot::Right => 10,
                Gearslot::Ammo => 11,
                Gearslot::Voice => 12,
            },
            GearAction::Clear(slot) => match slot {
                Gearslot::Left => 1,
                Gearslot::Right => 20,
                Gearslot::Ammo => 21,
                Gearslot::Voice => 22,
            },
        }
    }

    pub fn apply(&self, actor: &dyn HostActor) {
        match self {
            GearAction::Equip(gear) => gear.equip(actor),
            GearAction::Clear(slot) => unequip(actor, *slot),
        }
    }
}

impl fmt::Display for GearAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GearAction::Equip(gear) => write!(f, "{}", gear),
            GearAction::Clear(slot) => write!(f, "{}: (clear)", slot),
        }
    }
}
