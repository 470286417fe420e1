//! Equipsets (per-slot action plans) and the cycling list they live in

use std::fmt;

use crate::host::{Hand, HostActor};

use super::gear::{Gear, GearAction};
use super::slot::Gearslot;

/// What the hotkey engine cycles through
///
/// Implemented by [`Equipset`]; plain strings implement it too so the engine
/// can be exercised without any gear.
pub trait EquipsetLike: Clone + PartialEq {
    /// Empty entries are pruned from [`Equipsets`]
    fn is_empty(&self) -> bool;
}

/// Ordered plan of at most one action per slot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Equipset(Vec<GearAction>);

impl Equipset {
    /// Create from actions, keeping the first action for each slot and
    /// sorting by actuation order
    pub fn new(actions: impl IntoIterator<Item = GearAction>) -> Self {
        let mut out: Vec<GearAction> = Vec::with_capacity(Gearslot::COUNT);
        for action in actions {
            if out.iter().all(|a| a.slot() != action.slot()) {
                out.push(action);
            }
        }
        out.sort_by_key(GearAction::actuation_index);
        Self(out)
    }

    /// Snapshot what the actor has equipped right now
    ///
    /// With `clear_empty_slots`, empty slots become clear actions so that
    /// applying the set reproduces the empty slot too.
    pub fn from_equipped(actor: &dyn HostActor, clear_empty_slots: bool) -> Self {
        let actions = Gearslot::ALL.into_iter().filter_map(|slot| {
            if let Some(gear) = Gear::from_equipped(actor, slot) {
                return Some(GearAction::Equip(gear));
            }
            (clear_empty_slots && slot_is_empty(actor, slot)).then_some(GearAction::Clear(slot))
        });
        Self::new(actions)
    }

    pub fn actions(&self) -> &[GearAction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Action for `slot`, if the set touches it
    pub fn get(&self, slot: Gearslot) -> Option<&GearAction> {
        self.0.iter().find(|a| a.slot() == slot)
    }

    /// Drive the actor's equipment in actuation order
    pub fn apply(&self, actor: &dyn HostActor) {
        for action in &self.0 {
            tracing::trace!("apply {}", action);
            action.apply(actor);
        }
    }
}

fn slot_is_empty(actor: &dyn HostActor, slot: Gearslot) -> bool {
    match slot {
        Gearslot::Left => actor.equipped(Hand::Left).is_none(),
        Gearslot::Right => actor.equipped(Hand::Right).is_none(),
        Gearslot::Ammo => actor.current_ammo().is_none(),
        Gearslot::Voice => actor.selected_power().is_none(),
    }
}

impl EquipsetLike for Equipset {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl EquipsetLike for String {
    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

impl EquipsetLike for &str {
    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

impl fmt::Display for Equipset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|a| a.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// A list of equipsets with a cursor on the one to apply next
#[derive(Clone, Debug, PartialEq)]
pub struct Equipsets<Q> {
    items: Vec<Q>,
    selected: usize,
}

impl<Q: EquipsetLike> Equipsets<Q> {
    /// Create from a list, dropping empty entries
    pub fn new(items: Vec<Q>) -> Self {
        Self {
            items: items.into_iter().filter(|q| !q.is_empty()).collect(),
            selected: 0,
        }
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn get_selected(&self) -> Option<&Q> {
        self.items.get(self.selected)
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Advance the cursor, wrapping past the end
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Move the cursor to `idx`, falling back to the first entry when out of range
    pub fn select(&mut self, idx: usize) {
        self.selected = if idx < self.items.len() { idx } else { 0 };
    }

    pub fn as_slice(&self) -> &[Q] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Q> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<Q: EquipsetLike> Default for Equipsets<Q> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
