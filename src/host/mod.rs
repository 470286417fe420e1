//! Interfaces to the host game process
//!
//! Everything the plugin needs from the host (form metadata, the player's
//! equipment and inventory, equip calls, UI state, the clock) goes through
//! the [`Forms`] and [`HostActor`] traits. The real host binding lives in the
//! plugin loader; [`memory::MemoryHost`] is an in-process stand-in.

pub mod memory;

use std::fmt;

/// Opaque runtime form id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormRef(pub u32);

impl FormRef {
    /// Forms created at runtime (not from a plugin file)
    pub const DYNAMIC_PREFIX: u32 = 0xFF00_0000;

    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_dynamic(self) -> bool {
        self.0 >= Self::DYNAMIC_PREFIX
    }
}

impl fmt::Display for FormRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Load-order independent reference to a form: plugin file name plus local id
///
/// Dynamic forms carry an empty `modname` and their full runtime id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FormLocator {
    pub modname: String,
    pub id: u32,
}

impl FormLocator {
    pub fn new(modname: impl Into<String>, id: u32) -> Self {
        Self {
            modname: modname.into(),
            id,
        }
    }

    pub fn dynamic(form: FormRef) -> Self {
        Self {
            modname: String::new(),
            id: form.id(),
        }
    }
}

impl fmt::Display for FormLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modname.is_empty() {
            write!(f, "{:08X}", self.id)
        } else {
            write!(f, "{}|{:06X}", self.modname, self.id)
        }
    }
}

/// Which hands a spell can be cast from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpellHands {
    Either,
    Left,
    Right,
    Both,
    /// Powers and other voice-slot spells
    Voice,
}

/// The part of a form's type the plugin cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormKind {
    Weapon { two_handed: bool },
    Spell(SpellHands),
    Shout,
    Shield,
    Torch,
    Ammo,
    Other,
}

impl FormKind {
    /// Kinds whose equip events concern the plugin
    pub fn is_gear(self) -> bool {
        !matches!(self, FormKind::Other)
    }
}

/// Hand of the player's actor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

/// The host's equip-slot forms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EquipSlot {
    Left,
    Right,
    Either,
    Both,
    Voice,
}

/// Per-stack data that distinguishes otherwise identical items
///
/// `tempering` is NaN for untempered items.
#[derive(Clone, Copy, Debug)]
pub struct ExtraData {
    pub tempering: f32,
    pub enchantment: Option<FormRef>,
}

impl ExtraData {
    /// Tempering values closer than this are the same tempering
    pub const TEMPERING_EPSILON: f32 = 0.001;

    pub fn new(tempering: f32, enchantment: Option<FormRef>) -> Self {
        Self {
            tempering,
            enchantment,
        }
    }

    pub fn is_tempered(&self) -> bool {
        !self.tempering.is_nan()
    }

    pub fn is_plain(&self) -> bool {
        !self.is_tempered() && self.enchantment.is_none()
    }

    /// Same enchantment and (approximately) same tempering; NaN matches NaN
    pub fn matches(&self, other: &ExtraData) -> bool {
        if self.enchantment != other.enchantment {
            return false;
        }
        match (self.is_tempered(), other.is_tempered()) {
            (false, false) => true,
            (true, true) => (self.tempering - other.tempering).abs() < Self::TEMPERING_EPSILON,
            _ => false,
        }
    }
}

impl Default for ExtraData {
    fn default() -> Self {
        Self {
            tempering: f32::NAN,
            enchantment: None,
        }
    }
}

impl PartialEq for ExtraData {
    fn eq(&self, other: &Self) -> bool {
        self.enchantment == other.enchantment
            && (self.tempering == other.tempering
                || (self.tempering.is_nan() && other.tempering.is_nan()))
    }
}

/// One inventory entry: a form, how many the player carries, and the
/// extra-data lists of the stacks that carry any
#[derive(Clone, Debug, PartialEq)]
pub struct InventoryItem {
    pub form: FormRef,
    pub count: i32,
    pub extra_lists: Vec<ExtraData>,
}

impl InventoryItem {
    /// Number of items without any extra data
    pub fn plain_count(&self) -> i32 {
        self.count - self.extra_lists.len() as i32
    }
}

/// Host UI state relevant to firing hotkeys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    pub in_gameplay: bool,
    pub fighting_controls: bool,
    pub blocking_menu_open: bool,
    pub movement_controls: bool,
}

impl ControlState {
    /// Plain gameplay with every control enabled
    pub const GAMEPLAY: ControlState = ControlState {
        in_gameplay: true,
        fighting_controls: true,
        blocking_menu_open: false,
        movement_controls: true,
    };

    pub fn allows_hotkeys(&self) -> bool {
        self.in_gameplay
            && self.fighting_controls
            && !self.blocking_menu_open
            && self.movement_controls
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::GAMEPLAY
    }
}

/// An equipment change reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipEvent {
    /// The change happened on the player's actor
    pub is_player: bool,
    pub form: FormRef,
    /// Equipped (true) or unequipped (false)
    pub equipped: bool,
}

/// Form lookups
pub trait Forms {
    fn form_kind(&self, form: FormRef) -> FormKind;

    /// Stable reference for persisting `form`
    fn locate(&self, form: FormRef) -> Option<FormLocator>;

    /// Runtime form for a stable reference, if it is loaded
    fn resolve(&self, locator: &FormLocator) -> Option<FormRef>;
}

/// The player's actor plus the few engine services the plugin calls
///
/// Methods take `&self` because the host serializes these calls itself.
/// Equip calls return false when the host refused the request.
pub trait HostActor: Forms {
    /// This actor's form lookups as a plain [`Forms`] object
    fn as_forms(&self) -> &dyn Forms;

    fn equipped(&self, hand: Hand) -> Option<FormRef>;

    /// Extra data of the stack equipped in `hand`
    fn equipped_extra(&self, hand: Hand) -> Option<ExtraData>;

    fn current_ammo(&self) -> Option<FormRef>;

    /// Power or shout in the voice slot
    fn selected_power(&self) -> Option<FormRef>;

    fn has_spell(&self, form: FormRef) -> bool;

    fn has_shout(&self, form: FormRef) -> bool;

    /// Inventory entries whose form passes `filter`
    fn inventory(&self, filter: &dyn Fn(FormRef) -> bool) -> Vec<InventoryItem>;

    fn equip_object(
        &self,
        form: FormRef,
        extra: Option<&ExtraData>,
        count: i32,
        slot: Option<EquipSlot>,
    ) -> bool;

    fn equip_spell(&self, form: FormRef, slot: EquipSlot) -> bool;

    fn equip_shout(&self, form: FormRef) -> bool;

    fn unequip_object(&self, form: FormRef, slot: Option<EquipSlot>) -> bool;

    fn unequip_spell(&self, form: FormRef, slot: EquipSlot) -> bool;

    fn unequip_shout(&self, form: FormRef) -> bool;

    /// Placeholder weapon used to empty a hand
    fn dummy_weapon(&self) -> Option<FormRef>;

    /// Milliseconds since the game started running
    fn runtime_ms(&self) -> u32;

    fn control_state(&self) -> ControlState;

    /// Show a short on-screen notification
    fn notify(&self, message: &str);
}
