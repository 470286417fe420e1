//! Equipment slots an equipset can act on

use std::fmt;

use crate::host::{EquipSlot, Hand};

/// One of the four slots an equipset controls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gearslot {
    Left = 0,
    Right = 1,
    Ammo = 2,
    Voice = 3,
}

impl Gearslot {
    pub const COUNT: usize = 4;
    pub const ALL: [Gearslot; Gearslot::COUNT] =
        [Gearslot::Left, Gearslot::Right, Gearslot::Ammo, Gearslot::Voice];

    /// Slot for its serialized index
    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Equip-slot form the host wants for equipping into this slot
    pub fn equip_slot(self) -> EquipSlot {
        match self {
            Gearslot::Left => EquipSlot::Left,
            Gearslot::Right => EquipSlot::Right,
            Gearslot::Ammo => EquipSlot::Either,
            Gearslot::Voice => EquipSlot::Voice,
        }
    }

    pub fn hand(self) -> Option<Hand> {
        match self {
            Gearslot::Left => Some(Hand::Left),
            Gearslot::Right => Some(Hand::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Gearslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gearslot::Left => write!(f, "Left Hand"),
            Gearslot::Right => write!(f, "Right Hand"),
            Gearslot::Ammo => write!(f, "Ammo"),
            Gearslot::Voice => write!(f, "Power/Shout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for slot in Gearslot::ALL {
            assert_eq!(Gearslot::from_index(slot.index() as u8), Some(slot));
        }
        assert_eq!(Gearslot::from_index(4), None);
    }

    #[test]
    fn test_hands() {
        assert_eq!(Gearslot::Left.hand(), Some(Hand::Left));
        assert_eq!(Gearslot::Voice.hand(), None);
    }
}
