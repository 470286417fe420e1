//! Gear, per-slot actions, and equipsets
//!
//! ```text
//! Gear ─┐
//!       ├─ GearAction::{Equip, Clear} ─ Equipset ─ Equipsets (cycling cursor)
//! slot ─┘
//! ```

#[allow(clippy::module_inception)]
mod gear;
mod equipset;
mod slot;

pub use equipset::{EquipsetLike, Equipset, Equipsets};
pub use gear::{unequip, Gear, GearAction};
pub use slot::Gearslot;
