//! Equipment hotkeys - bind button chords to cycling equipment sets
//!
//! This crate provides the engine and plugin glue for a game plugin that
//! equips whole sets of gear (both hands, ammo, power/shout) from chorded
//! hotkeys. The host game is reached through the traits in [`host`].

pub mod config_paths;
pub mod error;
pub mod events;
pub mod gear;
pub mod host;
pub mod hotkeys;
pub mod keys;
pub mod persist;
pub mod plugin;
pub mod tracing;
pub mod ui;

// Re-export commonly used types
pub use error::{Error, Result};
pub use events::Core;
pub use gear::{Equipset, Gear, GearAction, Gearslot};
pub use hotkeys::{Hotkey, Hotkeys};
pub use keys::{Keyset, Keysets, Keystroke};
