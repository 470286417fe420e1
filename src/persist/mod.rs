//! Saving and loading hotkeys and settings
//!
//! Profiles and the co-save share one serialized form ([`HotkeysIr`]);
//! profiles drop the cursors, the co-save keeps them.

pub mod cosave;
mod ir;
pub mod profile;
mod settings;

pub use cosave::{CosaveRecord, MemoryCosave, SaveRecords};
pub use ir::{GearIr, HotkeyIr, HotkeysIr};
pub use settings::{ColorStyle, LogLevel, Settings};
