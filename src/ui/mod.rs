//! Hotkey editor state
//!
//! The immediate-mode drawing lives with the host's renderer; this module
//! holds everything it reads and the commands it produces.

mod profiles;
mod state;
mod view_model;

pub use profiles::{normalize_profile_name, ProfileStore, MAX_PROFILE_NAME};
pub use state::{UiCmd, UiState};
pub use view_model::{Choice, EquipsetUi, HotkeyUi, HotkeysUi, SlotUi};
