//! Button chords for triggering hotkeys
//!
//! This module turns raw host button events into keystroke snapshots and
//! matches them against chords:
//! - Keycodes have canonical names shared by profiles and settings files
//! - A chord (keyset) is up to four buttons pressed together
//! - Matching classifies a satisfied chord as press, semi-hold or hold
//!
//! # Architecture
//!
//! ```text
//! InputEvent → Keystroke → Keysets::match_keystrokes() → KeysetMatch
//! ```

mod input;
mod keyset;
mod keystroke;
pub mod registry;

pub use input::{keystrokes_from_events, InputEvent};
pub use keyset::{KeysetMatch, Keyset, Keysets, KEYSET_WIDTH};
pub use keystroke::{Keystroke, HOLD_THRESHOLD};
pub use registry::{InputDevice, KEYCODE_COUNT, UNBOUND};
