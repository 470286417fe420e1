//! Adapter from host button events to keystroke snapshots

use super::keystroke::Keystroke;
use super::registry::{self, InputDevice};

/// A raw button event as delivered by the host's input hook
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    pub device: InputDevice,
    /// Device-specific id (scancode, mouse button index, gamepad mask)
    pub id_code: u32,
    /// True while the button is down
    pub pressed: bool,
    /// Seconds the button has been down
    pub held_secs: f32,
}

impl InputEvent {
    pub fn new(device: InputDevice, id_code: u32, pressed: bool, held_secs: f32) -> Self {
        Self {
            device,
            id_code,
            pressed,
            held_secs,
        }
    }

    /// Keyboard event for a button that is down
    pub fn key_down(scancode: u32, held_secs: f32) -> Self {
        Self::new(InputDevice::Keyboard, scancode, true, held_secs)
    }

    /// Keyboard event for a button that was released
    pub fn key_up(scancode: u32, held_secs: f32) -> Self {
        Self::new(InputDevice::Keyboard, scancode, false, held_secs)
    }

    /// Registry keycode for this event, or [`registry::UNBOUND`]
    pub fn keycode(&self) -> u32 {
        registry::translate(self.device, self.id_code)
    }

    /// Convert a pressed event into a keystroke
    ///
    /// Returns None for released buttons and ids without a keycode.
    pub fn to_keystroke(&self) -> Option<Keystroke> {
        if !self.pressed {
            return None;
        }
        Keystroke::new(self.keycode(), self.held_secs)
    }
}

/// Project a batch of host events into `buffer`, reusing its allocation
///
/// Only pressed buttons with a valid keycode survive.
pub fn keystrokes_from_events<'a>(
    events: impl IntoIterator<Item = &'a InputEvent>,
    buffer: &mut Vec<Keystroke>,
) {
    buffer.clear();
    buffer.extend(events.into_iter().filter_map(InputEvent::to_keystroke));
}
