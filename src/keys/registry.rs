//! Keycode registry: canonical names for keyboard, mouse and gamepad buttons
//!
//! Keycodes are laid out the way the host reports them:
//! - `1..=0xDD`   keyboard scancodes (identity)
//! - `256..=265`  mouse buttons and wheel
//! - `266..=281`  gamepad buttons
//!
//! Code `0` is the "unbound" sentinel and never has a name.

use std::fmt;

/// One past the highest keycode the registry knows about
pub const KEYCODE_COUNT: u32 = 282;

/// Sentinel for an empty keyset position
pub const UNBOUND: u32 = 0;

/// First mouse keycode (left mouse button)
pub const MOUSE_OFFSET: u32 = 256;

/// First gamepad keycode (dpad up)
pub const GAMEPAD_OFFSET: u32 = 266;

/// Device that produced a raw button event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputDevice {
    Keyboard,
    Mouse,
    Gamepad,
}

impl fmt::Display for InputDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputDevice::Keyboard => write!(f, "keyboard"),
            InputDevice::Mouse => write!(f, "mouse"),
            InputDevice::Gamepad => write!(f, "gamepad"),
        }
    }
}

/// Sorted by code so lookups can binary search
const KEY_NAMES: &[(u32, &str)] = &[
    // Keyboard
    (0x01, "escape"),
    (0x02, "1"),
    (0x03, "2"),
    (0x04, "3"),
    (0x05, "4"),
    (0x06, "5"),
    (0x07, "6"),
    (0x08, "7"),
    (0x09, "8"),
    (0x0A, "9"),
    (0x0B, "0"),
    (0x0C, "minus"),
    (0x0D, "equals"),
    (0x0E, "backspace"),
    (0x0F, "tab"),
    (0x10, "q"),
    (0x11, "w"),
    (0x12, "e"),
    (0x13, "r"),
    (0x14, "t"),
    (0x15, "y"),
    (0x16, "u"),
    (0x17, "i"),
    (0x18, "o"),
    (0x19, "p"),
    (0x1A, "leftbracket"),
    (0x1B, "rightbracket"),
    (0x1C, "enter"),
    (0x1D, "leftcontrol"),
    (0x1E, "a"),
    (0x1F, "s"),
    (0x20, "d"),
    (0x21, "f"),
    (0x22, "g"),
    (0x23, "h"),
    (0x24, "j"),
    (0x25, "k"),
    (0x26, "l"),
    (0x27, "semicolon"),
    (0x28, "apostrophe"),
    (0x29, "tilde"),
    (0x2A, "leftshift"),
    (0x2B, "backslash"),
    (0x2C, "z"),
    (0x2D, "x"),
    (0x2E, "c"),
    (0x2F, "v"),
    (0x30, "b"),
    (0x31, "n"),
    (0x32, "m"),
    (0x33, "comma"),
    (0x34, "period"),
    (0x35, "slash"),
    (0x36, "rightshift"),
    (0x37, "numpadmult"),
    (0x38, "leftalt"),
    (0x39, "spacebar"),
    (0x3A, "capslock"),
    (0x3B, "f1"),
    (0x3C, "f2"),
    (0x3D, "f3"),
    (0x3E, "f4"),
    (0x3F, "f5"),
    (0x40, "f6"),
    (0x41, "f7"),
    (0x42, "f8"),
    (0x43, "f9"),
    (0x44, "f10"),
    (0x45, "numlock"),
    (0x46, "scrolllock"),
    (0x47, "numpad7"),
    (0x48, "numpad8"),
    (0x49, "numpad9"),
    (0x4A, "numpadminus"),
    (0x4B, "numpad4"),
    (0x4C, "numpad5"),
    (0x4D, "numpad6"),
    (0x4E, "numpadplus"),
    (0x4F, "numpad1"),
    (0x50, "numpad2"),
    (0x51, "numpad3"),
    (0x52, "numpad0"),
    (0x53, "numpaddec"),
    (0x57, "f11"),
    (0x58, "f12"),
    (0x9C, "numpadenter"),
    (0x9D, "rightcontrol"),
    (0xB5, "numpaddivide"),
    (0xB7, "printscreen"),
    (0xB8, "rightalt"),
    (0xC5, "pause"),
    (0xC7, "home"),
    (0xC8, "uparrow"),
    (0xC9, "pageup"),
    (0xCB, "leftarrow"),
    (0xCD, "rightarrow"),
    (0xCF, "end"),
    (0xD0, "downarrow"),
    (0xD1, "pagedown"),
    (0xD2, "insert"),
    (0xD3, "delete"),
    (0xDB, "leftwin"),
    (0xDC, "rightwin"),
    (0xDD, "apps"),
    // Mouse
    (256, "leftmousebutton"),
    (257, "rightmousebutton"),
    (258, "middlemousebutton"),
    (259, "mousebutton3"),
    (260, "mousebutton4"),
    (261, "mousebutton5"),
    (262, "mousebutton6"),
    (263, "mousebutton7"),
    (264, "mousewheelup"),
    (265, "mousewheeldown"),
    // Gamepad
    (266, "gamepad_dpad_up"),
    (267, "gamepad_dpad_down"),
    (268, "gamepad_dpad_left"),
    (269, "gamepad_dpad_right"),
    (270, "gamepad_start"),
    (271, "gamepad_back"),
    (272, "gamepad_left_thumb"),
    (273, "gamepad_right_thumb"),
    (274, "gamepad_left_shoulder"),
    (275, "gamepad_right_shoulder"),
    (276, "gamepad_a"),
    (277, "gamepad_b"),
    (278, "gamepad_x"),
    (279, "gamepad_y"),
    (280, "gamepad_left_trigger"),
    (281, "gamepad_right_trigger"),
];

/// XInput button masks in gamepad keycode order. Triggers are reported by the
/// host as pseudo-masks 0x9 and 0xA.
const GAMEPAD_MASKS: [u32; 16] = [
    0x0001, 0x0002, 0x0004, 0x0008, 0x0010, 0x0020, 0x0040, 0x0080, 0x0100, 0x0200, 0x1000,
    0x2000, 0x4000, 0x8000, 0x0009, 0x000A,
];

/// Canonical name of a keycode, or `""` when the code is unmapped
pub fn name_of(code: u32) -> &'static str {
    KEY_NAMES
        .binary_search_by_key(&code, |&(c, _)| c)
        .map(|idx| KEY_NAMES[idx].1)
        .unwrap_or("")
}

/// Keycode for a canonical name, or [`UNBOUND`] when the name is unknown
///
/// Comparison is case-sensitive against the lowercase canonical form.
pub fn code_of(name: &str) -> u32 {
    if name.is_empty() {
        return UNBOUND;
    }
    KEY_NAMES
        .iter()
        .find(|&&(_, n)| n == name)
        .map(|&(c, _)| c)
        .unwrap_or(UNBOUND)
}

/// A keycode is valid iff it has a canonical name
#[inline]
pub fn is_valid(code: u32) -> bool {
    !name_of(code).is_empty()
}

/// Translate a raw device id code into a registry keycode
///
/// Returns [`UNBOUND`] for ids that have no keycode.
pub fn translate(device: InputDevice, id_code: u32) -> u32 {
    let code = match device {
        // each device stays inside its own code range
        InputDevice::Keyboard if id_code < MOUSE_OFFSET => id_code,
        InputDevice::Mouse if id_code < GAMEPAD_OFFSET - MOUSE_OFFSET => id_code + MOUSE_OFFSET,
        InputDevice::Keyboard | InputDevice::Mouse => UNBOUND,
        InputDevice::Gamepad => GAMEPAD_MASKS
            .iter()
            .position(|&mask| mask == id_code)
            .map(|idx| GAMEPAD_OFFSET + idx as u32)
            .unwrap_or(UNBOUND),
    };
    if is_valid(code) {
        code
    } else {
        UNBOUND
    }
}

/// Every named keycode, in code order (for key pickers)
pub fn all_named() -> impl Iterator<Item = (u32, &'static str)> {
    KEY_NAMES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_in_range() {
        for pair in KEY_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:?} before {:?}", pair[0], pair[1]);
        }
        assert!(KEY_NAMES.iter().all(|&(c, _)| c > 0 && c < KEYCODE_COUNT));
    }

    #[test]
    fn test_names_are_unique_lowercase() {
        for (i, &(_, a)) in KEY_NAMES.iter().enumerate() {
            assert_eq!(a, a.to_ascii_lowercase());
            assert!(KEY_NAMES[i + 1..].iter().all(|&(_, b)| a != b), "dup {}", a);
        }
    }

    #[test]
    fn test_name_code_roundtrip() {
        for (code, name) in all_named() {
            assert_eq!(code_of(name), code);
            assert_eq!(name_of(code), name);
        }
    }

    #[test]
    fn test_unbound_and_unknown() {
        assert_eq!(name_of(UNBOUND), "");
        assert!(!is_valid(UNBOUND));
        assert!(!is_valid(KEYCODE_COUNT));
        assert_eq!(code_of("nosuchkey"), UNBOUND);
        assert_eq!(code_of(""), UNBOUND);
    }

    #[test]
    fn test_names_case_sensitive() {
        assert_eq!(code_of("escape"), 1);
        assert_eq!(code_of("Escape"), UNBOUND);
    }

    #[test]
    fn test_translate_keyboard_identity() {
        assert_eq!(translate(InputDevice::Keyboard, 0x1E), 0x1E);
        assert_eq!(translate(InputDevice::Keyboard, 0x54), UNBOUND);
    }

    #[test]
    fn test_translate_mouse_offset() {
        assert_eq!(translate(InputDevice::Mouse, 0), 256);
        assert_eq!(name_of(translate(InputDevice::Mouse, 1)), "rightmousebutton");
        assert_eq!(translate(InputDevice::Mouse, 10), UNBOUND);
        assert_eq!(translate(InputDevice::Mouse, 25), UNBOUND);
        assert_eq!(translate(InputDevice::Mouse, u32::MAX), UNBOUND);
    }

    #[test]
    fn test_translate_never_crosses_devices() {
        for id in 0..1024 {
            let mouse = translate(InputDevice::Mouse, id);
            assert!(mouse == UNBOUND || (MOUSE_OFFSET..GAMEPAD_OFFSET).contains(&mouse));
            let key = translate(InputDevice::Keyboard, id);
            assert!(key < MOUSE_OFFSET, "keyboard id {} became {}", id, key);
        }
    }

    #[test]
    fn test_translate_gamepad_masks() {
        assert_eq!(translate(InputDevice::Gamepad, 0x0001), 266);
        assert_eq!(name_of(translate(InputDevice::Gamepad, 0x1000)), "gamepad_a");
        assert_eq!(
            name_of(translate(InputDevice::Gamepad, 0x000A)),
            "gamepad_right_trigger"
        );
        assert_eq!(translate(InputDevice::Gamepad, 0x0400), UNBOUND);
    }
}
