//! A momentarily pressed button together with how long it has been held

use std::fmt;

use super::registry;

/// Seconds a chord must be held before it counts as a hold instead of a press
pub const HOLD_THRESHOLD: f32 = 0.5;

/// A pressed button: a valid keycode plus its held duration in seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keystroke {
    code: u32,
    held: f32,
}

impl Keystroke {
    /// Create a keystroke
    ///
    /// Returns None unless `code` is a registered keycode and `held` is a
    /// finite, non-negative number of seconds.
    pub fn new(code: u32, held: f32) -> Option<Self> {
        if !registry::is_valid(code) || !held.is_finite() || held < 0.0 {
            return None;
        }
        Some(Self { code, held })
    }

    /// Keystroke for a freshly pressed button
    pub fn pressed(code: u32) -> Option<Self> {
        Self::new(code, 0.0)
    }

    #[inline]
    pub fn code(&self) -> u32 {
        self.code
    }

    #[inline]
    pub fn held(&self) -> f32 {
        self.held
    }

    /// True on the frame the button went down
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.held == 0.0
    }

    /// True once the button has been held past [`HOLD_THRESHOLD`]
    #[inline]
    pub fn is_hold(&self) -> bool {
        self.held >= HOLD_THRESHOLD
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.2}s)", registry::name_of(self.code), self.held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keystroke() {
        let k = Keystroke::new(1, 0.25).unwrap();
        assert_eq!(k.code(), 1);
        assert_eq!(k.held(), 0.25);
        assert!(!k.is_fresh());
        assert!(!k.is_hold());
    }

    #[test]
    fn test_rejects_invalid_code() {
        assert!(Keystroke::new(0, 0.0).is_none());
        assert!(Keystroke::new(registry::KEYCODE_COUNT, 0.0).is_none());
    }

    #[test]
    fn test_rejects_bad_duration() {
        assert!(Keystroke::new(1, -0.1).is_none());
        assert!(Keystroke::new(1, f32::NAN).is_none());
        assert!(Keystroke::new(1, f32::INFINITY).is_none());
    }

    #[test]
    fn test_hold_threshold_inclusive() {
        assert!(Keystroke::new(1, HOLD_THRESHOLD).unwrap().is_hold());
        assert!(!Keystroke::new(1, 0.49).unwrap().is_hold());
    }

    #[test]
    fn test_display_uses_name() {
        let k = Keystroke::pressed(0x1E).unwrap();
        assert_eq!(k.to_string(), "a(0.00s)");
    }
}
