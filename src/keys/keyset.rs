//! Chords (keysets) and ordered chord lists with press/hold classification
//!
//! A held chord plus a fresh press of any other button in the same batch,
//! bound to a hotkey or not (a movement key, say), classifies as a press.

use std::fmt;

use super::keystroke::{Keystroke, HOLD_THRESHOLD};
use super::registry::{self, UNBOUND};

/// Maximum number of buttons in one chord
pub const KEYSET_WIDTH: usize = 4;

/// How a set of currently pressed buttons satisfies a chord
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeysetMatch {
    /// No chord is fully pressed
    None,
    /// Chord went down this frame
    Press,
    /// Chord held, but not yet past the hold threshold
    Semihold,
    /// Chord held past the hold threshold
    Hold,
}

impl KeysetMatch {
    fn classify(min_held: f32) -> Self {
        if min_held >= HOLD_THRESHOLD {
            KeysetMatch::Hold
        } else if min_held > 0.0 {
            KeysetMatch::Semihold
        } else {
            KeysetMatch::Press
        }
    }
}

/// Up to four keycodes that must be pressed together
///
/// Always normalized: invalid codes become [`UNBOUND`], valid codes come
/// first (keeping their relative order) and appear at most once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keyset([u32; KEYSET_WIDTH]);

impl Keyset {
    pub fn new(codes: [u32; KEYSET_WIDTH]) -> Self {
        Self::from_codes(codes)
    }

    /// Build from any sequence of codes, keeping the first four distinct valid ones
    pub fn from_codes(codes: impl IntoIterator<Item = u32>) -> Self {
        let mut out = [UNBOUND; KEYSET_WIDTH];
        let mut len = 0;
        for code in codes {
            if len == KEYSET_WIDTH {
                break;
            }
            if registry::is_valid(code) && !out[..len].contains(&code) {
                out[len] = code;
                len += 1;
            }
        }
        Self(out)
    }

    /// Build from canonical key names; unknown names are dropped
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::from_codes(names.into_iter().map(|n| registry::code_of(n.as_ref())))
    }

    /// All four slots, sentinels included
    #[inline]
    pub fn raw(&self) -> [u32; KEYSET_WIDTH] {
        self.0
    }

    /// The bound (non-sentinel) codes
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied().take_while(|&c| c != UNBOUND)
    }

    pub fn len(&self) -> usize {
        self.codes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == UNBOUND
    }

    pub fn contains(&self, code: u32) -> bool {
        code != UNBOUND && self.0.contains(&code)
    }

    /// Canonical names of the bound codes
    pub fn names(&self) -> Vec<&'static str> {
        self.codes().map(registry::name_of).collect()
    }

    /// Minimum held duration over this chord's codes, if all of them are pressed
    fn min_held(&self, keystrokes: &[Keystroke]) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let mut min = f32::INFINITY;
        for code in self.codes() {
            let stroke = keystrokes.iter().find(|k| k.code() == code)?;
            min = min.min(stroke.held());
        }
        Some(min)
    }
}

impl fmt::Display for Keyset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join("+"))
    }
}

/// Ordered list of chords; the first satisfied chord decides the match
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keysets(Vec<Keyset>);

impl Keysets {
    /// Create from a list, dropping empty keysets
    pub fn new(keysets: Vec<Keyset>) -> Self {
        Self(keysets.into_iter().filter(|ks| !ks.is_empty()).collect())
    }

    pub fn as_slice(&self) -> &[Keyset] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyset> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Classify the pressed buttons against these chords
    ///
    /// The first chord whose codes are all pressed is classified by the
    /// shortest held duration among its codes. A batch that also carries a
    /// button pressed this frame counts as a press, since the user just
    /// tapped something while the chord was down.
    pub fn match_keystrokes(&self, keystrokes: &[Keystroke]) -> KeysetMatch {
        for keyset in &self.0 {
            if let Some(min_held) = keyset.min_held(keystrokes) {
                if keystrokes.iter().any(Keystroke::is_fresh) {
                    return KeysetMatch::Press;
                }
                return KeysetMatch::classify(min_held);
            }
        }
        KeysetMatch::None
    }
}

impl From<Vec<Keyset>> for Keysets {
    fn from(keysets: Vec<Keyset>) -> Self {
        Self::new(keysets)
    }
}

impl<'a> IntoIterator for &'a Keysets {
    type Item = &'a Keyset;
    type IntoIter = std::slice::Iter<'a, Keyset>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ks(codes: &[(u32, f32)]) -> Vec<Keystroke> {
        codes
            .iter()
            .map(|&(c, h)| Keystroke::new(c, h).unwrap())
            .collect()
    }

    #[test]
    fn test_normalize_invalid_to_sentinel() {
        let set = Keyset::new([0, 999, 2, 0]);
        assert_eq!(set.raw(), [2, 0, 0, 0]);
    }

    #[test]
    fn test_normalize_valid_first_in_order() {
        let set = Keyset::new([0, 3, 0, 2]);
        assert_eq!(set.raw(), [3, 2, 0, 0]);
    }

    #[test]
    fn test_normalize_removes_duplicates() {
        let set = Keyset::new([2, 2, 3, 2]);
        assert_eq!(set.raw(), [2, 3, 0, 0]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_normalized_ordering_property() {
        // valid codes never follow a sentinel and never repeat
        let inputs = [
            [0, 0, 0, 1],
            [5, 0, 5, 6],
            [300, 1, 256, 1],
            [266, 281, 282, 0],
        ];
        for input in inputs {
            let v = Keyset::new(input).raw();
            for i in 0..KEYSET_WIDTH {
                for j in i + 1..KEYSET_WIDTH {
                    assert!(registry::is_valid(v[i]) || !registry::is_valid(v[j]));
                    if registry::is_valid(v[i]) && registry::is_valid(v[j]) {
                        assert_ne!(v[i], v[j]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_names() {
        let set = Keyset::from_names(["leftshift", "bogus", "e"]);
        assert_eq!(set.names(), vec!["leftshift", "e"]);
        assert_eq!(set.to_string(), "leftshift+e");
    }

    #[test]
    fn test_keysets_prune_empty() {
        let sets = Keysets::new(vec![Keyset::default(), Keyset::new([1, 0, 0, 0])]);
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn test_match_press_semihold_hold() {
        let sets = Keysets::new(vec![Keyset::new([1, 2, 0, 0])]);
        assert_eq!(sets.match_keystrokes(&ks(&[(1, 0.0), (2, 0.0)])), KeysetMatch::Press);
        assert_eq!(
            sets.match_keystrokes(&ks(&[(1, 0.7), (2, 0.2)])),
            KeysetMatch::Semihold
        );
        assert_eq!(sets.match_keystrokes(&ks(&[(1, 0.7), (2, 0.5)])), KeysetMatch::Hold);
    }

    #[test]
    fn test_match_requires_all_codes() {
        let sets = Keysets::new(vec![Keyset::new([1, 2, 0, 0])]);
        assert_eq!(sets.match_keystrokes(&ks(&[(1, 0.0)])), KeysetMatch::None);
        assert_eq!(sets.match_keystrokes(&[]), KeysetMatch::None);
    }

    #[test]
    fn test_match_extra_keys_allowed() {
        let sets = Keysets::new(vec![Keyset::new([1, 0, 0, 0])]);
        assert_eq!(sets.match_keystrokes(&ks(&[(1, 0.6), (5, 0.6)])), KeysetMatch::Hold);
    }

    #[test]
    fn test_fresh_press_in_batch_is_press() {
        let sets = Keysets::new(vec![Keyset::new([1, 0, 0, 0])]);
        assert_eq!(sets.match_keystrokes(&ks(&[(1, 0.5), (3, 0.0)])), KeysetMatch::Press);
    }

    #[test]
    fn test_first_match_wins() {
        let sets = Keysets::new(vec![Keyset::new([1, 2, 0, 0]), Keyset::new([3, 0, 0, 0])]);
        // second keyset is held, but the first one is the press
        assert_eq!(
            sets.match_keystrokes(&ks(&[(3, 0.6), (1, 0.1), (2, 0.1)])),
            KeysetMatch::Semihold
        );
    }
}
