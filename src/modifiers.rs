use crate::key::KeyType;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Modifier keys the layout model tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum Modifier {
    Shift,
    CapsLock,
    Ctrl,
    Alt,
    AltGr,
}

impl Modifier {
    fn bit(self) -> u8 {
        match self {
            Self::Shift => 0b0_0001,
            Self::CapsLock => 0b0_0010,
            Self::Ctrl => 0b0_0100,
            Self::Alt => 0b0_1000,
            Self::AltGr => 0b1_0000,
        }
    }

    /// The modifier a control key latches. The on-screen `Alt` key acts
    /// as alt-gr for character selection.
    pub fn from_key_type(key_type: KeyType) -> Option<Self> {
        match key_type {
            KeyType::Shift => Some(Self::Shift),
            KeyType::CapsLock => Some(Self::CapsLock),
            KeyType::Ctrl => Some(Self::Ctrl),
            KeyType::Alt => Some(Self::AltGr),
            _ => None,
        }
    }
}

/// Set of held modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);

    pub fn from_slice(modifiers: &[Modifier]) -> Self {
        modifiers.iter().fold(Self::NONE, |set, m| set.with(*m))
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn remove(&mut self, modifier: Modifier) {
        self.0 &= !modifier.bit();
    }

    pub fn toggle(&mut self, modifier: Modifier) {
        self.0 ^= modifier.bit();
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::iter().filter(move |m| self.contains(*m))
    }

    /// Shift is in effect when either shift or caps lock is held.
    pub fn shifted(self) -> bool {
        self.contains(Modifier::Shift) || self.contains(Modifier::CapsLock)
    }
}

/// Sticky modifier latch behind an on-screen keyboard.
///
/// Tapping a modifier key toggles it; typing a character key releases
/// every latched modifier.
#[derive(Debug, Clone, Default)]
pub struct ModifierState {
    held: Modifiers,
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a tap on a key of `key_type`. Returns whether the key was a
    /// modifier (and therefore changed the latch).
    pub fn press(&mut self, key_type: KeyType) -> bool {
        match Modifier::from_key_type(key_type) {
            Some(modifier) => {
                self.held.toggle(modifier);
                true
            }
            None => false,
        }
    }

    pub fn is_pressed(&self, modifier: Modifier) -> bool {
        self.held.contains(modifier)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.held
    }

    /// Character level selected by the latch: +1 for shift or caps lock,
    /// +2 for alt-gr.
    pub fn level(&self) -> usize {
        let mut level = 0;
        if self.held.shifted() {
            level += 1;
        }
        if self.held.contains(Modifier::AltGr) {
            level += 2;
        }
        level
    }

    pub fn clear(&mut self) {
        self.held = Modifiers::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_disjoint() {
        let all = Modifier::iter().fold(0u8, |acc, m| {
            assert_eq!(acc & m.bit(), 0);
            acc | m.bit()
        });
        assert_eq!(all.count_ones(), 5);
    }

    #[test]
    fn test_iter_reports_members_in_order() {
        let set = Modifiers::from_slice(&[Modifier::AltGr, Modifier::Shift]);
        let members: Vec<_> = set.iter().collect();
        assert_eq!(members, vec![Modifier::Shift, Modifier::AltGr]);
    }
}
