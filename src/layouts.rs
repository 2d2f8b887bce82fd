use crate::error::{KbdError, KbdResult};
use crate::key::Key;
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Named logical layouts: the order in which the 26 letters appear on a
/// keyboard, read row by row.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogicalLayout {
    Qwerty,
    Azerty,
    Qwertz,
    Dvorak,
    Colemak,
    ColemakDh,
    Workman,
}

impl LogicalLayout {
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Qwerty => "qwertyuiopasdfghjklzxcvbnm",
            Self::Azerty => "azertyuiopqsdfghjklmwxcvbn",
            Self::Qwertz => "qwertzuiopasdfghjklyxcvbnm",
            // Letters only; Dvorak's punctuation keys are left alone.
            Self::Dvorak => "pyfgcrlaoeuidhtnsqjkxbmwvz",
            Self::Colemak => "qwfpgjluyarstdhneiozxcvbkm",
            Self::ColemakDh => "qwfpbjluyarstgmneiozxcdvkh",
            Self::Workman => "qdrwbjfupashtgyneoizxmcvkl",
        }
    }
}

/// Logical layout of the hand-authored reference keyboard, and therefore
/// of every exported `.keyboard` file.
pub const REFERENCE_LAYOUT: LogicalLayout = LogicalLayout::Azerty;

/// Default logical layout offered to users.
pub const DEFAULT_LAYOUT: LogicalLayout = LogicalLayout::Qwerty;

/// Names of the known logical layouts, default first.
pub fn get_keyboard_layouts() -> Vec<String> {
    LogicalLayout::iter().map(|l| l.to_string()).collect()
}

/// Resolves a layout name (`qwerty`, `AZERTY`, ...) or a raw 26-letter
/// permutation of `a..z` into the layout string.
pub fn resolve_layout_string(name: &str) -> KbdResult<String> {
    if let Ok(layout) = LogicalLayout::from_str(name.trim()) {
        return Ok(layout.get_str().to_string());
    }

    let raw = name.trim().to_lowercase();
    if is_alphabet_permutation(&raw) {
        Ok(raw)
    } else {
        Err(KbdError::InvalidLayout(format!(
            "'{}' is neither a known layout nor a permutation of a..z",
            name
        )))
    }
}

fn is_alphabet_permutation(s: &str) -> bool {
    let letters: BTreeSet<char> = s.chars().collect();
    s.chars().count() == 26 && letters.len() == 26 && letters.iter().all(|c| c.is_ascii_lowercase())
}

/// Character substitution table between two logical layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharMap {
    map: HashMap<char, char>,
}

impl CharMap {
    /// Maps the i-th character of `from` to the i-th character of `to`,
    /// mirrored for uppercase.
    pub fn between(from: &str, to: &str) -> KbdResult<Self> {
        let from: Vec<char> = from.chars().collect();
        let to: Vec<char> = to.chars().collect();
        if from.len() != to.len() {
            return Err(KbdError::InvalidLayout(format!(
                "layout strings differ in length ({} vs {})",
                from.len(),
                to.len()
            )));
        }

        let mut map = HashMap::with_capacity(from.len() * 2);
        for (&src, &dst) in from.iter().zip(&to) {
            map.insert(src, dst);
        }
        for (&src, &dst) in from.iter().zip(&to) {
            if let (Some(upper_src), Some(upper_dst)) = (single_upper(src), single_upper(dst)) {
                map.insert(upper_src, upper_dst);
            }
        }
        Ok(Self { map })
    }

    pub fn from_pairs<I: IntoIterator<Item = (char, char)>>(pairs: I) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    /// Mapped character, or `c` itself when the table has no entry.
    pub fn apply(&self, c: char) -> char {
        self.map.get(&c).copied().unwrap_or(c)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn single_upper(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

pub fn convert_layout_text(text: &str, char_map: &CharMap) -> String {
    text.chars().map(|c| char_map.apply(c)).collect()
}

/// Remaps the characters of every regular key. Control keys, spans and
/// positions are untouched.
pub fn convert_layout_keys(keys: &[Key], char_map: &CharMap) -> Vec<Key> {
    keys.iter()
        .map(|key| {
            if key.is_regular() {
                key.with_characters(convert_layout_text(key.characters(), char_map))
            } else {
                key.clone()
            }
        })
        .collect()
}
