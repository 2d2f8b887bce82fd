//! Country conversion: re-types the reference keyboard on another host
//! layout by going through virtual-key codes.

use crate::config::KeyboardConfig;
use crate::error::KbdResult;
use crate::key::Key;
use crate::keycodes::VirtualKey;
use crate::layouts::{convert_layout_keys, resolve_layout_string, CharMap, REFERENCE_LAYOUT};
use crate::modifiers::{Modifier, Modifiers};
use crate::platform::{LayoutProvider, LoadedLayout, Translation};
use crate::reference::french_azerty_rows;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a regular key did not survive conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum SkipReason {
    #[error("none of '{characters}' can be typed on the input layout")]
    NoVirtualKey { characters: String },
    #[error("virtual key 0x{vk:02X} types nothing on the output layout")]
    NoTranslation { vk: VirtualKey },
}

/// A dropped key and where it sat in the input rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedKey {
    pub row: usize,
    pub column: usize,
    pub characters: String,
    pub reason: SkipReason,
}

/// Converted rows plus the keys that were dropped along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    pub rows: Vec<Vec<Key>>,
    pub skipped: Vec<SkippedKey>,
}

impl Conversion {
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Modifier combinations sampled per key, in character-level order.
fn level_modifiers(shift_altgr: bool) -> Vec<Modifiers> {
    let mut levels = vec![
        Modifiers::NONE,
        Modifiers::NONE.with(Modifier::Shift),
        Modifiers::NONE.with(Modifier::AltGr),
    ];
    if shift_altgr {
        levels.push(Modifiers::from_slice(&[Modifier::Shift, Modifier::AltGr]));
    }
    levels
}

/// Converts one key. Control keys come back unchanged.
pub fn convert_key<P: LayoutProvider>(
    provider: &P,
    input: &P::Handle,
    output: &P::Handle,
    key: &Key,
    shift_altgr: bool,
) -> Result<Key, SkipReason> {
    if !key.is_regular() {
        return Ok(key.clone());
    }

    let vk = key
        .characters()
        .chars()
        .find_map(|c| provider.translate_character_to_code(c, input))
        .ok_or_else(|| SkipReason::NoVirtualKey {
            characters: key.characters().to_string(),
        })?;

    let mut glyphs = String::new();
    for modifiers in level_modifiers(shift_altgr) {
        match provider.translate_code_to_character(vk, output, modifiers) {
            Translation::Character(c) => glyphs.push(c),
            Translation::DeadKey => debug!("vk 0x{:02X} is a dead key under {:?}", vk, modifiers),
            Translation::NoMapping => {}
        }
    }

    if glyphs.is_empty() {
        return Err(SkipReason::NoTranslation { vk });
    }
    debug!("'{}' -> vk 0x{:02X} -> '{}'", key.characters(), vk, glyphs);
    Ok(key.with_characters(glyphs))
}

/// Re-types every regular key of `rows` from `input` onto `output`. Row
/// membership and order are kept; untranslatable keys are dropped and
/// reported in [`Conversion::skipped`].
pub fn convert_keyboard_to_country<P: LayoutProvider>(
    provider: &P,
    input: &P::Handle,
    output: &P::Handle,
    rows: &[Vec<Key>],
    shift_altgr: bool,
) -> Conversion {
    let mut conversion = Conversion::default();

    for (row_idx, row) in rows.iter().enumerate() {
        let mut converted = Vec::with_capacity(row.len());
        for (col_idx, key) in row.iter().enumerate() {
            match convert_key(provider, input, output, key, shift_altgr) {
                Ok(k) => converted.push(k),
                Err(reason) => {
                    warn!("Dropping key {}:{}: {}", row_idx, col_idx, reason);
                    conversion.skipped.push(SkippedKey {
                        row: row_idx,
                        column: col_idx,
                        characters: key.characters().to_string(),
                        reason,
                    });
                }
            }
        }
        conversion.rows.push(converted);
    }

    conversion
}

/// Full pipeline for one host layout: the reference rows converted to
/// `country`, then remapped from the reference logical layout to `layout`
/// (a catalogue name or a 26-letter permutation).
pub fn generate_country_rows<P: LayoutProvider>(
    provider: &P,
    country: &str,
    layout: &str,
    config: &KeyboardConfig,
) -> KbdResult<Conversion> {
    let target = resolve_layout_string(layout)?;
    let char_map = CharMap::between(REFERENCE_LAYOUT.get_str(), &target)?;

    let input = LoadedLayout::load(provider, &config.reference_country)?;
    let output = LoadedLayout::load(provider, country)?;

    let mut conversion = convert_keyboard_to_country(
        provider,
        input.handle(),
        output.handle(),
        &french_azerty_rows(),
        config.shift_altgr,
    );
    for row in conversion.rows.iter_mut() {
        *row = convert_layout_keys(row, &char_map);
    }

    info!(
        "Generated {} ({}): {} keys, {} dropped",
        output.name(),
        layout,
        conversion.key_count(),
        conversion.skipped.len()
    );
    Ok(conversion)
}
