use crate::config::KeyboardConfig;
use crate::convert::generate_country_rows;
use crate::error::{KbdError, KbdResult};
use crate::key::{read_i32, write_i32, Key};
use crate::layouts::{convert_layout_keys, CharMap};
use crate::platform::{system_provider, LayoutProvider};
use crate::reference::french_azerty_rows;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Upper bound on up-front allocation when a record announces its key count.
const MAX_PREALLOCATED_KEYS: usize = 1024;

/// A full physical layout: keys in row-major placement order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyboard {
    keys: Vec<Key>,
}

impl Keyboard {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    /// Lays out `rows` top to bottom: each key's `x` is the sum of the
    /// spans before it in its row, `y` is the row index.
    pub fn from_rows(rows: Vec<Vec<Key>>) -> Self {
        let mut keys = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for (row_idx, row) in rows.into_iter().enumerate() {
            let mut x = 0.0f32;
            for mut key in row {
                key.place(x, row_idx as f32);
                x += key.x_span();
                keys.push(key);
            }
        }
        Self { keys }
    }

    /// The hand-authored French AZERTY keyboard.
    pub fn reference() -> Self {
        Self::from_rows(french_azerty_rows())
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys grouped by their `y` coordinate, in order.
    pub fn rows(&self) -> Vec<Vec<&Key>> {
        let mut rows: Vec<Vec<&Key>> = Vec::new();
        let mut current_y = None;
        for key in &self.keys {
            if current_y != Some(key.y()) {
                rows.push(Vec::new());
                current_y = Some(key.y());
            }
            if let Some(row) = rows.last_mut() {
                row.push(key);
            }
        }
        rows
    }

    /// Writes the key count followed by every key record.
    pub fn serialize<W: Write>(&self, out: &mut W) -> KbdResult<()> {
        let count = i32::try_from(self.keys.len()).map_err(|_| {
            KbdError::Validation(format!("{} keys do not fit a record", self.keys.len()))
        })?;
        write_i32(out, count)?;
        for key in &self.keys {
            key.serialize(out)?;
        }
        Ok(())
    }

    /// Reads one keyboard record. A stream cut short inside the record is
    /// an error; nothing after the record is consumed.
    pub fn deserialize<R: Read>(input: &mut R) -> KbdResult<Keyboard> {
        let count = read_i32(input)?;
        let count = usize::try_from(count)
            .map_err(|_| KbdError::Validation(format!("negative key count {}", count)))?;

        let mut keys = Vec::with_capacity(count.min(MAX_PREALLOCATED_KEYS));
        for _ in 0..count {
            keys.push(Key::deserialize(input)?);
        }
        Ok(Self { keys })
    }

    pub fn convert_layout_with(&self, char_map: &CharMap) -> Keyboard {
        Self {
            keys: convert_layout_keys(&self.keys, char_map),
        }
    }

    /// Remaps regular keys from the `from` letter order to the `to` one.
    pub fn convert_layout(&self, from: &str, to: &str) -> KbdResult<Keyboard> {
        Ok(self.convert_layout_with(&CharMap::between(from, to)?))
    }

    /// Builds the keyboard for `country` from `provider`'s tables.
    pub fn from_provider<P: LayoutProvider>(
        provider: &P,
        country: &str,
        layout: &str,
        config: &KeyboardConfig,
    ) -> KbdResult<Keyboard> {
        let conversion = generate_country_rows(provider, country, layout, config)?;
        Ok(Self::from_rows(conversion.rows))
    }

    /// Installed host layouts, sorted. Empty where the host has no provider.
    pub fn get_operating_system_keyboards() -> Vec<String> {
        system_provider().list_installed_layouts()
    }

    pub fn get_keyboard_from_operating_system(country: &str, layout: &str) -> KbdResult<Keyboard> {
        Self::from_provider(
            &system_provider(),
            country,
            layout,
            &KeyboardConfig::default(),
        )
    }

    /// Keyboard for the configured default country and logical layout.
    pub fn default_from_provider<P: LayoutProvider>(
        provider: &P,
        config: &KeyboardConfig,
    ) -> KbdResult<Keyboard> {
        Self::from_provider(provider, &config.default_country, &config.default_layout, config)
    }

    pub fn get_default_keyboard_from_operating_system() -> KbdResult<Keyboard> {
        Self::default_from_provider(&system_provider(), &KeyboardConfig::default())
    }
}
