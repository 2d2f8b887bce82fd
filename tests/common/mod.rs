#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;
use univkbd::key::{Key, KeyType};
use univkbd::platform::table::TableProvider;

pub const TABLES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/translation_tables.tsv");

/// Builder for row lists, so tests read like the keyboards they describe.
#[derive(Default)]
pub struct RowsBuilder {
    rows: Vec<Vec<Key>>,
}

impl RowsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a row of unit-width regular keys.
    pub fn letters(mut self, keys: &[&str]) -> Self {
        self.rows
            .push(keys.iter().map(|c| Key::regular(*c, 1.0, 1.0)).collect());
        self
    }

    pub fn key(mut self, key: Key) -> Self {
        match self.rows.last_mut() {
            Some(row) => row.push(key),
            None => self.rows.push(vec![key]),
        }
        self
    }

    pub fn control(self, key_type: KeyType, x_span: f32) -> Self {
        self.key(Key::control(key_type, x_span, 1.0))
    }

    pub fn empty_row(mut self) -> Self {
        self.rows.push(Vec::new());
        self
    }

    pub fn build(self) -> Vec<Vec<Key>> {
        self.rows
    }
}

/// The translation tables shipped in `data/`.
pub fn shipped_tables() -> TableProvider {
    TableProvider::load_from_file(TABLES_PATH).unwrap()
}

/// Writes `lines` as a tab-separated table file.
pub fn write_table(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

/// Regular-key characters in keyboard order.
pub fn regular_characters(keys: &[Key]) -> Vec<String> {
    keys.iter()
        .filter(|k| k.is_regular())
        .map(|k| k.characters().to_string())
        .collect()
}
