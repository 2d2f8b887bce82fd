//! Layout provider replaying translation tables read from a file.
//!
//! One tab-separated row per physical key:
//!
//! ```text
//! layout  vk  base  shift  altgr  shift_altgr
//! French  0x32  é  2  ~
//! French  0xDD  dead:^  dead:¨
//! ```
//!
//! `vk` is decimal or `0x` hex. An empty or missing cell means the key
//! types nothing at that level, `dead:<c>` marks a dead key. Lines
//! starting with `#` are comments.

use super::{LayoutProvider, Translation};
use crate::error::{KbdError, KbdResult};
use crate::keycodes::{parse_virtual_key, VirtualKey};
use crate::modifiers::{Modifier, Modifiers};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const LEVELS: usize = 4;
const DEAD_PREFIX: &str = "dead:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Char(char),
    Dead(char),
}

impl Cell {
    fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return Some(Cell::Empty);
        }
        let (dead, glyph) = match raw.strip_prefix(DEAD_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let mut chars = glyph.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if dead => Some(Cell::Dead(c)),
            (Some(c), None) => Some(Cell::Char(c)),
            _ => None,
        }
    }

    fn glyph(self) -> Option<char> {
        match self {
            Cell::Empty => None,
            Cell::Char(c) | Cell::Dead(c) => Some(c),
        }
    }

    fn translation(self) -> Translation {
        match self {
            Cell::Empty => Translation::NoMapping,
            Cell::Char(c) => Translation::Character(c),
            Cell::Dead(_) => Translation::DeadKey,
        }
    }
}

#[derive(Debug, Clone)]
struct LayoutTable {
    name: String,
    keys: Vec<(VirtualKey, [Cell; LEVELS])>,
}

impl LayoutTable {
    fn cells(&self, vk: VirtualKey) -> Option<&[Cell; LEVELS]> {
        self.keys.iter().find(|(k, _)| *k == vk).map(|(_, cells)| cells)
    }
}

/// Provider over in-memory translation tables. Handles are indices into
/// the loaded layouts.
#[derive(Debug, Clone, Default)]
pub struct TableProvider {
    layouts: Vec<LayoutTable>,
}

impl TableProvider {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KbdResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            KbdError::Config(format!(
                "Could not open translation tables at '{}': {}",
                path.display(),
                e
            ))
        })?;
        let provider = Self::from_reader(file)?;
        info!(
            "Loaded {} layouts from {}",
            provider.layouts.len(),
            path.display()
        );
        Ok(provider)
    }

    pub fn from_reader<R: Read>(reader: R) -> KbdResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .comment(Some(b'#'))
            .flexible(true)
            .from_reader(reader);

        let mut layouts: Vec<LayoutTable> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for result in rdr.records() {
            let rec = result?;
            let line = rec.position().map_or(0, |pos| pos.line());
            let name = rec.get(0).unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }

            let vk_raw = rec.get(1).unwrap_or("");
            let vk = parse_virtual_key(vk_raw).ok_or_else(|| {
                KbdError::Validation(format!("line {}: bad virtual key '{}'", line, vk_raw))
            })?;

            let mut cells = [Cell::Empty; LEVELS];
            for (level, cell) in cells.iter_mut().enumerate() {
                let raw = rec.get(level + 2).unwrap_or("");
                *cell = Cell::parse(raw).ok_or_else(|| {
                    KbdError::Validation(format!(
                        "line {}: cell '{}' must be empty, one character or dead:<c>",
                        line, raw
                    ))
                })?;
            }

            let slot = *index.entry(name.to_string()).or_insert_with(|| {
                layouts.push(LayoutTable {
                    name: name.to_string(),
                    keys: Vec::new(),
                });
                layouts.len() - 1
            });
            let table = &mut layouts[slot];
            if table.cells(vk).is_some() {
                debug!("line {}: {} repeats vk 0x{:02X}, ignored", line, name, vk);
                continue;
            }
            table.keys.push((vk, cells));
        }

        Ok(Self { layouts })
    }

    fn table(&self, handle: &usize) -> Option<&LayoutTable> {
        self.layouts.get(*handle)
    }
}

fn level_for(modifiers: Modifiers) -> Option<usize> {
    if modifiers.contains(Modifier::Ctrl) || modifiers.contains(Modifier::Alt) {
        return None;
    }
    let mut level = 0;
    if modifiers.shifted() {
        level += 1;
    }
    if modifiers.contains(Modifier::AltGr) {
        level += 2;
    }
    Some(level)
}

impl LayoutProvider for TableProvider {
    type Handle = usize;

    fn list_installed_layouts(&self) -> Vec<String> {
        let mut names: Vec<String> = self.layouts.iter().map(|l| l.name.clone()).collect();
        names.sort();
        names
    }

    fn resolve_layout_handle(&self, name: &str) -> KbdResult<usize> {
        self.layouts
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| KbdError::LayoutNotFound(name.to_string()))
    }

    fn release_layout_handle(&self, _handle: &usize) {}

    /// Lowest level wins, then file order, so a glyph reachable both
    /// unshifted and behind alt-gr resolves to the unshifted key.
    fn translate_character_to_code(&self, character: char, input: &usize) -> Option<VirtualKey> {
        let table = self.table(input)?;
        (0..LEVELS).find_map(|level| {
            table
                .keys
                .iter()
                .find(|(_, cells)| cells[level].glyph() == Some(character))
                .map(|(vk, _)| *vk)
        })
    }

    fn translate_code_to_character(
        &self,
        code: VirtualKey,
        output: &usize,
        modifiers: Modifiers,
    ) -> Translation {
        let Some(level) = level_for(modifiers) else {
            return Translation::NoMapping;
        };
        self.table(output)
            .and_then(|t| t.cells(code))
            .map(|cells| cells[level].translation())
            .unwrap_or(Translation::NoMapping)
    }
}
