//! `.keyboard` files on disk.
//!
//! A file is the magic `UKBD`, a little-endian `u16` format version and
//! one keyboard record. Exported keyboards are stored in the reference
//! logical layout and remapped on import.

use crate::config::KeyboardConfig;
use crate::error::{KbdError, KbdResult};
use crate::keyboard::Keyboard;
use crate::layouts::{resolve_layout_string, REFERENCE_LAYOUT};
use crate::platform::LayoutProvider;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const MAGIC: &[u8; 4] = b"UKBD";
pub const FORMAT_VERSION: u16 = 1;
pub const EXTENSION: &str = "keyboard";

pub fn keyboard_path<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.{}", name, EXTENSION))
}

pub fn write_keyboard<W: Write>(out: &mut W, keyboard: &Keyboard) -> KbdResult<()> {
    out.write_all(MAGIC)?;
    out.write_all(&FORMAT_VERSION.to_le_bytes())?;
    keyboard.serialize(out)
}

pub fn read_keyboard<R: Read>(input: &mut R) -> KbdResult<Keyboard> {
    let mut magic = [0u8; 4];
    input.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(KbdError::BadMagic);
    }

    let mut version = [0u8; 2];
    input.read_exact(&mut version)?;
    let version = u16::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(KbdError::UnsupportedVersion(version));
    }

    Keyboard::deserialize(input)
}

pub fn write_keyboard_file<P: AsRef<Path>>(path: P, keyboard: &Keyboard) -> KbdResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_keyboard(&mut out, keyboard)?;
    out.flush()?;
    Ok(())
}

pub fn read_keyboard_file<P: AsRef<Path>>(path: P) -> KbdResult<Keyboard> {
    let mut input = BufReader::new(File::open(path)?);
    read_keyboard(&mut input)
}

/// Outcome of an export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub exported: Vec<String>,
    pub failed: Vec<(String, KbdError)>,
}

/// Writes `<country>.keyboard` into `dir` for every layout `provider`
/// lists, creating `dir` if needed. A country that fails to convert is
/// logged and recorded, the run carries on.
pub fn export_operating_system_keyboards<P: LayoutProvider, D: AsRef<Path>>(
    provider: &P,
    dir: D,
    config: &KeyboardConfig,
) -> KbdResult<ExportReport> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut report = ExportReport::default();
    for country in provider.list_installed_layouts() {
        let result = Keyboard::from_provider(provider, &country, REFERENCE_LAYOUT.get_str(), config)
            .and_then(|kb| write_keyboard_file(keyboard_path(dir, &country), &kb));
        match result {
            Ok(()) => report.exported.push(country),
            Err(e) => {
                warn!("Skipping '{}': {}", country, e);
                report.failed.push((country, e));
            }
        }
    }

    info!(
        "Exported {} keyboards to {} ({} failed)",
        report.exported.len(),
        dir.display(),
        report.failed.len()
    );
    Ok(report)
}

/// Base names of the `.keyboard` files in `dir`, sorted. A missing
/// directory lists nothing.
pub fn list_exported_keyboards<P: AsRef<Path>>(dir: P) -> Vec<String> {
    let entries = match fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(EXTENSION))
        .filter_map(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .collect();
    names.sort();
    names
}

/// Loads an exported keyboard and remaps it to `layout`.
pub fn try_import_keyboard<P: AsRef<Path>>(dir: P, name: &str, layout: &str) -> KbdResult<Keyboard> {
    let path = keyboard_path(dir, name);
    if !path.is_file() {
        return Err(KbdError::KeyboardNotFound(name.to_string()));
    }
    let target = resolve_layout_string(layout)?;
    let keyboard = read_keyboard_file(&path)?;
    keyboard.convert_layout(REFERENCE_LAYOUT.get_str(), &target)
}

/// Like [`try_import_keyboard`], but any failure is logged and yields an
/// empty keyboard.
pub fn import_keyboard<P: AsRef<Path>>(dir: P, name: &str, layout: &str) -> Keyboard {
    try_import_keyboard(dir, name, layout).unwrap_or_else(|e| {
        warn!("Could not import keyboard '{}': {}", name, e);
        Keyboard::default()
    })
}
