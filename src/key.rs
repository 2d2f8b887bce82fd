use crate::error::{KbdError, KbdResult};
use crate::keycodes::KeyCode;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use strum_macros::{Display, EnumIter, EnumString};

/// Role of a physical key. Only `Regular` keys carry characters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    Regular,
    Shift,
    Alt,
    Ctrl,
    Esc,
    Tab,
    Backspace,
    Space,
    Enter,
    CapsLock,
    Up,
    Down,
    Left,
    Right,
    Fn1,
    Fn2,
    Fn3,
    Fn4,
    Fn5,
    Fn6,
    Fn7,
    Fn8,
    Fn9,
    Fn10,
    Fn11,
    Fn12,
    Config,
    OpenClose,
}

impl KeyType {
    /// Tag written in the `.keyboard` record.
    pub fn wire_tag(self) -> i32 {
        match self {
            Self::Regular => -1,
            Self::Shift => 0,
            Self::Alt => 1,
            Self::Ctrl => 2,
            Self::Esc => 3,
            Self::Tab => 4,
            Self::Backspace => 5,
            Self::Space => 6,
            Self::Enter => 7,
            Self::CapsLock => 8,
            Self::Up => 9,
            Self::Down => 10,
            Self::Left => 11,
            Self::Right => 12,
            Self::Fn1 => 13,
            Self::Fn2 => 14,
            Self::Fn3 => 15,
            Self::Fn4 => 16,
            Self::Fn5 => 17,
            Self::Fn6 => 18,
            Self::Fn7 => 19,
            Self::Fn8 => 20,
            Self::Fn9 => 21,
            Self::Fn10 => 22,
            Self::Fn11 => 23,
            Self::Fn12 => 24,
            Self::Config => 25,
            Self::OpenClose => 26,
        }
    }

    pub fn from_wire_tag(tag: i32) -> KbdResult<Self> {
        let key_type = match tag {
            -1 => Self::Regular,
            0 => Self::Shift,
            1 => Self::Alt,
            2 => Self::Ctrl,
            3 => Self::Esc,
            4 => Self::Tab,
            5 => Self::Backspace,
            6 => Self::Space,
            7 => Self::Enter,
            8 => Self::CapsLock,
            9 => Self::Up,
            10 => Self::Down,
            11 => Self::Left,
            12 => Self::Right,
            13 => Self::Fn1,
            14 => Self::Fn2,
            15 => Self::Fn3,
            16 => Self::Fn4,
            17 => Self::Fn5,
            18 => Self::Fn6,
            19 => Self::Fn7,
            20 => Self::Fn8,
            21 => Self::Fn9,
            22 => Self::Fn10,
            23 => Self::Fn11,
            24 => Self::Fn12,
            25 => Self::Config,
            26 => Self::OpenClose,
            other => return Err(KbdError::UnknownKeyType(other)),
        };
        Ok(key_type)
    }

    /// 1-based function key number, if this is `Fn1`..`Fn12`.
    pub fn function_number(self) -> Option<u8> {
        let n = match self {
            Self::Fn1 => 1,
            Self::Fn2 => 2,
            Self::Fn3 => 3,
            Self::Fn4 => 4,
            Self::Fn5 => 5,
            Self::Fn6 => 6,
            Self::Fn7 => 7,
            Self::Fn8 => 8,
            Self::Fn9 => 9,
            Self::Fn10 => 10,
            Self::Fn11 => 11,
            Self::Fn12 => 12,
            _ => return None,
        };
        Some(n)
    }

    /// Display label for control keys. Empty for `Regular`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "",
            Self::Shift => "Shift",
            Self::Alt => "Alt",
            Self::Ctrl => "Ctrl",
            Self::Esc => "Esc",
            Self::Tab => "Tab",
            Self::Backspace => "Backspace",
            Self::Space => "Space",
            Self::Enter => "Enter",
            Self::CapsLock => "Caps Lock",
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Left => "←",
            Self::Right => "→",
            Self::Fn1 => "F1",
            Self::Fn2 => "F2",
            Self::Fn3 => "F3",
            Self::Fn4 => "F4",
            Self::Fn5 => "F5",
            Self::Fn6 => "F6",
            Self::Fn7 => "F7",
            Self::Fn8 => "F8",
            Self::Fn9 => "F9",
            Self::Fn10 => "F10",
            Self::Fn11 => "F11",
            Self::Fn12 => "F12",
            Self::Config => "Config",
            Self::OpenClose => "Open/Close",
        }
    }
}

/// One physical key: its role, the glyph it types at each shift level,
/// and where it sits on the layout grid.
///
/// Level 0 is unmodified, 1 is shift, 2 is alt-gr and 3 is shift+alt-gr
/// when the layout provides it. Position is (0, 0) until the key is
/// placed by [`crate::keyboard::Keyboard::from_rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    #[serde(rename = "type")]
    key_type: KeyType,
    #[serde(default)]
    characters: String,
    #[serde(default, skip_serializing_if = "specials_are_empty")]
    specials: Vec<Vec<String>>,
    x_span: f32,
    y_span: f32,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}

fn specials_are_empty(specials: &[Vec<String>]) -> bool {
    specials.iter().all(|s| s.is_empty())
}

impl Key {
    /// A control key. Passing `KeyType::Regular` yields a regular key with
    /// no characters.
    pub fn control(key_type: KeyType, x_span: f32, y_span: f32) -> Self {
        Self {
            key_type,
            characters: String::new(),
            specials: Vec::new(),
            x_span,
            y_span,
            x: 0.0,
            y: 0.0,
        }
    }

    /// A regular key typing `characters`, one glyph per shift level.
    pub fn regular(characters: impl Into<String>, x_span: f32, y_span: f32) -> Self {
        let characters = characters.into();
        let levels = characters.chars().count();
        Self {
            key_type: KeyType::Regular,
            characters,
            specials: vec![Vec::new(); levels],
            x_span,
            y_span,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Same key moved to `(x, y)`.
    pub fn placed_at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub(crate) fn place(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn is_regular(&self) -> bool {
        self.key_type == KeyType::Regular
    }

    pub fn characters(&self) -> &str {
        &self.characters
    }

    /// Number of shift levels this key types.
    pub fn levels(&self) -> usize {
        self.characters.chars().count()
    }

    pub fn character(&self, level: usize) -> Option<char> {
        self.characters.chars().nth(level)
    }

    /// Copy of this key with a new character set; spans and position are
    /// kept and the specials table is resized to match.
    pub fn with_characters(&self, characters: impl Into<String>) -> Key {
        let mut key = self.clone();
        key.characters = characters.into();
        key.specials.resize(key.levels(), Vec::new());
        key
    }

    /// Long-press alternates for `level`; empty when none are set.
    pub fn specials(&self, level: usize) -> &[String] {
        self.specials.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_specials(&mut self, level: usize, specials: Vec<String>) -> KbdResult<()> {
        let levels = self.specials.len();
        let slot = self.specials.get_mut(level).ok_or_else(|| {
            KbdError::Validation(format!(
                "special level {} out of range for key with {} levels",
                level, levels
            ))
        })?;
        *slot = specials;
        Ok(())
    }

    pub fn x_span(&self) -> f32 {
        self.x_span
    }

    pub fn y_span(&self) -> f32 {
        self.y_span
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Text to show for this key at `level`.
    ///
    /// Regular keys clamp `level` to their last glyph, so asking for the
    /// alt-gr level of a two-level key shows the shift glyph. Control keys
    /// ignore `level`.
    pub fn label(&self, level: usize) -> String {
        match self.key_type {
            KeyType::Regular => {
                let last = self.levels().saturating_sub(1);
                self.character(level.min(last))
                    .map(String::from)
                    .unwrap_or_default()
            }
            other => other.label().to_string(),
        }
    }

    /// Toolkit key code used when synthesizing a key press.
    pub fn to_key_code(&self) -> KeyCode {
        match self.key_type {
            KeyType::Regular => self
                .characters
                .chars()
                .next()
                .map(KeyCode::from_char)
                .unwrap_or(KeyCode::UNKNOWN),
            KeyType::Shift => KeyCode::SHIFT,
            KeyType::Ctrl => KeyCode::CONTROL,
            KeyType::Alt => KeyCode::ALT,
            KeyType::Esc => KeyCode::ESCAPE,
            KeyType::Tab => KeyCode::TAB,
            KeyType::Backspace => KeyCode::BACKSPACE,
            KeyType::Space => KeyCode::SPACE,
            KeyType::Enter => KeyCode::ENTER,
            KeyType::CapsLock => KeyCode::CAPS_LOCK,
            KeyType::Up => KeyCode::UP,
            KeyType::Down => KeyCode::DOWN,
            KeyType::Left => KeyCode::LEFT,
            KeyType::Right => KeyCode::RIGHT,
            other => other
                .function_number()
                .map(KeyCode::function)
                .unwrap_or(KeyCode::UNKNOWN),
        }
    }

    /// Writes the key record: type tag, spans, position, then the UTF-16
    /// payload prefixed by its code unit count.
    pub fn serialize<W: Write>(&self, out: &mut W) -> KbdResult<()> {
        write_i32(out, self.key_type.wire_tag())?;
        write_f32(out, self.x_span)?;
        write_f32(out, self.y_span)?;
        write_f32(out, self.x)?;
        write_f32(out, self.y)?;

        let units: Vec<u16> = self.characters.encode_utf16().collect();
        let len = i32::try_from(units.len()).map_err(|_| {
            KbdError::Validation(format!("{} code units do not fit a record", units.len()))
        })?;
        write_i32(out, len)?;
        for unit in units {
            out.write_all(&unit.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn deserialize<R: Read>(input: &mut R) -> KbdResult<Key> {
        let key_type = KeyType::from_wire_tag(read_i32(input)?)?;
        let x_span = read_f32(input)?;
        let y_span = read_f32(input)?;
        let x = read_f32(input)?;
        let y = read_f32(input)?;

        let len = read_i32(input)?;
        let len = usize::try_from(len)
            .map_err(|_| KbdError::Validation(format!("negative character length {}", len)))?;

        let mut characters = String::new();
        if len > 0 {
            // Read only what is there; a corrupt length must not size the buffer.
            let expected = len * 2;
            let mut bytes = Vec::new();
            input.by_ref().take(expected as u64).read_to_end(&mut bytes)?;
            if bytes.len() != expected {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("key record promised {} code units, got {} bytes", len, bytes.len()),
                )
                .into());
            }
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            characters = String::from_utf16(&units)
                .map_err(|e| KbdError::InvalidCharacters(e.to_string()))?;
        }

        if key_type != KeyType::Regular && !characters.is_empty() {
            return Err(KbdError::InvalidCharacters(format!(
                "{} key carries characters '{}'",
                key_type, characters
            )));
        }

        let key = match key_type {
            KeyType::Regular => Key::regular(characters, x_span, y_span),
            other => Key::control(other, x_span, y_span),
        };
        Ok(key.placed_at(x, y))
    }
}

pub(crate) fn write_i32<W: Write>(out: &mut W, value: i32) -> std::io::Result<()> {
    out.write_all(&value.to_le_bytes())
}

pub(crate) fn write_f32<W: Write>(out: &mut W, value: f32) -> std::io::Result<()> {
    out.write_all(&value.to_le_bytes())
}

pub(crate) fn read_i32<R: Read>(input: &mut R) -> std::io::Result<i32> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

pub(crate) fn read_f32<R: Read>(input: &mut R) -> std::io::Result<f32> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}
