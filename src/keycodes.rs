//! Platform key codes.
//!
//! Two families live here: the Qt-style key codes a toolkit event loop
//! expects (`Key_*` values, where printable keys use their Unicode code
//! point) and the Windows virtual-key codes used by the layout providers.

/// A toolkit key code. Printable characters use their code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ESCAPE: KeyCode = KeyCode(0x0100_0000);
    pub const TAB: KeyCode = KeyCode(0x0100_0001);
    pub const BACKSPACE: KeyCode = KeyCode(0x0100_0003);
    pub const ENTER: KeyCode = KeyCode(0x0100_0005);
    pub const LEFT: KeyCode = KeyCode(0x0100_0012);
    pub const UP: KeyCode = KeyCode(0x0100_0013);
    pub const RIGHT: KeyCode = KeyCode(0x0100_0014);
    pub const DOWN: KeyCode = KeyCode(0x0100_0015);
    pub const SHIFT: KeyCode = KeyCode(0x0100_0020);
    pub const CONTROL: KeyCode = KeyCode(0x0100_0021);
    pub const ALT: KeyCode = KeyCode(0x0100_0023);
    pub const CAPS_LOCK: KeyCode = KeyCode(0x0100_0024);
    pub const F1: KeyCode = KeyCode(0x0100_0030);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const UNKNOWN: KeyCode = KeyCode(0x01FF_FFFF);

    /// Code for a printable character.
    pub fn from_char(c: char) -> Self {
        KeyCode(c as u32)
    }

    /// Code for function key `Fn` (1-based). Out-of-range numbers are unknown.
    pub fn function(n: u8) -> Self {
        if (1..=35).contains(&n) {
            KeyCode(Self::F1.0 + u32::from(n) - 1)
        } else {
            Self::UNKNOWN
        }
    }
}

/// Windows virtual-key code (low byte of a `VkKeyScanEx` result).
pub type VirtualKey = u16;

// Modifier keys, set in the key-state array handed to `ToUnicodeEx`.
pub const VK_SHIFT: VirtualKey = 0x10;
pub const VK_CONTROL: VirtualKey = 0x11;
pub const VK_MENU: VirtualKey = 0x12;
pub const VK_CAPITAL: VirtualKey = 0x14;

/// Parses a virtual-key cell: decimal (`65`) or hex (`0x41`).
pub fn parse_virtual_key(token: &str) -> Option<VirtualKey> {
    let t = token.trim();
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        VirtualKey::from_str_radix(hex, 16).ok()
    } else {
        t.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_codes_are_contiguous() {
        assert_eq!(KeyCode::function(1), KeyCode::F1);
        assert_eq!(KeyCode::function(12), KeyCode(0x0100_003B));
        assert_eq!(KeyCode::function(0), KeyCode::UNKNOWN);
    }

    #[test]
    fn test_parse_virtual_key_forms() {
        assert_eq!(parse_virtual_key("0x41"), Some(0x41));
        assert_eq!(parse_virtual_key(" 65 "), Some(65));
        assert_eq!(parse_virtual_key("0xZZ"), None);
        assert_eq!(parse_virtual_key(""), None);
    }
}
