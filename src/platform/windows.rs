//! Windows layout provider: layout names come from the registry, character
//! translation from user32 (`VkKeyScanExW` / `ToUnicodeEx`).

use super::{LayoutProvider, Translation};
use crate::error::{KbdError, KbdResult};
use crate::keycodes::{VirtualKey, VK_CAPITAL, VK_CONTROL, VK_MENU, VK_SHIFT};
use crate::modifiers::{Modifier, Modifiers};
use std::iter::once;
use std::ptr::{null, null_mut};
use tracing::{debug, warn};
use windows_sys::Win32::Foundation::ERROR_SUCCESS;
use windows_sys::Win32::System::Registry::{
    RegCloseKey, RegEnumKeyExW, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_LOCAL_MACHINE,
    KEY_READ,
};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    LoadKeyboardLayoutW, ToUnicodeEx, UnloadKeyboardLayout, VkKeyScanExW,
};
use windows_sys::Win32::UI::TextServices::HKL;

const LAYOUTS_KEY: &str = "SYSTEM\\CurrentControlSet\\Control\\Keyboard Layouts";
const LAYOUT_TEXT_VALUE: &str = "Layout Text";
const NAME_CAPACITY: usize = 255;

/// A loaded Windows keyboard layout.
#[derive(Debug)]
pub struct WindowsLayout {
    hkl: HKL,
    klid: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsProvider;

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(once(0)).collect()
}

fn from_wide(buf: &[u16]) -> String {
    let end = buf.iter().position(|&u| u == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

/// Open registry key, closed on drop.
struct RegKey(HKEY);

impl RegKey {
    fn open(parent: HKEY, path: &str) -> Option<Self> {
        let path = wide(path);
        let mut key: HKEY = 0;
        let status = unsafe { RegOpenKeyExW(parent, path.as_ptr(), 0, KEY_READ, &mut key) };
        (status == ERROR_SUCCESS).then_some(RegKey(key))
    }

    fn subkey_name(&self, index: u32) -> Option<String> {
        let mut name = [0u16; NAME_CAPACITY];
        let mut len = NAME_CAPACITY as u32;
        let status = unsafe {
            RegEnumKeyExW(
                self.0,
                index,
                name.as_mut_ptr(),
                &mut len,
                null(),
                null_mut(),
                null_mut(),
                null_mut(),
            )
        };
        (status == ERROR_SUCCESS).then(|| from_wide(&name[..len as usize]))
    }

    fn string_value(&self, value: &str) -> Option<String> {
        let value = wide(value);
        let mut data = [0u16; NAME_CAPACITY];
        let mut size = (NAME_CAPACITY * 2) as u32;
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                value.as_ptr(),
                null(),
                null_mut(),
                data.as_mut_ptr() as *mut u8,
                &mut size,
            )
        };
        (status == ERROR_SUCCESS).then(|| from_wide(&data[..(size as usize / 2).min(NAME_CAPACITY)]))
    }
}

impl Drop for RegKey {
    fn drop(&mut self) {
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

/// `(KLID, display name)` for every layout registered on the machine.
fn registered_layouts() -> Vec<(String, String)> {
    let Some(root) = RegKey::open(HKEY_LOCAL_MACHINE, LAYOUTS_KEY) else {
        warn!("Could not open the keyboard layouts registry key");
        return Vec::new();
    };

    let mut layouts = Vec::new();
    let mut index = 0;
    while let Some(klid) = root.subkey_name(index) {
        index += 1;
        let Some(sub) = RegKey::open(root.0, &klid) else {
            continue;
        };
        if let Some(text) = sub.string_value(LAYOUT_TEXT_VALUE) {
            layouts.push((klid, text));
        }
    }
    layouts
}

impl LayoutProvider for WindowsProvider {
    type Handle = WindowsLayout;

    fn list_installed_layouts(&self) -> Vec<String> {
        let mut names: Vec<String> = registered_layouts()
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        names.sort();
        names
    }

    fn resolve_layout_handle(&self, name: &str) -> KbdResult<WindowsLayout> {
        let klid = registered_layouts()
            .into_iter()
            .find(|(_, text)| text == name)
            .map(|(klid, _)| klid)
            .ok_or_else(|| KbdError::LayoutNotFound(name.to_string()))?;

        debug!("Layout '{}' has KLID {}", name, klid);
        let klid_w = wide(&klid);
        let hkl = unsafe { LoadKeyboardLayoutW(klid_w.as_ptr(), 0) };
        if hkl == 0 {
            return Err(KbdError::LayoutLoadFailed(format!("{} ({})", name, klid)));
        }
        Ok(WindowsLayout { hkl, klid })
    }

    fn release_layout_handle(&self, handle: &WindowsLayout) {
        let ok = unsafe { UnloadKeyboardLayout(handle.hkl) };
        if ok == 0 {
            debug!("UnloadKeyboardLayout refused {}", handle.klid);
        }
    }

    fn translate_character_to_code(
        &self,
        character: char,
        input: &WindowsLayout,
    ) -> Option<VirtualKey> {
        let mut unit = [0u16; 2];
        let encoded = character.encode_utf16(&mut unit);
        if encoded.len() != 1 {
            return None;
        }
        let scan = unsafe { VkKeyScanExW(encoded[0], input.hkl) };
        if scan == -1 {
            return None;
        }
        // High byte is the shift state needed to type the character.
        Some((scan as u16) & 0x00FF)
    }

    fn translate_code_to_character(
        &self,
        code: VirtualKey,
        output: &WindowsLayout,
        modifiers: Modifiers,
    ) -> Translation {
        let mut state = [0u8; 256];
        if modifiers.contains(Modifier::Shift) {
            state[VK_SHIFT as usize] = 0x80;
        }
        if modifiers.contains(Modifier::CapsLock) {
            state[VK_CAPITAL as usize] = 0x01;
        }
        if modifiers.contains(Modifier::Ctrl) {
            state[VK_CONTROL as usize] = 0x80;
        }
        if modifiers.contains(Modifier::Alt) {
            state[VK_MENU as usize] = 0x80;
        }
        if modifiers.contains(Modifier::AltGr) {
            state[VK_CONTROL as usize] = 0x80;
            state[VK_MENU as usize] = 0x80;
        }

        let mut buffer = [0u16; 5];
        let written = unsafe {
            ToUnicodeEx(
                u32::from(code),
                0,
                state.as_ptr(),
                buffer.as_mut_ptr(),
                buffer.len() as i32,
                0,
                output.hkl,
            )
        };

        if written < 0 {
            // Flush the pending dead key so it does not leak into the next call.
            unsafe {
                ToUnicodeEx(
                    u32::from(code),
                    0,
                    state.as_ptr(),
                    buffer.as_mut_ptr(),
                    buffer.len() as i32,
                    0,
                    output.hkl,
                );
            }
            return Translation::DeadKey;
        }
        if written == 0 {
            return Translation::NoMapping;
        }

        let len = (written as usize).min(buffer.len());
        match char::decode_utf16(buffer[..len].iter().copied()).next() {
            Some(Ok(c)) => Translation::Character(c),
            _ => Translation::NoMapping,
        }
    }
}
