use super::{LayoutProvider, Translation};
use crate::error::{KbdError, KbdResult};
use crate::keycodes::VirtualKey;
use crate::modifiers::Modifiers;

/// Provider for hosts without layout translation support: nothing is
/// installed and nothing resolves.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedProvider;

impl LayoutProvider for UnsupportedProvider {
    type Handle = ();

    fn list_installed_layouts(&self) -> Vec<String> {
        Vec::new()
    }

    fn resolve_layout_handle(&self, name: &str) -> KbdResult<()> {
        Err(KbdError::UnsupportedPlatform(format!(
            "cannot load layout '{}' on {}",
            name,
            std::env::consts::OS
        )))
    }

    fn release_layout_handle(&self, _handle: &()) {}

    fn translate_character_to_code(&self, _character: char, _input: &()) -> Option<VirtualKey> {
        None
    }

    fn translate_code_to_character(
        &self,
        _code: VirtualKey,
        _output: &(),
        _modifiers: Modifiers,
    ) -> Translation {
        Translation::NoMapping
    }
}
