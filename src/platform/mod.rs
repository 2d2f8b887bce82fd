//! Host keyboard-layout translation tables.
//!
//! The conversion engine only talks to a [`LayoutProvider`]. Windows gets
//! a provider backed by the registry and user32, other hosts get one that
//! reports nothing installed, and [`table::TableProvider`] replays
//! translation tables loaded from a file on any host.

use crate::error::KbdResult;
use crate::keycodes::VirtualKey;
use crate::modifiers::Modifiers;
use tracing::debug;

pub mod table;
pub mod unsupported;
#[cfg(windows)]
pub mod windows;

/// Result of asking a layout which character a virtual key types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    Character(char),
    /// The key starts a dead-key sequence instead of typing a character.
    DeadKey,
    NoMapping,
}

pub trait LayoutProvider {
    type Handle;

    /// Display names of the installed layouts, sorted alphabetically.
    fn list_installed_layouts(&self) -> Vec<String>;

    fn resolve_layout_handle(&self, name: &str) -> KbdResult<Self::Handle>;

    fn release_layout_handle(&self, handle: &Self::Handle);

    /// Virtual key that types `character` on `input`, at any shift level.
    fn translate_character_to_code(&self, character: char, input: &Self::Handle)
        -> Option<VirtualKey>;

    fn translate_code_to_character(
        &self,
        code: VirtualKey,
        output: &Self::Handle,
        modifiers: Modifiers,
    ) -> Translation;
}

/// A layout handle that is released when dropped.
pub struct LoadedLayout<'p, P: LayoutProvider> {
    provider: &'p P,
    handle: P::Handle,
    name: String,
}

impl<'p, P: LayoutProvider> LoadedLayout<'p, P> {
    pub fn load(provider: &'p P, name: &str) -> KbdResult<Self> {
        let handle = provider.resolve_layout_handle(name)?;
        debug!("Loaded layout '{}'", name);
        Ok(Self {
            provider,
            handle,
            name: name.to_string(),
        })
    }

    pub fn handle(&self) -> &P::Handle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<P: LayoutProvider> Drop for LoadedLayout<'_, P> {
    fn drop(&mut self) {
        debug!("Unloading layout '{}'", self.name);
        self.provider.release_layout_handle(&self.handle);
    }
}

#[cfg(windows)]
pub type SystemProvider = windows::WindowsProvider;

#[cfg(not(windows))]
pub type SystemProvider = unsupported::UnsupportedProvider;

/// The provider for the host operating system.
pub fn system_provider() -> SystemProvider {
    SystemProvider::default()
}
