use univkbd::platform::unsupported::UnsupportedProvider;
use univkbd::platform::{LayoutProvider, LoadedLayout};
use univkbd::{KbdError, Keyboard};

#[test]
fn test_unsupported_provider_degrades_gracefully() {
    let provider = UnsupportedProvider;
    assert!(provider.list_installed_layouts().is_empty());
    assert!(matches!(
        LoadedLayout::load(&provider, "US"),
        Err(KbdError::UnsupportedPlatform(_))
    ));
}

#[cfg(not(windows))]
#[test]
fn test_host_without_provider() {
    assert!(Keyboard::get_operating_system_keyboards().is_empty());
    assert!(matches!(
        Keyboard::get_keyboard_from_operating_system("US", "qwerty"),
        Err(KbdError::UnsupportedPlatform(_))
    ));
    assert!(Keyboard::get_default_keyboard_from_operating_system().is_err());
}

#[cfg(windows)]
#[test]
fn test_host_lists_sorted_layouts() {
    let layouts = Keyboard::get_operating_system_keyboards();
    let mut sorted = layouts.clone();
    sorted.sort();
    assert_eq!(layouts, sorted);
}
