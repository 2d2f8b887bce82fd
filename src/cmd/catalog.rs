use strum::IntoEnumIterator;
use tracing::warn;
use univkbd::layouts::{LogicalLayout, REFERENCE_LAYOUT};
use univkbd::platform::LayoutProvider;
use univkbd::KbdResult;

pub fn run_installed<P: LayoutProvider>(provider: &P) -> KbdResult<()> {
    let layouts = provider.list_installed_layouts();
    if layouts.is_empty() {
        warn!("⚠️  No keyboard layouts available on this host.");
    }
    for name in layouts {
        println!("{}", name);
    }
    Ok(())
}

pub fn run_layouts() -> KbdResult<()> {
    for layout in LogicalLayout::iter() {
        let marker = if layout == REFERENCE_LAYOUT {
            "  (stored)"
        } else {
            ""
        };
        println!("{:<12} {}{}", layout.to_string(), layout.get_str(), marker);
    }
    Ok(())
}
