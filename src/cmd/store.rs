use tracing::{info, warn};
use univkbd::config::KeyboardConfig;
use univkbd::platform::LayoutProvider;
use univkbd::store::{export_operating_system_keyboards, list_exported_keyboards};
use univkbd::KbdResult;

pub fn run_export<P: LayoutProvider>(provider: &P, config: &KeyboardConfig) -> KbdResult<()> {
    info!("💾 Exporting keyboards to: {}", config.keyboards_dir);
    let report = export_operating_system_keyboards(provider, &config.keyboards_dir, config)?;

    for name in &report.exported {
        println!("{}", name);
    }
    for (name, e) in &report.failed {
        warn!("⚠️  {} failed: {}", name, e);
    }
    Ok(())
}

pub fn run_list(config: &KeyboardConfig) -> KbdResult<()> {
    let names = list_exported_keyboards(&config.keyboards_dir);
    if names.is_empty() {
        warn!("⚠️  No exported keyboards in '{}'.", config.keyboards_dir);
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
