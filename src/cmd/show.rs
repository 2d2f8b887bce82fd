use crate::reports;
use clap::Args;
use univkbd::config::KeyboardConfig;
use univkbd::store::try_import_keyboard;
use univkbd::KbdResult;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Exported keyboard name (file name without `.keyboard`).
    pub name: String,

    #[arg(short, long)]
    pub layout: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ShowArgs, config: &KeyboardConfig) -> KbdResult<()> {
    let layout = args.layout.as_deref().unwrap_or(&config.default_layout);
    let keyboard = try_import_keyboard(&config.keyboards_dir, &args.name, layout)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&keyboard)?);
    } else {
        reports::print_keyboard_grid(&args.name, &keyboard);
    }
    Ok(())
}
