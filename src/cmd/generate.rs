use crate::reports;
use clap::Args;
use tracing::info;
use univkbd::config::KeyboardConfig;
use univkbd::convert::generate_country_rows;
use univkbd::platform::LayoutProvider;
use univkbd::{KbdResult, Keyboard};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Host layout name, e.g. "US" or "German".
    #[arg(short, long)]
    pub country: String,

    /// Logical layout name or 26-letter order. Defaults to the configured one.
    #[arg(short, long)]
    pub layout: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run<P: LayoutProvider>(
    args: &GenerateArgs,
    provider: &P,
    config: &KeyboardConfig,
) -> KbdResult<()> {
    let layout = args.layout.as_deref().unwrap_or(&config.default_layout);
    info!("⚙️  Converting {} onto {} ({})", config.reference_country, args.country, layout);

    let conversion = generate_country_rows(provider, &args.country, layout, config)?;
    let keyboard = Keyboard::from_rows(conversion.rows);
    let skipped = conversion.skipped;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&keyboard)?);
    } else {
        reports::print_keyboard_grid(&args.country, &keyboard);
        reports::print_skipped_report(&skipped);
    }
    Ok(())
}
