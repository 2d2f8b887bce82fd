use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};
use univkbd::config::KeyboardConfig;
use univkbd::platform::table::TableProvider;
use univkbd::platform::{system_provider, LayoutProvider};
use univkbd::KbdResult;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Translation tables to use instead of the host's layouts.
    #[arg(global = true, long)]
    tables: Option<String>,

    /// JSON file with keyboard settings; explicit flags win over it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,

    #[command(flatten)]
    settings: KeyboardConfig,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the layouts installed on the host.
    Installed,
    /// Build a keyboard for one host layout.
    Generate(cmd::generate::GenerateArgs),
    /// Write every installed layout to the keyboards directory.
    Export,
    /// List exported keyboards.
    List,
    /// Print an exported keyboard.
    Show(cmd::show::ShowArgs),
    /// List the known logical layouts.
    Layouts,
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            info!("📂 Loading config from: {}", path);
            KeyboardConfig::load_from_file(path).map(|mut file_config| {
                file_config.merge_from_cli(&cli.settings, &matches);
                file_config
            })
        }
        None => Ok(cli.settings.clone()),
    };

    let result = config.and_then(|config| match &cli.tables {
        Some(path) => {
            let provider = TableProvider::load_from_file(path)?;
            dispatch(&cli.command, &provider, &config)
        }
        None => dispatch(&cli.command, &system_provider(), &config),
    });

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn dispatch<P: LayoutProvider>(
    command: &Commands,
    provider: &P,
    config: &KeyboardConfig,
) -> KbdResult<()> {
    match command {
        Commands::Installed => cmd::catalog::run_installed(provider),
        Commands::Generate(args) => cmd::generate::run(args, provider, config),
        Commands::Export => cmd::store::run_export(provider, config),
        Commands::List => cmd::store::run_list(config),
        Commands::Show(args) => cmd::show::run(args, config),
        Commands::Layouts => cmd::catalog::run_layouts(),
    }
}
