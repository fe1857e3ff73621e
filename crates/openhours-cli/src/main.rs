use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "openhours", version, about = "Edit availability windows and slot grids")]
struct Cli {
    /// Config file (default: ~/.config/openhours/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override a config value for this run, e.g. week.start_of_week=sunday
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a default-length window
    Create(commands::edit::CreateArgs),
    /// Move or resize the window at an index
    Update(commands::edit::UpdateArgs),
    /// Remove the window at an index
    Remove(commands::edit::RemoveArgs),
    /// Convert a window list to a slot grid
    Slots(commands::grid::SlotsArgs),
    /// Convert a slot grid to a window list
    Windows(commands::grid::WindowsArgs),
    /// Draw a window list as a week (or day) chart
    Show(commands::show::ShowArgs),
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("OPENHOURS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = common::Context {
        config_path: cli.config,
        overrides: cli.overrides,
    };

    let result = match cli.command {
        Commands::Create(args) => commands::edit::create(args, &ctx),
        Commands::Update(args) => commands::edit::update(args, &ctx),
        Commands::Remove(args) => commands::edit::remove(args, &ctx),
        Commands::Slots(args) => commands::grid::slots(args, &ctx),
        Commands::Windows(args) => commands::grid::windows(args, &ctx),
        Commands::Show(args) => commands::show::run(args, &ctx),
        Commands::Config { action } => commands::config::run(action, &ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
