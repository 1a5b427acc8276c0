use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use dartgust::config::Config;
use dartgust::geometry::Arena;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with timing, gesture and session parameters.
    #[arg(global = true, long)]
    config: Option<String>,

    /// JSON file with the surface, target and bonus zone layout.
    #[arg(global = true, long)]
    arena: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,

    #[arg(global = true, long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Simulate(cmd::simulate::SimulateArgs),
    Batch(cmd::batch::BatchArgs),
    Leaderboard(cmd::leaderboard::LeaderboardArgs),
}

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);
    info!("🎯 Initializing dartgust...");

    let arena = match &cli.arena {
        Some(path) => {
            info!("📂 Loading arena: {}", path);
            Arena::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            })
        }
        None => Arena::standard(),
    };

    let mut config = match &cli.config {
        Some(path) => {
            info!("⚙️  Loading config: {}", path);
            Config::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    // Flags typed on the command line win over the file
    let cli_config = match &cli.command {
        Commands::Simulate(args) => Some((&args.config, "simulate")),
        Commands::Batch(args) => Some((&args.config, "batch")),
        Commands::Leaderboard(_) => None,
    };
    if let Some((cli_config, name)) = cli_config {
        if let Some(sub_matches) = matches.subcommand_matches(name) {
            config.merge_from_cli(cli_config, sub_matches);
        }
    }

    if let Err(e) = config.validate() {
        error!("❌ Invalid configuration: {}", e);
        process::exit(1);
    }

    let arena = Arc::new(arena);
    let outcome = match cli.command {
        Commands::Simulate(args) => cmd::simulate::run(args, &config, arena, cli.seed),
        Commands::Batch(args) => cmd::batch::run(args, &config, arena, cli.seed),
        Commands::Leaderboard(args) => cmd::leaderboard::run(args, &config),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
