//! Airlock - Offline-First Request Router
//!
//! CLI entry point that dispatches to subcommands.

use airlock::cli::{Cli, Commands};
use airlock::config::ConfigManager;
use airlock::error::AirlockResult;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AirlockResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("airlock=warn"),
        1 => EnvFilter::new("airlock=info"),
        _ => EnvFilter::new("airlock=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Init command doesn't need config loading
    if let Commands::Init(args) = cli.command {
        return airlock::cli::commands::init(args, cli.config).await;
    }

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    let partitions_dir: PathBuf = cli
        .state_dir
        .map(|dir| dir.join("partitions"))
        .unwrap_or_else(ConfigManager::partitions_dir);

    // Dispatch to command
    match cli.command {
        Commands::Init(_) => unreachable!("Init handled above"),
        Commands::Install => airlock::cli::commands::install(&config, &partitions_dir).await,
        Commands::Activate => airlock::cli::commands::activate(&config, &partitions_dir).await,
        Commands::Fetch(args) => airlock::cli::commands::fetch(args, &config, &partitions_dir).await,
        Commands::Status(args) => {
            airlock::cli::commands::status(args, &config, &partitions_dir).await
        }
        Commands::Cache(args) => airlock::cli::commands::cache(args, &partitions_dir).await,
        Commands::Version => airlock::cli::commands::version(&config, &partitions_dir).await,
    }
}
