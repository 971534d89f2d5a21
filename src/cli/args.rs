//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Airlock - Offline-First Request Router
///
/// Routes GET requests through versioned cache partitions with
/// network-first and cache-first strategies, so the app keeps working
/// offline.
#[derive(Parser, Debug)]
#[command(name = "airlock")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AIRLOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// State directory holding the cache partitions
    #[arg(long, global = true, env = "AIRLOCK_STATE_DIR")]
    pub state_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    Init(InitArgs),

    /// Prefetch both manifests into the static partition
    Install,

    /// Sweep partitions from prior generations
    Activate,

    /// Route one request and print the response
    Fetch(FetchArgs),

    /// Show generation and partition status
    Status(StatusArgs),

    /// Inspect or wipe cache partitions
    Cache(CacheArgs),

    /// Print the current cache generation name
    Version,
}

/// Arguments for the init command
#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the fetch command
#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Absolute URL to fetch
    pub url: String,

    /// Write the response body to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print response headers to stderr
    #[arg(long)]
    pub headers: bool,
}

/// Arguments for the status command
#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the cache command
#[derive(clap::Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List partitions and their entries
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// Delete all partitions
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Output format for listing commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fetch_args() {
        let cli = Cli::parse_from(["airlock", "fetch", "https://app.test/api/foo", "--headers"]);
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.url, "https://app.test/api/foo");
                assert!(args.headers);
                assert!(args.output.is_none());
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn global_state_dir() {
        let cli = Cli::parse_from(["airlock", "--state-dir", "/tmp/air", "status"]);
        assert_eq!(cli.state_dir.unwrap(), PathBuf::from("/tmp/air"));
    }
}
