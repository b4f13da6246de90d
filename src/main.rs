use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tokswap::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Read prices from a local JSON file instead of the configured feed
    #[arg(long, global = true)]
    feed_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the tokens and prices in the feed
    Tokens,
    /// Quote a swap between two tokens
    Convert {
        /// Token to swap from
        from: String,
        /// Token to swap to
        to: String,
        /// Amount of the source token
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Skip the simulated processing delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Sum the integers from 1 to N using three methods
    Sum {
        n: u64,
    },
}

impl Commands {
    fn into_app_command(self, feed_file: Option<PathBuf>) -> tokswap::AppCommand {
        match self {
            Commands::Tokens => tokswap::AppCommand::Tokens { feed_file },
            Commands::Convert {
                from,
                to,
                amount,
                no_delay,
            } => tokswap::AppCommand::Convert {
                from,
                to,
                amount,
                no_delay,
                feed_file,
            },
            Commands::Sum { n } => tokswap::AppCommand::Sum { n },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tokswap::cli::setup::setup(),
        Some(cmd) => {
            tokswap::run_command(
                cmd.into_app_command(cli.feed_file),
                cli.config_path.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
