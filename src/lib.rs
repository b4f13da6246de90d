pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::engine::{ConversionEngine, FixedDelay};
use crate::core::{PriceCatalog, PriceFeed};
use anyhow::{Result, anyhow};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    /// List every token in the price feed.
    Tokens { feed_file: Option<PathBuf> },
    /// Quote a swap of `amount` units of `from` into `to`.
    Convert {
        from: String,
        to: String,
        amount: String,
        no_delay: bool,
        feed_file: Option<PathBuf>,
    },
    /// Sum the integers 1..=n three ways.
    Sum { n: u64 },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("tokswap starting...");

    if let AppCommand::Sum { n } = command {
        cli::sum::run(n);
        return Ok(());
    }

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Tokens { feed_file } => {
            let catalog = load_catalog(&config, feed_file).await?;
            cli::tokens::run(&catalog);
        }
        AppCommand::Convert {
            from,
            to,
            amount,
            no_delay,
            feed_file,
        } => {
            let catalog = load_catalog(&config, feed_file).await?;
            let delay = if no_delay {
                Duration::ZERO
            } else {
                config.swap.delay()
            };
            let engine = ConversionEngine::new(FixedDelay(delay));
            cli::convert::run(&engine, &catalog, &from, &to, &amount).await?;
        }
        AppCommand::Sum { .. } => unreachable!("Sum is handled before loading config"),
    }

    Ok(())
}

/// Loads the catalog once from the configured feed, or from `feed_file` when given.
pub async fn load_catalog(config: &AppConfig, feed_file: Option<PathBuf>) -> Result<PriceCatalog> {
    let feed: Box<dyn PriceFeed> = match feed_file {
        Some(path) => Box::new(providers::FilePriceFeed::new(path)),
        None => Box::new(providers::HttpPriceFeed::new(&config.feed.url)?),
    };

    let mut catalog = PriceCatalog::new(&config.feed.icon_template);
    let loaded = cli::ui::with_spinner("Loading prices...", catalog.load(feed.as_ref())).await;
    match loaded {
        Ok(count) => {
            debug!(count, "Price catalog ready");
            Ok(catalog)
        }
        Err(e) => {
            eprintln!(
                "{}",
                cli::ui::style_text(&e.user_message(), cli::ui::StyleType::Error)
            );
            Err(anyhow!(e))
        }
    }
}
