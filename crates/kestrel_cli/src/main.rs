//! Kestrel CLI - valuation and sensitivity runs from the command line.
//!
//! # Commands
//!
//! - `kestrel price` - price a portfolio and write a delimited report
//!   with DV01 and vega per trade
//! - `kestrel market` - load and display the market snapshot
//!
//! Market data lives in three delimited files (rate curve, vol curve,
//! spot prices) and the portfolio in a ';'-delimited trade file; see the
//! `data/` directory for working samples:
//!
//! ```text
//! kestrel price --date 2024-01-02 --trades data/portfolio.csv -o report.csv
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod loader;
mod portfolio;
mod report;

pub use error::{CliError, Result};

/// Kestrel valuation engine CLI.
#[derive(Parser)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a portfolio and report PV, DV01 and vega per trade
    Price(commands::price::PriceArgs),

    /// Load and display the market snapshot
    Market(commands::market::MarketArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &cli.command {
        Commands::Price(args) => {
            commands::price::run(args).context("pricing run failed")?;
        }
        Commands::Market(args) => {
            commands::market::run(args).context("market inspection failed")?;
        }
    }
    Ok(())
}
