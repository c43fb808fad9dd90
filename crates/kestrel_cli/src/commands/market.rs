//! Market command: load and display the market snapshot.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::MarketDataArgs;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::loader;

/// Arguments for `kestrel market`.
#[derive(Debug, Args)]
pub struct MarketArgs {
    #[command(flatten)]
    pub market: MarketDataArgs,

    /// Configuration file path
    #[arg(short, long, default_value = "kestrel.toml")]
    pub config: PathBuf,
}

/// Loads the market data files and prints the snapshot.
pub fn run(args: &MarketArgs) -> Result<()> {
    let config = EngineConfig::load_or_default(&args.config)?;
    let as_of = args.market.valuation_date()?;
    info!(%as_of, "loading market snapshot");

    let market = loader::load_market(
        as_of,
        &args.market.curves,
        &args.market.vols,
        &args.market.spots,
        &config,
    )?;

    println!("{}", market);
    Ok(())
}
