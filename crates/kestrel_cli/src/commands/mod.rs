//! CLI subcommand implementations.

pub mod market;
pub mod price;

use std::path::PathBuf;

use clap::Args;
use kestrel_core::types::Date;

use crate::error::Result;

/// Market data file locations shared by all subcommands.
#[derive(Debug, Args)]
pub struct MarketDataArgs {
    /// Rate curve file (tenor:value lines)
    #[arg(long, default_value = "data/curve.txt")]
    pub curves: PathBuf,

    /// Vol curve file (tenor:value lines)
    #[arg(long, default_value = "data/vol.txt")]
    pub vols: PathBuf,

    /// Spot price file (name value lines)
    #[arg(long, default_value = "data/stockPrice.txt")]
    pub spots: PathBuf,

    /// Valuation date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

impl MarketDataArgs {
    /// The valuation date: parsed from `--date` or today's date.
    pub fn valuation_date(&self) -> Result<Date> {
        match &self.date {
            Some(text) => Ok(text.parse()?),
            None => Ok(Date::today()),
        }
    }
}
