//! Portfolio file loader.
//!
//! The portfolio is a ';'-delimited file with header
//! `id;type;trade_date;start_date;end_date;notional;underlying;rate;strike;frequency;option`.
//! `type` selects the instrument kind (bond, swap, european, american);
//! `frequency` is the year fraction between payments (0.5 = semi-annual);
//! `strike` doubles as the quoted market price for bonds. Malformed rows
//! are skipped with a warning so one bad row never aborts the run.

use std::path::Path;

use kestrel_core::types::Date;
use kestrel_models::instruments::{
    AmericanOption, Bond, EuropeanOption, OptionType, Swap, Trade,
};
use kestrel_models::schedules::Frequency;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{CliError, Result};

/// One row of the portfolio file.
#[derive(Debug, Deserialize)]
struct TradeRecord {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    trade_date: String,
    start_date: String,
    end_date: String,
    notional: f64,
    underlying: String,
    rate: f64,
    strike: f64,
    frequency: f64,
    option: String,
}

/// A loaded portfolio plus the bond quotes found in it.
#[derive(Debug)]
pub struct Portfolio {
    /// Successfully constructed trades, in file order.
    pub trades: Vec<Trade>,
    /// Quoted market prices carried on bond rows.
    pub bond_quotes: Vec<(String, f64)>,
}

/// Maps a year-fraction-between-payments onto a supported frequency.
fn frequency_from_year_fraction(value: f64) -> Result<Frequency> {
    if value <= 0.0 {
        return Err(CliError::Frequency { value });
    }
    let per_year = (1.0 / value).round();
    if per_year < 1.0 || per_year > u32::MAX as f64 {
        return Err(CliError::Frequency { value });
    }
    Frequency::from_per_year(per_year as u32).ok_or(CliError::Frequency { value })
}

/// Builds one trade from a parsed row. The quote (bond rows only) rides
/// alongside so the driver can register it on the market.
fn build_trade(
    record: &TradeRecord,
    config: &EngineConfig,
) -> Result<(Trade, Option<(String, f64)>)> {
    // Trade date is validated even though valuation only needs the
    // start/end dates.
    let _trade_date: Date = record.trade_date.parse()?;
    let start: Date = record.start_date.parse()?;
    let end: Date = record.end_date.parse()?;

    match record.kind.to_ascii_lowercase().as_str() {
        "bond" => {
            let frequency = if record.rate.abs() > 1e-9 {
                frequency_from_year_fraction(record.frequency)?
            } else {
                Frequency::Annual
            };
            let bond = Bond::new(
                &record.id,
                start,
                end,
                record.notional,
                record.rate,
                frequency,
                &config.discount_curve,
            )?;
            let quote = (record.strike > 0.0).then(|| (record.id.clone(), record.strike));
            Ok((Trade::Bond(bond), quote))
        }
        "swap" => {
            let frequency = frequency_from_year_fraction(record.frequency)?;
            let swap = Swap::new(
                &record.id,
                start,
                end,
                record.notional,
                record.rate,
                frequency,
                &config.discount_curve,
                &config.discount_curve,
            )?;
            Ok((Trade::Swap(swap), None))
        }
        "european" => {
            let option_type = parse_option_type(&record.option)?;
            let option = EuropeanOption::new(
                &record.id,
                option_type,
                record.strike,
                end,
                &record.underlying,
                &config.discount_curve,
                &config.vol_curve,
            )?;
            Ok((Trade::European(option), None))
        }
        "american" => {
            let option_type = parse_option_type(&record.option)?;
            let option = AmericanOption::new(
                &record.id,
                option_type,
                record.strike,
                end,
                &record.underlying,
                &config.discount_curve,
                &config.vol_curve,
            )?;
            Ok((Trade::American(option), None))
        }
        other => Err(CliError::UnknownTradeType {
            kind: other.to_string(),
        }),
    }
}

fn parse_option_type(text: &str) -> Result<OptionType> {
    text.parse().map_err(|_| CliError::Value {
        text: text.to_string(),
    })
}

/// Loads the portfolio file, isolating per-row failures.
pub fn load_portfolio(path: &Path, config: &EngineConfig) -> Result<Portfolio> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_path(path)?;

    let file = path.display().to_string();
    let mut trades = Vec::new();
    let mut bond_quotes = Vec::new();

    for (index, row) in reader.deserialize::<TradeRecord>().enumerate() {
        // +2: one for the header, one for 1-based numbering.
        let line = index + 2;
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                warn!(%file, line, error = %e, "unreadable portfolio row, skipping");
                continue;
            }
        };
        match build_trade(&record, config) {
            Ok((trade, quote)) => {
                if let Some(quote) = quote {
                    bond_quotes.push(quote);
                }
                trades.push(trade);
            }
            Err(e) => {
                warn!(%file, line, id = %record.id, error = %e, "invalid trade row, skipping");
            }
        }
    }

    if trades.is_empty() {
        warn!(%file, "no valid trades loaded");
    } else {
        info!(%file, count = trades.len(), "loaded portfolio");
    }
    Ok(Portfolio {
        trades,
        bond_quotes,
    })
}
