//! Price command: value the portfolio and report sensitivities.

use std::path::PathBuf;

use clap::Args;
use kestrel_core::market_data::Market;
use kestrel_core::types::DayCount;
use kestrel_models::instruments::{Instrument, OptionType, Trade, TreeProduct};
use kestrel_pricing::{BlackScholes, Pricer};
use kestrel_risk::RiskEngine;
use tracing::{error, info, warn};

use super::MarketDataArgs;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::report::{self, ReportRow};
use crate::{loader, portfolio};

/// Arguments for `kestrel price`.
#[derive(Debug, Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub market: MarketDataArgs,

    /// Portfolio file (';'-delimited)
    #[arg(long, default_value = "data/portfolio.csv")]
    pub trades: PathBuf,

    /// Lattice step count; overrides the config file
    #[arg(long)]
    pub steps: Option<usize>,

    /// Report output path
    #[arg(short, long, default_value = "report.csv")]
    pub output: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "kestrel.toml")]
    pub config: PathBuf,
}

/// Runs the full valuation pipeline: load market, load portfolio, price
/// each trade with DV01 and vega, write the delimited report.
pub fn run(args: &PriceArgs) -> Result<()> {
    let config = EngineConfig::load_or_default(&args.config)?;
    let steps = args.steps.unwrap_or(config.steps);
    let as_of = args.market.valuation_date()?;
    info!(%as_of, steps, "starting pricing run");

    let mut market = loader::load_market(
        as_of,
        &args.market.curves,
        &args.market.vols,
        &args.market.spots,
        &config,
    )?;
    let portfolio = portfolio::load_portfolio(&args.trades, &config)?;
    for (name, quote) in &portfolio.bond_quotes {
        market.add_bond_price(name.clone(), *quote);
    }

    let pricer = Pricer::new(steps);
    let engine = RiskEngine::new(config.curve_bump, config.vol_bump);

    let rows: Vec<ReportRow> = portfolio
        .trades
        .iter()
        .map(|trade| price_one(trade, &market, &pricer, &engine))
        .collect();

    compare_first_call_with_black_scholes(&portfolio.trades, &market, &pricer);

    report::write_report(&args.output, &rows)?;
    let failures = rows.iter().filter(|r| r.status != "OK").count();
    info!(
        trades = rows.len(),
        failures,
        output = %args.output.display(),
        "report written"
    );
    Ok(())
}

/// Values one trade. Failures are isolated into the report row so the
/// rest of the portfolio keeps processing.
fn price_one(trade: &Trade, market: &Market, pricer: &Pricer, engine: &RiskEngine) -> ReportRow {
    let mut row = ReportRow::for_trade(trade);

    let pv = match pricer.price(market, trade) {
        Ok(pv) => pv,
        Err(e) => {
            error!(id = trade.id(), error = %e, "pricing failed");
            return row.fail(e);
        }
    };
    row.pv = Some(pv);

    match engine.dv01(trade, market, pricer) {
        Ok(dv01) => {
            if let Some((factor, value)) = dv01.into_iter().next() {
                row.risk_factor = factor;
                row.dv01 = Some(value);
            }
        }
        Err(e) => {
            warn!(id = trade.id(), error = %e, "DV01 failed");
            row.status = format!("PARTIAL: {}", e);
        }
    }

    match engine.vega(trade, market, pricer) {
        Ok(vega) => {
            if let Some((factor, value)) = vega.into_iter().next() {
                row.vol_factor = factor;
                row.vega = Some(value);
            }
        }
        Err(e) => {
            warn!(id = trade.id(), error = %e, "vega failed");
            row.status = format!("PARTIAL: {}", e);
        }
    }

    row
}

/// Logs a lattice-vs-closed-form comparison for the first European call
/// in the portfolio, as a sanity check on the tree calibration.
fn compare_first_call_with_black_scholes(trades: &[Trade], market: &Market, pricer: &Pricer) {
    let Some((trade, option)) = trades.iter().find_map(|trade| match trade {
        Trade::European(option) if option.option_type() == OptionType::Call => {
            Some((trade, option))
        }
        _ => None,
    }) else {
        return;
    };

    let Some(underlying) = option.underlying_name() else {
        return;
    };
    let spot = market.spot_price(underlying);
    let expiry = option.expiry();
    let t = DayCount::Act365F.year_fraction(market.as_of(), expiry);

    let rate = option
        .rate_curve_name()
        .and_then(|name| market.curve(name))
        .map(|curve| curve.rate(expiry));
    let vol = option
        .vol_curve_name()
        .and_then(|name| market.vol_curve(name))
        .map(|curve| curve.vol(expiry));

    let (Some(rate), Some(vol)) = (rate, vol) else {
        warn!(id = trade.id(), "curves missing, skipping closed-form comparison");
        return;
    };
    if t <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        info!(id = trade.id(), "degenerate parameters, skipping closed-form comparison");
        return;
    }

    let tree_pv = match pricer.price(market, trade) {
        Ok(pv) => pv,
        Err(_) => return,
    };
    let bs_pv = match BlackScholes::new(spot, rate, vol) {
        Ok(bs) => bs.price(OptionType::Call, option.strike(), t),
        Err(_) => return,
    };

    info!(
        id = trade.id(),
        spot,
        strike = option.strike(),
        t,
        rate,
        vol,
        tree_pv,
        bs_pv,
        difference = tree_pv - bs_pv,
        "lattice vs Black-Scholes for first European call"
    );
}
