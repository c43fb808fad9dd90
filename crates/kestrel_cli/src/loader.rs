//! Market data file loaders.
//!
//! File formats are owned here, not by the core:
//!
//! - curve/vol files: `tenor:value` lines, where the tenor is `ON`,
//!   `<n>M` or `<n>Y` relative to the valuation date and the value is a
//!   percentage (`4.7%` or `4.7` both mean 0.047). Lines without a colon
//!   (headers, comments) are skipped with a warning.
//! - spot files: whitespace-separated `name value` lines with values in
//!   natural units.
//!
//! Malformed lines are skipped and logged so one bad row never aborts a
//! load.

use std::path::Path;

use kestrel_core::market_data::{Market, RateCurve, VolCurve};
use kestrel_core::types::Date;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{CliError, Result};

/// Resolves a tenor label (`ON`, `3M`, `10Y`) against a base date.
pub fn parse_tenor(base: Date, label: &str) -> Result<Date> {
    let label = label.trim();
    if label == "ON" {
        return Ok(base.add_days(1)?);
    }

    let split = label
        .find(|c: char| !c.is_ascii_digit())
        .filter(|&idx| idx > 0)
        .ok_or_else(|| CliError::Tenor {
            label: label.to_string(),
        })?;
    let (count, unit) = label.split_at(split);
    let count: i32 = count.parse().map_err(|_| CliError::Tenor {
        label: label.to_string(),
    })?;

    let date = match unit {
        "M" => base.add_months(count)?,
        "Y" => base.add_years(count)?,
        _ => {
            return Err(CliError::Tenor {
                label: label.to_string(),
            })
        }
    };
    Ok(date)
}

/// Parses a percentage value: `5.5%` and `5.5` both mean 0.055.
pub fn parse_percent(text: &str) -> Result<f64> {
    let number = text.trim().trim_end_matches('%').trim();
    number
        .parse::<f64>()
        .map(|v| v / 100.0)
        .map_err(|_| CliError::Value {
            text: text.to_string(),
        })
}

/// Iterates `tenor:value` lines of a curve-style file, skipping and
/// logging anything unparseable.
fn load_pillars(path: &Path, base: Date) -> Result<Vec<(Date, f64)>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    let file = path.display();

    let mut pillars = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((tenor_text, value_text)) = line.split_once(':') else {
            warn!(%file, line = number + 1, "no 'tenor:value' separator, skipping line");
            continue;
        };
        let tenor = match parse_tenor(base, tenor_text) {
            Ok(tenor) => tenor,
            Err(e) => {
                warn!(%file, line = number + 1, error = %e, "skipping line");
                continue;
            }
        };
        let value = match parse_percent(value_text) {
            Ok(value) => value,
            Err(e) => {
                warn!(%file, line = number + 1, error = %e, "skipping line");
                continue;
            }
        };
        pillars.push((tenor, value));
    }
    Ok(pillars)
}

/// Loads a rate curve from a `tenor:value` file.
pub fn load_rate_curve(path: &Path, name: &str, base: Date) -> Result<RateCurve> {
    let mut curve = RateCurve::new(name);
    for (tenor, value) in load_pillars(path, base)? {
        curve.add_rate(tenor, value);
    }
    if curve.is_empty() {
        warn!(curve = name, file = %path.display(), "loaded curve has no pillars");
    }
    Ok(curve)
}

/// Loads a vol curve from a `tenor:value` file.
pub fn load_vol_curve(path: &Path, name: &str, base: Date) -> Result<VolCurve> {
    let mut curve = VolCurve::new(name);
    for (tenor, value) in load_pillars(path, base)? {
        curve.add_vol(tenor, value);
    }
    if curve.is_empty() {
        warn!(curve = name, file = %path.display(), "loaded curve has no pillars");
    }
    Ok(curve)
}

/// Loads `name value` spot price pairs.
pub fn load_spot_prices(path: &Path) -> Result<Vec<(String, f64)>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    let file = path.display();

    let mut prices = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(name), Some(price_text)) = (parts.next(), parts.next()) else {
            warn!(%file, line = number + 1, "expected 'name price', skipping line");
            continue;
        };
        match price_text.parse::<f64>() {
            Ok(price) => prices.push((name.to_string(), price)),
            Err(_) => {
                warn!(%file, line = number + 1, text = price_text, "unparseable price, skipping line");
            }
        }
    }
    Ok(prices)
}

/// Assembles a full market snapshot from the three data files.
pub fn load_market(
    as_of: Date,
    curve_path: &Path,
    vol_path: &Path,
    spot_path: &Path,
    config: &EngineConfig,
) -> Result<Market> {
    let mut market = Market::new(as_of);

    let curve = load_rate_curve(curve_path, &config.discount_curve, as_of)?;
    info!(curve = %config.discount_curve, pillars = curve.len(), "loaded rate curve");
    market.add_curve(config.discount_curve.clone(), curve);

    let vols = load_vol_curve(vol_path, &config.vol_curve, as_of)?;
    info!(curve = %config.vol_curve, pillars = vols.len(), "loaded vol curve");
    market.add_vol_curve(config.vol_curve.clone(), vols);

    let spots = load_spot_prices(spot_path)?;
    info!(count = spots.len(), "loaded spot prices");
    for (name, price) in spots {
        market.add_spot_price(name, price);
    }

    Ok(market)
}
