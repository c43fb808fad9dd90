//! Engine configuration.
//!
//! An optional TOML file (`kestrel.toml` by default) sets the lattice
//! step count, bump sizes and default curve bindings; command-line flags
//! override individual values.

use std::path::Path;

use serde::Deserialize;

use crate::error::{CliError, Result};

/// Engine configuration with driver defaults.
///
/// ```toml
/// steps = 50
/// curve_bump = 0.0001
/// vol_bump = 0.01
/// discount_curve = "USD-SOFR"
/// vol_curve = "EQ-VOL"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Binomial lattice time steps.
    pub steps: usize,
    /// Absolute rate curve bump (0.0001 = 1bp).
    pub curve_bump: f64,
    /// Absolute vol curve bump (0.01 = 1 vol point).
    pub vol_bump: f64,
    /// Curve name bound to loaded rate pillars and used to discount
    /// trades from the portfolio file.
    pub discount_curve: String,
    /// Curve name bound to loaded vol pillars and used by option trades.
    pub vol_curve: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            steps: 50,
            curve_bump: 0.0001,
            vol_bump: 0.01,
            discount_curve: "USD-SOFR".to_string(),
            vol_curve: "EQ-VOL".to_string(),
        }
    }
}

impl EngineConfig {
    /// Loads the config file when it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| CliError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
