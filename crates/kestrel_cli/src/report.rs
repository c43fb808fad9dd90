//! Delimited result report.

use std::path::Path;

use kestrel_models::instruments::Trade;
use serde::Serialize;

use crate::error::Result;

/// One report line: identity, PV and the sensitivity name/value pairs.
///
/// Failed instruments keep their row (with the failure in `status`) so
/// the report always accounts for every loaded trade.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// Trade identifier.
    pub id: String,
    /// Instrument kind label.
    pub kind: String,
    /// Underlying name, empty when not applicable.
    pub underlying: String,
    /// Present value; empty on failure.
    pub pv: Option<f64>,
    /// Name of the bumped rate curve, empty when not applicable.
    pub risk_factor: String,
    /// DV01 against `risk_factor`.
    pub dv01: Option<f64>,
    /// Name of the bumped vol curve, empty when not applicable.
    pub vol_factor: String,
    /// Vega against `vol_factor`.
    pub vega: Option<f64>,
    /// "OK" or "FAILED: <reason>".
    pub status: String,
}

impl ReportRow {
    /// A row shell for a trade, before valuation results are filled in.
    pub fn for_trade(trade: &Trade) -> Self {
        Self {
            id: trade.id().to_string(),
            kind: trade.kind().to_string(),
            underlying: trade.underlying_name().unwrap_or_default().to_string(),
            pv: None,
            risk_factor: String::new(),
            dv01: None,
            vol_factor: String::new(),
            vega: None,
            status: "OK".to_string(),
        }
    }

    /// Marks the row failed with a reason.
    pub fn fail(mut self, reason: impl std::fmt::Display) -> Self {
        self.status = format!("FAILED: {}", reason);
        self
    }
}

/// Writes the ';'-delimited report.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::types::Date;
    use kestrel_models::instruments::Bond;
    use kestrel_models::schedules::Frequency;

    fn sample_trade() -> Trade {
        Trade::Bond(
            Bond::new(
                "UST-2Y",
                Date::from_ymd(2024, 1, 1).unwrap(),
                Date::from_ymd(2026, 1, 1).unwrap(),
                100.0,
                0.05,
                Frequency::SemiAnnual,
                "USD-SOFR",
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_report_round_trip() {
        let dir = std::env::temp_dir().join("kestrel_report_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.csv");

        let mut row = ReportRow::for_trade(&sample_trade());
        row.pv = Some(101.82);
        row.risk_factor = "USD-SOFR".to_string();
        row.dv01 = Some(-19.4);
        let failed = ReportRow::for_trade(&sample_trade()).fail("curve missing");

        write_report(&path, &[row, failed]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id;kind;underlying;pv;risk_factor;dv01;vol_factor;vega;status"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("UST-2Y;Bond;UST-2Y;101.82;USD-SOFR;-19.4"));
        assert!(first.ends_with("OK"));
        let second = lines.next().unwrap();
        assert!(second.contains("FAILED: curve missing"));
    }
}
