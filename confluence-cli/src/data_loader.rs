//! CSV bar loading for the CLI.
//!
//! Expected header: `timestamp,open,high,low,close,volume` with RFC 3339
//! timestamps. The engine re-validates the series on evaluation, so this
//! loader only handles parsing.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use confluence_core::domain::PriceBar;

#[derive(Debug, Deserialize)]
struct CsvBar {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl From<CsvBar> for PriceBar {
    fn from(row: CsvBar) -> Self {
        PriceBar {
            timestamp: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

pub fn load_bars_csv(path: &Path) -> Result<Vec<PriceBar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening bar file {}", path.display()))?;

    let mut bars = Vec::new();
    for (line, row) in reader.deserialize::<CsvBar>().enumerate() {
        let row =
            row.with_context(|| format!("parsing bar row {} in {}", line + 1, path.display()))?;
        bars.push(PriceBar::from(row));
    }

    if bars.is_empty() {
        bail!("no bars found in {}", path.display());
    }
    Ok(bars)
}
