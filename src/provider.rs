//! Data provider boundary.
//!
//! The engine only sees this trait; swapping the data source must not
//! affect anything downstream of it.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::error::ChartError;
use crate::series::{Bar, PriceSeries};

/// Failures at the data boundary. Both are recoverable: the engine
/// turns them into an informational chart, never a crash.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Unknown symbol or no data in the requested range.
    #[error("no data available: {0}")]
    DataUnavailable(String),

    /// The provider itself failed (I/O, malformed payload).
    #[error("{0}")]
    Service(String),
}

impl From<ProviderError> for ChartError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::DataUnavailable(msg) => ChartError::DataUnavailable(msg),
            ProviderError::Service(msg) => ChartError::Provider(msg),
        }
    }
}

/// Source of daily OHLCV bars for a symbol. `end` is exclusive.
pub trait DataProvider {
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError>;
}

/// Offline provider reading per-symbol CSV files from a directory.
///
/// Expects `{SYMBOL}.csv` with a `date,open,high,low,close,volume`
/// header, dates ascending.
pub struct CsvProvider {
    dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DataProvider for CsvProvider {
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError> {
        let symbol = symbol.to_uppercase();
        let path = self.dir.join(format!("{symbol}.csv"));
        if !path.exists() {
            return Err(ProviderError::DataUnavailable(format!(
                "unknown symbol {symbol}"
            )));
        }

        let mut reader = csv::Reader::from_path(&path)
            .map_err(|e| ProviderError::Service(format!("{}: {e}", path.display())))?;

        let mut bars = Vec::new();
        for row in reader.deserialize::<CsvBar>() {
            let row = row.map_err(|e| ProviderError::Service(format!("{symbol}: {e}")))?;
            if row.date >= start && row.date < end {
                bars.push(Bar {
                    date: row.date,
                    open: row.open,
                    high: row.high,
                    low: row.low,
                    close: row.close,
                    volume: row.volume,
                });
            }
        }
        if bars.is_empty() {
            return Err(ProviderError::DataUnavailable(format!(
                "no data for {symbol} between {start} and {end}"
            )));
        }

        PriceSeries::from_bars(bars).map_err(|e| ProviderError::Service(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn write_fixture(dir: &std::path::Path) {
        let mut file = std::fs::File::create(dir.join("SPY.csv")).unwrap();
        writeln!(file, "date,open,high,low,close,volume").unwrap();
        writeln!(file, "2024-01-02,100.0,101.0,99.0,100.5,1000").unwrap();
        writeln!(file, "2024-01-03,100.5,102.0,100.0,101.5,1100").unwrap();
        writeln!(file, "2024-01-04,101.5,103.0,101.0,102.0,900").unwrap();
    }

    #[test]
    fn test_fetch_filters_half_open_range() {
        let dir = std::env::temp_dir().join("candleview-csv-test-range");
        std::fs::create_dir_all(&dir).unwrap();
        write_fixture(&dir);

        let provider = CsvProvider::new(&dir);
        let series = provider.fetch("spy", day(1, 2), day(1, 4)).unwrap();
        // End date is exclusive: the 2024-01-04 bar stays out.
        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[1].date, day(1, 3));
    }

    #[test]
    fn test_fetch_unknown_symbol() {
        let dir = std::env::temp_dir().join("candleview-csv-test-unknown");
        std::fs::create_dir_all(&dir).unwrap();

        let provider = CsvProvider::new(&dir);
        let err = provider.fetch("ZZZZINVALID", day(1, 1), day(2, 1)).unwrap_err();
        assert!(matches!(err, ProviderError::DataUnavailable(_)));
    }

    #[test]
    fn test_fetch_empty_range() {
        let dir = std::env::temp_dir().join("candleview-csv-test-empty");
        std::fs::create_dir_all(&dir).unwrap();
        write_fixture(&dir);

        let provider = CsvProvider::new(&dir);
        let err = provider.fetch("SPY", day(6, 1), day(7, 1)).unwrap_err();
        assert!(matches!(err, ProviderError::DataUnavailable(_)));
    }
}
