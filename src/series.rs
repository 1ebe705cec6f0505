//! Price series data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One trading day of OHLCV data. Immutable once fetched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A derived indicator series, positionally aligned with the
/// [`PriceSeries`] it was computed from.
///
/// `None` marks points inside an indicator's warm-up prefix.
pub type DerivedSeries = Vec<Option<f64>>;

/// Validation failures when constructing a [`PriceSeries`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bars out of order at {date}: dates must be strictly increasing")]
    OutOfOrder { date: NaiveDate },
    #[error("invalid OHLC at {date}: open {open}, high {high}, low {low}, close {close}")]
    InvalidOhlc {
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    },
}

/// An ordered, validated sequence of daily bars.
///
/// Owned by the chart assembler for the duration of one recompute and
/// only ever read.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series, enforcing strictly increasing dates and
    /// `0 < low <= open, close <= high` on every bar.
    pub fn from_bars(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for bar in &bars {
            let body_low = bar.open.min(bar.close);
            let body_high = bar.open.max(bar.close);
            if !(bar.low > 0.0 && bar.low <= body_low && bar.high >= body_high) {
                return Err(SeriesError::InvalidOhlc {
                    date: bar.date,
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                });
            }
        }
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder { date: pair[1].date });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Bar dates in order; this is the shared x-axis of the chart.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn flat_bar(d: u32, price: f64) -> Bar {
        Bar {
            date: day(d),
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 1_000,
        }
    }

    #[test]
    fn test_from_bars_ok() {
        let series = PriceSeries::from_bars(vec![flat_bar(1, 10.0), flat_bar(2, 11.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![10.0, 11.0]);
        assert_eq!(series.dates(), vec![day(1), day(2)]);
    }

    #[test]
    fn test_from_bars_empty_ok() {
        let series = PriceSeries::from_bars(vec![]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_dates() {
        let err = PriceSeries::from_bars(vec![flat_bar(1, 10.0), flat_bar(1, 11.0)]).unwrap_err();
        assert_eq!(err, SeriesError::OutOfOrder { date: day(1) });
    }

    #[test]
    fn test_rejects_descending_dates() {
        let err = PriceSeries::from_bars(vec![flat_bar(2, 10.0), flat_bar(1, 11.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn test_rejects_low_above_body() {
        let bad = Bar {
            date: day(1),
            open: 10.0,
            high: 12.0,
            low: 10.5,
            close: 11.0,
            volume: 0,
        };
        let err = PriceSeries::from_bars(vec![bad]).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidOhlc { .. }));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let bad = Bar {
            date: day(1),
            open: 1.0,
            high: 1.0,
            low: 0.0,
            close: 1.0,
            volume: 0,
        };
        assert!(PriceSeries::from_bars(vec![bad]).is_err());
    }
}
