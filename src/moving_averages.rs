//! Moving average overlays.
//!
//! This module provides the two price-panel moving averages:
//! - SMA: Simple Moving Average
//! - EMA: Exponential Moving Average
//!
//! Both return a series of the same length as the input, with the
//! warm-up prefix undefined.

use crate::common::{has_enough_data, mean, rolling, undefined_vec};
use crate::error::ChartError;
use crate::series::DerivedSeries;

/// Simple Moving Average (SMA)
///
/// The arithmetic mean of the last `period` values.
///
/// # Formula
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// # Returns
/// Series of the same length as the input, with the first `period - 1`
/// points undefined. An input shorter than `period` yields an
/// all-undefined series, not an error.
///
/// # Errors
/// `InvalidParameter` when `period < 1`.
///
/// # Example
/// ```
/// use candleview::sma;
/// let prices = vec![2.0, 4.0, 6.0, 8.0, 10.0];
/// let result = sma(&prices, 3).unwrap();
/// assert_eq!(result[2], Some(4.0)); // (2+4+6)/3
/// assert_eq!(result[4], Some(8.0)); // (6+8+10)/3
/// ```
pub fn sma(values: &[f64], period: usize) -> Result<DerivedSeries, ChartError> {
    if period < 1 {
        return Err(ChartError::InvalidParameter(format!(
            "SMA period must be >= 1, got {period}"
        )));
    }

    let n = values.len();
    let mut result = undefined_vec(n);
    if !has_enough_data(n, period) {
        return Ok(result);
    }

    // Rolling calculation - add new, subtract old
    let mut sum: f64 = values[..period].iter().sum();
    result[period - 1] = Some(sum / period as f64);
    for i in period..n {
        sum = sum + values[i] - values[i - period];
        result[i] = Some(sum / period as f64);
    }

    Ok(result)
}

/// SMA over an already-derived series (used to smooth RSI).
///
/// Windows containing an undefined point stay undefined, so the
/// smoothed series starts `period - 1` points after its input does.
pub fn sma_of(values: &[Option<f64>], period: usize) -> Result<DerivedSeries, ChartError> {
    if period < 1 {
        return Err(ChartError::InvalidParameter(format!(
            "SMA period must be >= 1, got {period}"
        )));
    }
    Ok(rolling(values, period, |w| Some(mean(w))))
}

/// Exponential Moving Average (EMA)
///
/// Gives more weight to recent prices using exponential decay.
///
/// # Formula
/// Multiplier = 2 / (period + 1)
/// EMA = (Price - Previous EMA) × Multiplier + Previous EMA
///
/// The first EMA is seeded with the SMA of the first `period` values;
/// earlier points are undefined.
///
/// # Errors
/// `InvalidParameter` when `period < 1`.
pub fn ema(values: &[f64], period: usize) -> Result<DerivedSeries, ChartError> {
    if period < 1 {
        return Err(ChartError::InvalidParameter(format!(
            "EMA period must be >= 1, got {period}"
        )));
    }
    let defined: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    Ok(ema_of(&defined, period))
}

/// EMA over a derived series with a possibly undefined prefix.
///
/// Seeds from the SMA of the first `period` defined values and runs
/// the recurrence from there. Callers validate `period`.
pub(crate) fn ema_of(values: &[Option<f64>], period: usize) -> DerivedSeries {
    let n = values.len();
    let mut result = undefined_vec(n);
    if period < 1 {
        return result;
    }

    let first_valid = match values.iter().position(|v| v.is_some()) {
        Some(i) => i,
        None => return result,
    };
    if first_valid + period > n {
        return result;
    }

    // Seed: SMA of the first `period` defined values
    let mut sum = 0.0;
    for v in &values[first_valid..first_valid + period] {
        match v {
            Some(x) => sum += x,
            None => return result,
        }
    }
    let multiplier = 2.0 / (period as f64 + 1.0);
    let start_idx = first_valid + period - 1;
    let mut prev = sum / period as f64;
    result[start_idx] = Some(prev);

    for i in (start_idx + 1)..n {
        if let Some(x) = values[i] {
            prev = (x - prev) * multiplier + prev;
            result[i] = Some(prev);
        }
    }

    result
}
