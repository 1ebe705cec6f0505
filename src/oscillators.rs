//! Oscillator indicators: RSI and its smoothing line.

use crate::common::{diff, gains_losses, mean, rolling, undefined_vec};
use crate::error::ChartError;
use crate::moving_averages::sma_of;
use crate::series::DerivedSeries;

/// RSI level above which a market is considered overbought.
pub const OVERBOUGHT: f64 = 70.0;

/// RSI level below which a market is considered oversold.
pub const OVERSOLD: f64 = 30.0;

/// RSI output bundle: the oscillator, its smoothing average and the
/// fixed overbought/oversold reference lines.
///
/// The reference lines are constant series defined at every index so
/// the renderer can draw them across the full x-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RsiOutput {
    pub rsi: DerivedSeries,
    pub rsi_ma: DerivedSeries,
    pub overbought: DerivedSeries,
    pub oversold: DerivedSeries,
}

/// Relative Strength Index over rolling-mean gain/loss averages.
///
/// # Formula
/// Average Gain = rolling mean of positive deltas over `period`
/// Average Loss = rolling mean of absolute negative deltas over `period`
/// RS  = Average Gain / Average Loss
/// RSI = 100 - (100 / (1 + RS))
///
/// When the average loss is zero and the average gain is positive,
/// RSI is exactly 100; a completely flat window is undefined.
///
/// The first `period` points are undefined (the delta at index 0
/// consumes one bar of lookback). `rsi_ma` is an SMA(`ma_period`) of
/// the RSI series.
///
/// # Errors
/// `InvalidParameter` when `period < 1` or `ma_period < 1`.
pub fn rsi(closes: &[f64], period: usize, ma_period: usize) -> Result<RsiOutput, ChartError> {
    if period < 1 {
        return Err(ChartError::InvalidParameter(format!(
            "RSI period must be >= 1, got {period}"
        )));
    }
    if ma_period < 1 {
        return Err(ChartError::InvalidParameter(format!(
            "RSI MA period must be >= 1, got {ma_period}"
        )));
    }

    let n = closes.len();
    let changes = diff(closes);
    let (gains, losses) = gains_losses(&changes);
    let avg_gain = rolling(&gains, period, |w| Some(mean(w)));
    let avg_loss = rolling(&losses, period, |w| Some(mean(w)));

    let mut rsi_series = undefined_vec(n);
    for i in 0..n {
        rsi_series[i] = match (avg_gain[i], avg_loss[i]) {
            (Some(g), Some(l)) if l != 0.0 => Some(100.0 - 100.0 / (1.0 + g / l)),
            (Some(g), Some(_)) if g > 0.0 => Some(100.0),
            _ => None, // warm-up, or a flat window with no movement
        };
    }

    let rsi_ma = sma_of(&rsi_series, ma_period)?;

    Ok(RsiOutput {
        rsi: rsi_series,
        rsi_ma,
        overbought: vec![Some(OVERBOUGHT); n],
        oversold: vec![Some(OVERSOLD); n],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn assert_approx_eq(a: Option<f64>, b: f64) {
        let a = a.expect("value should be defined");
        assert!((a - b).abs() < EPSILON, "Values differ: {} vs {}", a, b);
    }

    #[test]
    fn test_rsi_warmup_length() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64 + (x % 3) as f64).collect();
        let output = rsi(&closes, 14, 5).unwrap();

        for point in output.rsi.iter().take(14) {
            assert_eq!(*point, None);
        }
        assert!(output.rsi[14].is_some());
    }

    #[test]
    fn test_rsi_is_100_when_only_gains() {
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let output = rsi(&closes, 5, 2).unwrap();

        for point in output.rsi.iter().skip(5) {
            assert_eq!(*point, Some(100.0));
        }
    }

    #[test]
    fn test_rsi_is_0_when_only_losses() {
        let closes: Vec<f64> = (1..=10).rev().map(|x| x as f64).collect();
        let output = rsi(&closes, 5, 2).unwrap();

        for point in output.rsi.iter().skip(5) {
            assert_approx_eq(*point, 0.0);
        }
    }

    #[test]
    fn test_rsi_flat_window_is_undefined() {
        let closes = vec![50.0; 12];
        let output = rsi(&closes, 5, 2).unwrap();
        assert!(output.rsi.iter().all(|x| x.is_none()));
    }

    #[test]
    fn test_rsi_bounded() {
        let closes = vec![
            44.0, 44.5, 45.0, 44.5, 45.5, 46.0, 45.5, 46.5, 47.0, 46.0, 45.0, 44.0, 43.0, 44.0,
            45.0, 46.0,
        ];
        let output = rsi(&closes, 14, 5).unwrap();
        for point in output.rsi.iter().flatten() {
            assert!((0.0..=100.0).contains(point), "RSI out of range: {point}");
        }
    }

    #[test]
    fn test_rsi_known_value() {
        // closes 1..=6, period 2: deltas all +1 except we inject a drop.
        let closes = vec![10.0, 11.0, 12.0, 11.0, 12.0];
        let output = rsi(&closes, 2, 2).unwrap();

        // index 3: deltas [+1, -1] -> gain 0.5, loss 0.5, RS 1, RSI 50
        assert_approx_eq(output.rsi[3], 50.0);
        // index 4: deltas [-1, +1] -> same averages
        assert_approx_eq(output.rsi[4], 50.0);
    }

    #[test]
    fn test_rsi_ma_smooths_rsi() {
        let closes: Vec<f64> = (1..=12).map(|x| x as f64).collect();
        let output = rsi(&closes, 4, 3).unwrap();

        // RSI defined from index 4; its SMA(3) from index 6.
        assert_eq!(output.rsi_ma[5], None);
        assert_approx_eq(output.rsi_ma[6], 100.0);
    }

    #[test]
    fn test_reference_lines_cover_every_index() {
        let closes: Vec<f64> = (1..=8).map(|x| x as f64).collect();
        let output = rsi(&closes, 3, 2).unwrap();
        assert_eq!(output.overbought, vec![Some(OVERBOUGHT); 8]);
        assert_eq!(output.oversold, vec![Some(OVERSOLD); 8]);
    }

    #[test]
    fn test_rsi_rejects_bad_parameters() {
        assert!(rsi(&[1.0, 2.0], 0, 5).is_err());
        assert!(rsi(&[1.0, 2.0], 14, 0).is_err());
    }

    #[test]
    fn test_rsi_short_input_all_undefined() {
        let output = rsi(&[1.0, 2.0], 14, 5).unwrap();
        assert_eq!(output.rsi, vec![None, None]);
        assert_eq!(output.rsi_ma, vec![None, None]);
    }
}
