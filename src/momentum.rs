//! Momentum indicators: MACD.

use crate::common::{has_enough_data, undefined_vec};
use crate::error::ChartError;
use crate::series::DerivedSeries;

/// MACD output bundle, aligned with the input series.
///
/// Histogram sign is per-bar data: the renderer colors positive and
/// negative bars differently.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd: DerivedSeries,
    pub signal: DerivedSeries,
    pub histogram: DerivedSeries,
}

/// MACD - Moving Average Convergence Divergence
///
/// # Formula
/// MACD Line   = EMA(fast) - EMA(slow)
/// Signal Line = EMA(MACD Line, signal)
/// Histogram   = MACD Line - Signal Line
///
/// Both EMAs are seeded at the slow period index (matches TA-Lib): the
/// slow EMA from the SMA of the first `slow` values, the fast EMA from
/// the SMA of the `fast` values ending there. The signal line is
/// seeded from the SMA of the first `signal` MACD values.
///
/// # Errors
/// `InvalidParameter` when any period is `< 1` or `fast >= slow`.
/// A series shorter than `slow` yields all-undefined output instead.
pub fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdOutput, ChartError> {
    if fast < 1 || slow < 1 || signal < 1 {
        return Err(ChartError::InvalidParameter(format!(
            "MACD periods must be >= 1, got fast {fast}, slow {slow}, signal {signal}"
        )));
    }
    if fast >= slow {
        return Err(ChartError::InvalidParameter(format!(
            "MACD fast period {fast} must be below slow period {slow}"
        )));
    }

    let n = closes.len();
    let mut macd_line = undefined_vec(n);
    let mut signal_line = undefined_vec(n);
    let mut histogram = undefined_vec(n);
    if !has_enough_data(n, slow) {
        return Ok(MacdOutput {
            macd: macd_line,
            signal: signal_line,
            histogram,
        });
    }

    let slow_start = slow - 1;
    let fast_k = 2.0 / (fast as f64 + 1.0);
    let slow_k = 2.0 / (slow as f64 + 1.0);

    let mut fast_ema: f64 = closes[(slow - fast)..slow].iter().sum::<f64>() / fast as f64;
    let mut slow_ema: f64 = closes[..slow].iter().sum::<f64>() / slow as f64;
    macd_line[slow_start] = Some(fast_ema - slow_ema);

    for i in slow..n {
        fast_ema = (closes[i] - fast_ema) * fast_k + fast_ema;
        slow_ema = (closes[i] - slow_ema) * slow_k + slow_ema;
        macd_line[i] = Some(fast_ema - slow_ema);
    }

    // Signal line, seeded from the first `signal` MACD values
    let signal_k = 2.0 / (signal as f64 + 1.0);
    let signal_start = slow_start + signal - 1;
    if signal_start < n {
        let seed: f64 = macd_line[slow_start..=signal_start]
            .iter()
            .flatten()
            .sum::<f64>()
            / signal as f64;
        let mut prev = seed;
        signal_line[signal_start] = Some(prev);
        for i in (signal_start + 1)..n {
            if let Some(m) = macd_line[i] {
                prev = (m - prev) * signal_k + prev;
                signal_line[i] = Some(prev);
            }
        }
    }

    for i in 0..n {
        if let (Some(m), Some(s)) = (macd_line[i], signal_line[i]) {
            histogram[i] = Some(m - s);
        }
    }

    Ok(MacdOutput {
        macd: macd_line,
        signal: signal_line,
        histogram,
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
    fn test_macd_warmup_boundaries() {
        let closes: Vec<f64> = (1..=40).map(|x| x as f64).collect();
        let output = macd(&closes, 3, 6, 4).unwrap();

        // MACD line defined from the slow index
        assert_eq!(output.macd[4], None);
        assert!(output.macd[5].is_some());
        // Signal seeded `signal - 1` points later
        assert_eq!(output.signal[7], None);
        assert!(output.signal[8].is_some());
        // Histogram follows the signal line
        assert_eq!(output.histogram[7], None);
        assert!(output.histogram[8].is_some());
    }

    #[test]
    fn test_macd_seed_values() {
        let closes = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let output = macd(&closes, 2, 4, 3).unwrap();

        // Slow seed: SMA of [1,2,3,4] = 2.5; fast seed: SMA of [3,4] = 3.5
        assert_approx_eq(output.macd[3], 3.5 - 2.5);
    }

    #[test]
    fn test_histogram_identity() {
        let closes: Vec<f64> = (0..60)
            .map(|x| 100.0 + (x as f64 * 0.7).sin() * 10.0)
            .collect();
        let output = macd(&closes, 12, 26, 9).unwrap();

        for i in 0..closes.len() {
            match (output.histogram[i], output.macd[i], output.signal[i]) {
                (Some(h), Some(m), Some(s)) => assert_eq!(h, m - s),
                (None, _, _) => {}
                other => panic!("histogram defined without inputs: {:?}", other),
            }
        }
    }

    #[test]
    fn test_macd_short_input_all_undefined() {
        let closes = vec![1.0, 2.0, 3.0];
        let output = macd(&closes, 12, 26, 9).unwrap();
        assert!(output.macd.iter().all(|x| x.is_none()));
        assert!(output.signal.iter().all(|x| x.is_none()));
        assert!(output.histogram.iter().all(|x| x.is_none()));
    }

    #[test]
    fn test_macd_rejects_bad_parameters() {
        let closes = vec![1.0; 50];
        assert!(macd(&closes, 26, 12, 9).is_err()); // fast >= slow
        assert!(macd(&closes, 12, 12, 9).is_err());
        assert!(macd(&closes, 0, 26, 9).is_err());
        assert!(macd(&closes, 12, 26, 0).is_err());
    }

    #[test]
    fn test_macd_output_lengths_match_input() {
        let closes: Vec<f64> = (1..=50).map(|x| x as f64).collect();
        let output = macd(&closes, 12, 26, 9).unwrap();
        assert_eq!(output.macd.len(), 50);
        assert_eq!(output.signal.len(), 50);
        assert_eq!(output.histogram.len(), 50);
    }
}
