//! Volatility overlays: rolling deviation and Bollinger Bands.

use crate::common::{rolling, sample_std};
use crate::error::ChartError;
use crate::moving_averages::sma;
use crate::series::DerivedSeries;

/// Rolling standard deviation over a trailing window.
///
/// Uses the sample deviation (ddof = 1), so a window of length 1 is
/// undefined everywhere.
pub fn rolling_std(values: &[f64], period: usize) -> Result<DerivedSeries, ChartError> {
    if period < 1 {
        return Err(ChartError::InvalidParameter(format!(
            "standard deviation period must be >= 1, got {period}"
        )));
    }
    let defined: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    Ok(rolling(&defined, period, sample_std))
}

/// Bollinger Bands output, aligned with the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub middle: DerivedSeries,
    pub upper: DerivedSeries,
    pub lower: DerivedSeries,
}

/// Bollinger Bands
///
/// # Formula
/// Middle = SMA(period)
/// Upper  = Middle + multiplier × σ(period)
/// Lower  = Middle - multiplier × σ(period)
///
/// where σ is the rolling sample standard deviation over the same
/// trailing window.
///
/// # Errors
/// `InvalidParameter` when `period < 1` or `multiplier` is not a
/// positive finite number.
pub fn bollinger_bands(
    values: &[f64],
    period: usize,
    multiplier: f64,
) -> Result<BollingerBands, ChartError> {
    if period < 1 {
        return Err(ChartError::InvalidParameter(format!(
            "Bollinger Bands period must be >= 1, got {period}"
        )));
    }
    if !(multiplier > 0.0 && multiplier.is_finite()) {
        return Err(ChartError::InvalidParameter(format!(
            "Bollinger Bands multiplier must be > 0, got {multiplier}"
        )));
    }

    let middle = sma(values, period)?;
    let std = rolling_std(values, period)?;

    let band = |sign: f64| -> DerivedSeries {
        middle
            .iter()
            .zip(&std)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some(m + sign * multiplier * s),
                _ => None,
            })
            .collect()
    };

    Ok(BollingerBands {
        upper: band(1.0),
        lower: band(-1.0),
        middle,
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
    fn test_rolling_std_basic() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        let result = rolling_std(&values, 3).unwrap();

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        // [1,2,3]: sample variance 1.0
        assert_approx_eq(result[2], 1.0);
        assert_approx_eq(result[3], 1.0);
    }

    #[test]
    fn test_bollinger_band_arithmetic() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let bands = bollinger_bands(&values, 3, 2.0).unwrap();

        // At index 2: middle = 2.0, sigma = 1.0
        assert_approx_eq(bands.middle[2], 2.0);
        assert_approx_eq(bands.upper[2], 4.0);
        assert_approx_eq(bands.lower[2], 0.0);
    }

    #[test]
    fn test_bollinger_width_is_two_multiplier_sigma() {
        let values = vec![10.0, 12.0, 11.0, 14.0, 13.0, 15.0, 12.0, 16.0];
        let m = 1.5;
        let bands = bollinger_bands(&values, 4, m).unwrap();
        let sigma = rolling_std(&values, 4).unwrap();

        for i in 0..values.len() {
            match (bands.upper[i], bands.lower[i], sigma[i]) {
                (Some(u), Some(l), Some(s)) => {
                    assert!((u - l - 2.0 * m * s).abs() < EPSILON);
                }
                (None, None, None) => {}
                other => panic!("bands and sigma disagree on definedness: {:?}", other),
            }
        }
    }

    #[test]
    fn test_bollinger_period_one_has_no_bands() {
        // A single-point window has no sample deviation.
        let values = vec![1.0, 2.0, 3.0];
        let bands = bollinger_bands(&values, 1, 2.0).unwrap();
        assert!(bands.middle.iter().all(|x| x.is_some()));
        assert!(bands.upper.iter().all(|x| x.is_none()));
        assert!(bands.lower.iter().all(|x| x.is_none()));
    }

    #[test]
    fn test_bollinger_short_input_all_undefined() {
        let bands = bollinger_bands(&[1.0, 2.0], 5, 2.0).unwrap();
        assert!(bands.middle.iter().all(|x| x.is_none()));
        assert!(bands.upper.iter().all(|x| x.is_none()));
    }

    #[test]
    fn test_bollinger_rejects_bad_parameters() {
        assert!(bollinger_bands(&[1.0, 2.0], 0, 2.0).is_err());
        assert!(bollinger_bands(&[1.0, 2.0], 2, 0.0).is_err());
        assert!(bollinger_bands(&[1.0, 2.0], 2, -1.0).is_err());
        assert!(bollinger_bands(&[1.0, 2.0], 2, f64::NAN).is_err());
    }
}
