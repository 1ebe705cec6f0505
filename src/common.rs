//! Shared rolling-window helpers.
//!
//! All derived-series math in this crate works over `Option<f64>`
//! points: `None` marks the warm-up prefix where an indicator has not
//! yet seen a full window. Undefined points never participate in a
//! window; a window touching one stays undefined.

/// Initialize a result vector with undefined values
#[inline]
pub fn undefined_vec(len: usize) -> Vec<Option<f64>> {
    vec![None; len]
}

/// Check if we have enough data for the given period
#[inline]
pub fn has_enough_data(len: usize, period: usize) -> bool {
    len >= period && period > 0
}

/// Calculate the mean of a slice
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1).
///
/// Windows shorter than two points have no sample deviation and
/// return `None`.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = mean(values);
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Compute a rolling window operation over optional points.
///
/// Returns a vector of the same length. The first `period - 1` slots
/// and any window containing an undefined point yield `None`.
pub fn rolling<F>(values: &[Option<f64>], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let n = values.len();
    let mut result = undefined_vec(n);
    if !has_enough_data(n, period) {
        return result;
    }

    let mut window = Vec::with_capacity(period);
    for i in (period - 1)..n {
        window.clear();
        for v in &values[(i + 1 - period)..=i] {
            match v {
                Some(x) => window.push(*x),
                None => {
                    window.clear();
                    break;
                }
            }
        }
        if window.len() == period {
            result[i] = f(&window);
        }
    }
    result
}

/// Per-bar deltas. Index 0 is undefined (no previous value).
pub fn diff(values: &[f64]) -> Vec<Option<f64>> {
    let mut result = undefined_vec(values.len());
    for i in 1..values.len() {
        result[i] = Some(values[i] - values[i - 1]);
    }
    result
}

/// Separate deltas into gains and absolute losses, keeping undefined
/// points undefined on both sides.
pub fn gains_losses(changes: &[Option<f64>]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let gains = changes
        .iter()
        .map(|c| c.map(|c| if c > 0.0 { c } else { 0.0 }))
        .collect();
    let losses = changes
        .iter()
        .map(|c| c.map(|c| if c < 0.0 { -c } else { 0.0 }))
        .collect();
    (gains, losses)
}
