//! Rule-based buy/sell signal generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::oscillators::{OVERBOUGHT, OVERSOLD};
use crate::series::PriceSeries;
use crate::volatility::BollingerBands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Buy,
    Sell,
}

/// One buy or sell marker. Lives for a single recompute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub date: NaiveDate,
    pub kind: SignalKind,
    pub price: f64,
}

/// Cross-indicator signal rule over Bollinger Bands and RSI:
///
/// - buy when `RSI < 30` and the close is under the lower band
/// - sell when `RSI > 70` and the close is over the upper band
///
/// Bars where RSI or the bands are undefined are skipped. Every
/// qualifying bar emits its own event; consecutive qualifying bars are
/// not debounced and there is no cooldown. The two predicates are
/// mutually exclusive on the RSI range, so a bar yields at most one
/// event.
pub fn generate_signals(
    series: &PriceSeries,
    rsi: &[Option<f64>],
    bands: &BollingerBands,
) -> Vec<SignalEvent> {
    let mut events = Vec::new();
    for (i, bar) in series.bars().iter().enumerate() {
        let defined = (
            rsi.get(i).copied().flatten(),
            bands.upper.get(i).copied().flatten(),
            bands.lower.get(i).copied().flatten(),
        );
        let (Some(rsi_value), Some(upper), Some(lower)) = defined else {
            continue;
        };

        if rsi_value < OVERSOLD && bar.close < lower {
            events.push(SignalEvent {
                date: bar.date,
                kind: SignalKind::Buy,
                price: bar.close,
            });
        } else if rsi_value > OVERBOUGHT && bar.close > upper {
            events.push(SignalEvent {
                date: bar.date,
                kind: SignalKind::Sell,
                price: bar.close,
            });
        }
    }
    events
}
