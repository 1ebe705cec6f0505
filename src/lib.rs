//! # candleview
//!
//! Candlestick chart composition engine for daily OHLCV data.
//!
//! Turns a price series plus a set of indicator toggles into a
//! complete, serializable chart description: a candlestick panel with
//! optional EMA/SMA/Bollinger overlays, RSI and MACD oscillator panels
//! allocated into a variable-height grid, and rule-based buy/sell
//! markers. The rendering layer (native, browser, or terminal) only
//! has to draw what the model says.
//!
//! ## Features
//! - Pure, stateless recompute: identical inputs give identical output
//! - Explicit `Option<f64>` warm-up handling, no NaN sentinels
//! - Compiles to native and WASM
//!
//! ## Example
//! ```
//! use candleview::{allocate_panels, sma, rsi};
//!
//! let closes = vec![44.0, 44.5, 45.0, 44.5, 45.5, 46.0, 45.5, 46.5];
//!
//! let ma = sma(&closes, 3).unwrap();
//! assert_eq!(ma[0], None); // warm-up
//! assert_eq!(ma[2], Some(44.5));
//!
//! let rsi_output = rsi(&closes, 3, 2).unwrap();
//! assert!(rsi_output.rsi[4].is_some());
//!
//! let layout = allocate_panels(true, false);
//! assert_eq!(layout.heights(), vec![0.7, 0.3]);
//! ```

pub mod chart;
pub mod common;
pub mod engine;
pub mod error;
pub mod layout;
pub mod momentum;
pub mod moving_averages;
pub mod oscillators;
pub mod provider;
pub mod series;
pub mod signal;
pub mod toggle;
pub mod volatility;

// Re-export the engine surface at the crate root
pub use chart::{ChartModel, IndicatorSet, Panel, Trace};
pub use engine::{build_chart, build_chart_from_series, ChartRequest};
pub use error::ChartError;
pub use layout::{allocate_panels, PanelGroup, PanelLayout};
pub use momentum::{macd, MacdOutput};
pub use moving_averages::{ema, sma, sma_of};
pub use oscillators::{rsi, RsiOutput, OVERBOUGHT, OVERSOLD};
pub use provider::{CsvProvider, DataProvider, ProviderError};
pub use series::{Bar, DerivedSeries, PriceSeries, SeriesError};
pub use signal::{generate_signals, SignalEvent, SignalKind};
pub use toggle::{ChartToggles, IndicatorSettings, Toggle};
pub use volatility::{bollinger_bands, rolling_std, BollingerBands};

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// WASM bindings for browser/Node.js use.
///
/// Bars come in as a JSON array of `{date, open, high, low, close,
/// volume}` records; toggles and settings as the serde forms of
/// [`ChartToggles`] and [`IndicatorSettings`]. The result is the
/// ChartModel as JSON; malformed input yields an informational model
/// instead of an exception.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn chart_from_bars(
    symbol: &str,
    bars_json: &str,
    toggles_json: &str,
    settings_json: &str,
) -> String {
    let model = build_model_from_json(symbol, bars_json, toggles_json, settings_json);
    serde_json::to_string(&model).unwrap_or_else(|e| format!("{{\"title\":\"{e}\"}}"))
}

#[cfg(feature = "wasm")]
fn build_model_from_json(
    symbol: &str,
    bars_json: &str,
    toggles_json: &str,
    settings_json: &str,
) -> ChartModel {
    let bars: Vec<Bar> = match serde_json::from_str(bars_json) {
        Ok(bars) => bars,
        Err(e) => return ChartModel::informational(format!("malformed bars: {e}")),
    };
    let toggles: ChartToggles = match serde_json::from_str(toggles_json) {
        Ok(t) => t,
        Err(e) => return ChartModel::informational(format!("malformed toggles: {e}")),
    };
    let settings: IndicatorSettings = match serde_json::from_str(settings_json) {
        Ok(s) => s,
        Err(e) => return ChartModel::informational(format!("malformed settings: {e}")),
    };
    let series = match PriceSeries::from_bars(bars) {
        Ok(s) => s,
        Err(e) => return ChartModel::informational(e.to_string()),
    };
    build_chart_from_series(symbol, &series, &toggles, &settings)
}
