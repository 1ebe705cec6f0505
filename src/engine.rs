//! One-shot chart recompute.
//!
//! Each invocation takes a complete snapshot of its inputs and
//! produces one [`ChartModel`] with no state carried between calls, so
//! any number of recomputes may run concurrently.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chart::{assemble, ChartModel, IndicatorSet};
use crate::error::ChartError;
use crate::layout::allocate_panels;
use crate::provider::DataProvider;
use crate::series::PriceSeries;
use crate::signal::generate_signals;
use crate::toggle::{ChartToggles, IndicatorSettings};
use crate::{bollinger_bands, ema, macd, rsi, sma};

/// Raw request from the input boundary. Dates are ISO `YYYY-MM-DD`
/// strings; validation happens here, not at the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
}

/// Build one chart. Total: every error state collapses into an
/// informational model with the failure as its title.
pub fn build_chart(
    provider: &dyn DataProvider,
    request: &ChartRequest,
    toggles: &ChartToggles,
    settings: &IndicatorSettings,
) -> ChartModel {
    match try_build(provider, request, toggles, settings) {
        Ok(model) => model,
        Err(err) => {
            debug!(%err, "recompute ended with an informational chart");
            ChartModel::informational(err.to_string())
        }
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ChartError::InvalidDateRange(format!("{field} must be YYYY-MM-DD, got {value:?}"))
    })
}

fn try_build(
    provider: &dyn DataProvider,
    request: &ChartRequest,
    toggles: &ChartToggles,
    settings: &IndicatorSettings,
) -> Result<ChartModel, ChartError> {
    let symbol = request.symbol.trim();
    if symbol.is_empty() {
        return Err(ChartError::MissingInput("symbol"));
    }
    if request.start_date.trim().is_empty() {
        return Err(ChartError::MissingInput("start date"));
    }
    if request.end_date.trim().is_empty() {
        return Err(ChartError::MissingInput("end date"));
    }

    let start = parse_date("start date", &request.start_date)?;
    let end = parse_date("end date", &request.end_date)?;
    if start >= end {
        return Err(ChartError::InvalidDateRange(format!(
            "start date {start} must be before end date {end}"
        )));
    }

    let series = provider.fetch(symbol, start, end)?;
    Ok(build_chart_from_series(symbol, &series, toggles, settings))
}

/// Build a chart for an already-fetched series. This is the recompute
/// core behind [`build_chart`]; the WASM surface calls it directly
/// with caller-supplied bars.
pub fn build_chart_from_series(
    symbol: &str,
    series: &PriceSeries,
    toggles: &ChartToggles,
    settings: &IndicatorSettings,
) -> ChartModel {
    if series.is_empty() {
        return ChartModel::informational("No data for the selected range.");
    }
    debug!(symbol, bars = series.len(), "recomputing chart");

    let closes = series.closes();
    let mut indicators = IndicatorSet::default();

    if toggles.ema.is_enabled() {
        match ema(&closes, settings.ema.period) {
            Ok(values) => indicators.ema = Some(values),
            Err(err) => warn!(%err, "dropping EMA overlay"),
        }
    }
    if toggles.ma.is_enabled() {
        match sma(&closes, settings.ma.period) {
            Ok(values) => indicators.ma = Some(values),
            Err(err) => warn!(%err, "dropping moving average overlay"),
        }
    }
    if toggles.bb.is_enabled() {
        match bollinger_bands(&closes, settings.bb.period, settings.bb.multiplier) {
            Ok(bands) => indicators.bands = Some(bands),
            Err(err) => warn!(%err, "dropping Bollinger Bands overlay"),
        }
    }
    if toggles.rsi.is_enabled() {
        match rsi(&closes, settings.rsi.period, settings.rsi.ma_period) {
            Ok(output) => indicators.rsi = Some(output),
            Err(err) => warn!(%err, "dropping RSI panel"),
        }
    }
    if toggles.macd.is_enabled() {
        match macd(
            &closes,
            settings.macd.fast,
            settings.macd.slow,
            settings.macd.signal,
        ) {
            Ok(output) => indicators.macd = Some(output),
            Err(err) => warn!(%err, "dropping MACD panel"),
        }
    }

    // Layout reflects the indicators that survived validation, so a
    // dropped oscillator never leaves an empty row behind.
    let layout = allocate_panels(indicators.rsi.is_some(), indicators.macd.is_some());

    let signals = match (toggles.signals.is_enabled(), &indicators.bands, &indicators.rsi) {
        (true, Some(bands), Some(rsi_output)) => {
            generate_signals(series, &rsi_output.rsi, bands)
        }
        _ => Vec::new(),
    };

    assemble(symbol, series, settings, &indicators, &layout, &signals)
}
