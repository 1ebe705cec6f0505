//! Chart model and assembler.
//!
//! The engine generates this model; the rendering layer turns it into
//! pixels. Every trace carries its own data so the model is a complete
//! description of one chart, serializable as JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::layout::{PanelGroup, PanelLayout};
use crate::momentum::MacdOutput;
use crate::oscillators::RsiOutput;
use crate::series::{DerivedSeries, PriceSeries};
use crate::signal::{SignalEvent, SignalKind};
use crate::toggle::IndicatorSettings;
use crate::volatility::BollingerBands;

/// Line rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickTrace {
    pub name: String,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub increasing_color: String,
    pub decreasing_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTrace {
    pub name: String,
    pub color: String,
    pub width: f64,
    pub style: LineStyle,
    pub values: DerivedSeries,
}

/// Two-color bar histogram; sign decides the color per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramTrace {
    pub name: String,
    pub values: DerivedSeries,
    pub positive_color: String,
    pub negative_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    TriangleUp,
    TriangleDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Scatter markers at discrete points (buy/sell signals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerTrace {
    pub name: String,
    pub symbol: MarkerSymbol,
    pub color: String,
    pub size: f64,
    pub points: Vec<MarkerPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Candlestick(CandlestickTrace),
    Line(LineTrace),
    Histogram(HistogramTrace),
    Markers(MarkerTrace),
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Candlestick(t) => &t.name,
            Trace::Line(t) => &t.name,
            Trace::Histogram(t) => &t.name,
            Trace::Markers(t) => &t.name,
        }
    }
}

/// Y-axis metadata for one panel. `range: None` means autorange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxis {
    pub title: String,
    pub range: Option<(f64, f64)>,
}

/// One horizontal strip of the chart, sharing the x-axis with every
/// other panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub group: PanelGroup,
    /// Fraction of the total chart height.
    pub height: f64,
    pub y_axis: YAxis,
    pub traces: Vec<Trace>,
}

/// X-axis range-selector presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePreset {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    All,
}

impl RangePreset {
    pub const DEFAULT_SET: [RangePreset; 5] = [
        RangePreset::OneMonth,
        RangePreset::ThreeMonths,
        RangePreset::SixMonths,
        RangePreset::OneYear,
        RangePreset::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RangePreset::OneMonth => "1m",
            RangePreset::ThreeMonths => "3m",
            RangePreset::SixMonths => "6m",
            RangePreset::OneYear => "1y",
            RangePreset::All => "all",
        }
    }
}

/// Global layout metadata shared by all panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub shared_x_axis: bool,
    pub range_presets: Vec<RangePreset>,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            shared_x_axis: true,
            range_presets: RangePreset::DEFAULT_SET.to_vec(),
        }
    }
}

/// The assembled chart: panels top to bottom plus the shared x-axis
/// dates. An informational model has a title and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub title: String,
    pub dates: Vec<NaiveDate>,
    pub layout: LayoutSpec,
    pub panels: Vec<Panel>,
}

impl ChartModel {
    /// Placeholder model for error states: non-empty title, no panels.
    pub fn informational(message: impl Into<String>) -> Self {
        Self {
            title: message.into(),
            dates: Vec::new(),
            layout: LayoutSpec::default(),
            panels: Vec::new(),
        }
    }
}

/// Computed indicator outputs for one recompute.
///
/// A `None` field is an indicator that is disabled, or whose
/// contribution was dropped for invalid parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    pub ema: Option<DerivedSeries>,
    pub ma: Option<DerivedSeries>,
    pub bands: Option<BollingerBands>,
    pub rsi: Option<RsiOutput>,
    pub macd: Option<MacdOutput>,
}

fn line(name: &str, color: &str, width: f64, style: LineStyle, values: DerivedSeries) -> Trace {
    Trace::Line(LineTrace {
        name: name.into(),
        color: color.into(),
        width,
        style,
        values,
    })
}

fn marker_trace(name: &str, kind: SignalKind, signals: &[SignalEvent]) -> Option<Trace> {
    let points: Vec<MarkerPoint> = signals
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| MarkerPoint {
            date: s.date,
            value: s.price,
        })
        .collect();
    if points.is_empty() {
        return None;
    }
    let (symbol, color) = match kind {
        SignalKind::Buy => (MarkerSymbol::TriangleUp, "green"),
        SignalKind::Sell => (MarkerSymbol::TriangleDown, "red"),
    };
    Some(Trace::Markers(MarkerTrace {
        name: name.into(),
        symbol,
        color: color.into(),
        size: 10.0,
        points,
    }))
}

fn price_panel(
    height: f64,
    series: &PriceSeries,
    settings: &IndicatorSettings,
    indicators: &IndicatorSet,
    signals: &[SignalEvent],
) -> Panel {
    let bars = series.bars();
    let mut traces = vec![Trace::Candlestick(CandlestickTrace {
        name: "Candlestick".into(),
        open: bars.iter().map(|b| b.open).collect(),
        high: bars.iter().map(|b| b.high).collect(),
        low: bars.iter().map(|b| b.low).collect(),
        close: bars.iter().map(|b| b.close).collect(),
        increasing_color: "green".into(),
        decreasing_color: "red".into(),
    })];

    // Overlays in fixed order: EMA, MA, BB upper, BB lower
    if let Some(ema) = &indicators.ema {
        traces.push(line("EMA", &settings.ema.color, 2.0, LineStyle::Solid, ema.clone()));
    }
    if let Some(ma) = &indicators.ma {
        traces.push(line(
            "Moving Average",
            &settings.ma.color,
            2.0,
            LineStyle::Solid,
            ma.clone(),
        ));
    }
    if let Some(bands) = &indicators.bands {
        traces.push(line(
            "BB Upper",
            &settings.bb.color,
            1.0,
            LineStyle::Dash,
            bands.upper.clone(),
        ));
        traces.push(line(
            "BB Lower",
            &settings.bb.color,
            1.0,
            LineStyle::Dash,
            bands.lower.clone(),
        ));
    }

    traces.extend(marker_trace("Buy Signal", SignalKind::Buy, signals));
    traces.extend(marker_trace("Sell Signal", SignalKind::Sell, signals));

    Panel {
        group: PanelGroup::Price,
        height,
        y_axis: YAxis {
            title: "Price".into(),
            range: None,
        },
        traces,
    }
}

fn rsi_panel(height: f64, settings: &IndicatorSettings, output: &RsiOutput) -> Panel {
    let color = &settings.rsi.color;
    Panel {
        group: PanelGroup::Rsi,
        height,
        y_axis: YAxis {
            title: "RSI".into(),
            range: Some((0.0, 100.0)),
        },
        traces: vec![
            line("RSI", color, 1.0, LineStyle::Solid, output.rsi.clone()),
            line("RSI Moving Avg", color, 1.0, LineStyle::Dot, output.rsi_ma.clone()),
            line("RSI Overbought", "red", 1.0, LineStyle::Dot, output.overbought.clone()),
            line("RSI Oversold", "green", 1.0, LineStyle::Dot, output.oversold.clone()),
        ],
    }
}

fn macd_panel(height: f64, settings: &IndicatorSettings, output: &MacdOutput) -> Panel {
    let color = &settings.macd.color;
    Panel {
        group: PanelGroup::Macd,
        height,
        y_axis: YAxis {
            title: "MACD".into(),
            range: None,
        },
        traces: vec![
            line("MACD", color, 1.0, LineStyle::Solid, output.macd.clone()),
            line("MACD Signal", color, 1.0, LineStyle::Dot, output.signal.clone()),
            Trace::Histogram(HistogramTrace {
                name: "MACD Histogram".into(),
                values: output.histogram.clone(),
                positive_color: "green".into(),
                negative_color: "red".into(),
            }),
        ],
    }
}

/// Build the chart model from everything one recompute produced.
///
/// Panels follow the allocated layout top to bottom. Row 1 holds the
/// candlestick first, then enabled overlays, then signal markers;
/// oscillator rows hold their primary line, smoothed line and (for
/// RSI) the fixed reference lines.
pub fn assemble(
    symbol: &str,
    series: &PriceSeries,
    settings: &IndicatorSettings,
    indicators: &IndicatorSet,
    layout: &PanelLayout,
    signals: &[SignalEvent],
) -> ChartModel {
    let panels = layout
        .rows
        .iter()
        .filter_map(|row| match row.group {
            PanelGroup::Price => Some(price_panel(row.height, series, settings, indicators, signals)),
            PanelGroup::Rsi => indicators
                .rsi
                .as_ref()
                .map(|output| rsi_panel(row.height, settings, output)),
            PanelGroup::Macd => indicators
                .macd
                .as_ref()
                .map(|output| macd_panel(row.height, settings, output)),
        })
        .collect();

    ChartModel {
        title: format!("{} Chart with Indicators", symbol.to_uppercase()),
        dates: series.dates(),
        layout: LayoutSpec::default(),
        panels,
    }
}
