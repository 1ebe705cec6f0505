//! Toggle and parameter state for one recompute.
//!
//! The engine never owns or increments interaction counters: the
//! calling layer resolves its UI state into explicit [`Toggle`] values
//! before each recompute. [`Toggle::from_clicks`] keeps the odd-parity
//! convention available to callers that still hold raw click counters.
//!
//! Parameter records carry the documented defaults; validation happens
//! in the indicator functions that consume them.

use serde::{Deserialize, Serialize};

/// Whether one indicator participates in the current recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Enabled,
    #[default]
    Disabled,
}

impl Toggle {
    pub fn is_enabled(self) -> bool {
        matches!(self, Toggle::Enabled)
    }

    /// Resolve a raw click counter: an odd count enables, an absent or
    /// even count disables.
    pub fn from_clicks(clicks: Option<u64>) -> Self {
        match clicks {
            Some(c) if c % 2 == 1 => Toggle::Enabled,
            _ => Toggle::Disabled,
        }
    }
}

/// Toggle set for everything the chart can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartToggles {
    pub ema: Toggle,
    pub ma: Toggle,
    pub bb: Toggle,
    pub rsi: Toggle,
    pub macd: Toggle,
    /// Buy/sell marker display; only effective when BB and RSI are
    /// both enabled too.
    pub signals: Toggle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmaSettings {
    pub period: usize,
    pub color: String,
}

impl Default for EmaSettings {
    fn default() -> Self {
        Self {
            period: 20,
            color: "#FF5733".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaSettings {
    pub period: usize,
    pub color: String,
}

impl Default for MaSettings {
    fn default() -> Self {
        Self {
            period: 20,
            color: "#FFA500".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BbSettings {
    pub period: usize,
    pub multiplier: f64,
    pub color: String,
}

impl Default for BbSettings {
    fn default() -> Self {
        Self {
            period: 20,
            multiplier: 2.0,
            color: "#1E90FF".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiSettings {
    pub period: usize,
    pub ma_period: usize,
    pub color: String,
}

impl Default for RsiSettings {
    fn default() -> Self {
        Self {
            period: 14,
            ma_period: 5,
            color: "#33FF57".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdSettings {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    pub color: String,
}

impl Default for MacdSettings {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
            color: "#33FF57".into(),
        }
    }
}

/// Per-indicator parameter records for one recompute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub ema: EmaSettings,
    pub ma: MaSettings,
    pub bb: BbSettings,
    pub rsi: RsiSettings,
    pub macd: MacdSettings,
}
