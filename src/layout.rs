//! Panel layout allocation for oscillator subplots.

use serde::{Deserialize, Serialize};

/// Logical trace group hosted by one panel row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelGroup {
    Price,
    Rsi,
    Macd,
}

/// One row of the subplot grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    pub group: PanelGroup,
    /// Fraction of the total chart height; all rows sum to 1.0.
    pub height: f64,
}

/// The allocated subplot grid, top row first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub rows: Vec<PanelRow>,
}

impl PanelLayout {
    /// 1-based row index of a group, if it has a row.
    pub fn row_of(&self, group: PanelGroup) -> Option<usize> {
        self.rows.iter().position(|r| r.group == group).map(|i| i + 1)
    }

    pub fn heights(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.height).collect()
    }
}

/// Decide the subplot grid from the enabled oscillators.
///
/// Heights depend only on the final row count: one row is the full
/// chart, two rows split 0.7/0.3, three rows 0.6/0.2/0.2. Price is
/// always row 1, and RSI is always drawn above MACD when both are
/// present, regardless of the order they were toggled on.
pub fn allocate_panels(rsi_enabled: bool, macd_enabled: bool) -> PanelLayout {
    use PanelGroup::*;

    let row = |group, height| PanelRow { group, height };
    let rows = match (rsi_enabled, macd_enabled) {
        (false, false) => vec![row(Price, 1.0)],
        (true, false) => vec![row(Price, 0.7), row(Rsi, 0.3)],
        (false, true) => vec![row(Price, 0.7), row(Macd, 0.3)],
        (true, true) => vec![row(Price, 0.6), row(Rsi, 0.2), row(Macd, 0.2)],
    };
    PanelLayout { rows }
}
