// File: crates/chart-bridge/src/dataset.rs
// Summary: Immutable chart dataset snapshot as it travels over the bridge, plus shaping helpers
// and non-fatal validation.
// Notes:
// - Optional series may be absent, `null`, or empty on the wire; all three read back as an
//   empty slice through the accessors.
// - Numeric point fields read 0 when missing or `null`. JSON has no NaN/Infinity, so a
//   non-finite value goes out as `null` and comes back as 0. Candles are never rejected or
//   repaired.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Unix timestamp in seconds.
pub type Timestamp = i64;

fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub t: Timestamp,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub o: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub h: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub l: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub c: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub v: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub t: Timestamp,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub v: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub t: Timestamp,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub upper: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub middle: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub t: Timestamp,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub value: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub signal: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub histogram: f64,
}

/// Annotation carried for forward compatibility; the panes do not draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEvent {
    pub t: Timestamp,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlays {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sma20: Option<Vec<LinePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sma50: Option<Vec<LinePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sma200: Option<Vec<LinePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_bands: Option<Vec<BandPoint>>,
}

impl Overlays {
    pub fn sma20(&self) -> &[LinePoint] { self.sma20.as_deref().unwrap_or_default() }
    pub fn sma50(&self) -> &[LinePoint] { self.sma50.as_deref().unwrap_or_default() }
    pub fn sma200(&self) -> &[LinePoint] { self.sma200.as_deref().unwrap_or_default() }
    pub fn bollinger_bands(&self) -> &[BandPoint] { self.bollinger_bands.as_deref().unwrap_or_default() }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<Vec<LinePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<Vec<MacdPoint>>,
}

impl Indicators {
    pub fn rsi(&self) -> &[LinePoint] { self.rsi.as_deref().unwrap_or_default() }
    pub fn macd(&self) -> &[MacdPoint] { self.macd.as_deref().unwrap_or_default() }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub ticker: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub candle_count: usize,
}

/// The only unit ever transferred wholesale. Superseded, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub candles: Vec<Candle>,
    #[serde(default)]
    pub overlays: Overlays,
    #[serde(default)]
    pub indicators: Indicators,
    #[serde(default)]
    pub events: Vec<ChartEvent>,
    pub meta: Meta,
}

/// Something odd about a dataset. Logged by whoever shapes it; never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetIssue {
    #[error("candle {index} at t={t} does not come after t={previous}")]
    NonIncreasingTime { index: usize, t: Timestamp, previous: Timestamp },
    #[error("candle {index} at t={t} has high/low outside open/close")]
    OhlcEnvelope { index: usize, t: Timestamp },
    #[error("meta.candleCount is {declared} but {actual} candles were supplied")]
    CandleCountMismatch { declared: usize, actual: usize },
}

impl ChartDataset {
    /// Dataset with candles only; `meta.candle_count` is set from the data.
    pub fn from_candles(mut meta: Meta, candles: Vec<Candle>) -> Self {
        meta.candle_count = candles.len();
        Self { candles, meta, ..Self::default() }
    }

    pub fn with_overlays(mut self, overlays: Overlays) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn with_indicators(mut self, indicators: Indicators) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn with_events(mut self, events: Vec<ChartEvent>) -> Self {
        self.events = events;
        self
    }

    /// Candle whose timestamp is exactly `t`.
    pub fn candle_at(&self, t: Timestamp) -> Option<&Candle> {
        // Candles are expected sorted; fall back to a scan when they are not.
        match self.candles.binary_search_by_key(&t, |c| c.t) {
            Ok(i) => self.candles.get(i),
            Err(_) => self.candles.iter().find(|c| c.t == t),
        }
    }

    /// Report documented-but-unenforced assumptions that this dataset breaks.
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        for (index, pair) in self.candles.windows(2).enumerate() {
            if pair[1].t <= pair[0].t {
                issues.push(DatasetIssue::NonIncreasingTime {
                    index: index + 1,
                    t: pair[1].t,
                    previous: pair[0].t,
                });
            }
        }
        for (index, c) in self.candles.iter().enumerate() {
            if c.h < c.o.max(c.c) || c.l > c.o.min(c.c) {
                issues.push(DatasetIssue::OhlcEnvelope { index, t: c.t });
            }
        }
        if self.meta.candle_count != self.candles.len() {
            issues.push(DatasetIssue::CandleCountMismatch {
                declared: self.meta.candle_count,
                actual: self.candles.len(),
            });
        }
        issues
    }
}
