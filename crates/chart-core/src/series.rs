// File: crates/chart-core/src/series.rs
// Summary: Series model for line, candlestick and histogram data plus horizontal price lines.
// Notes:
// - Series are addressed by a string id so owners can replace data or flip visibility
//   without holding indices into the chart.
// - Data replacement is always wholesale; there is no append/patch path.

use skia_safe::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    Candlestick,
    Histogram,   // (x, y) bars from baseline (0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candle {
    pub t: f64,  // timestamp (mapped to a bar index on X)
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
}

impl Candle {
    pub fn is_up(&self) -> bool { self.c >= self.o }
}

/// Vertical placement of a series on its own value scale, as fractions of the plot height
/// left empty above (`top`) and below (`bottom`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMargins {
    pub top: f32,
    pub bottom: f32,
}

#[derive(Clone, Debug)]
pub struct Series {
    pub id: String,
    pub series_type: SeriesType,
    pub data_xy: Vec<(f64, f64)>,     // used by Line/Histogram
    pub data_ohlc: Vec<Candle>,       // used by Candlestick
    pub baseline: Option<f64>,        // used by Histogram (origin)
    pub visible: bool,
    pub color: Option<Color>,
    /// Per-point colors for histograms; falls back to `color` when shorter than the data.
    pub point_colors: Vec<Color>,
    pub line_width: f32,
    /// `Some` puts the series on a private value scale excluded from pane autoscale.
    pub overlay_scale: Option<ScaleMargins>,
}

impl Series {
    pub fn new(id: impl Into<String>, series_type: SeriesType) -> Self {
        Self {
            id: id.into(),
            series_type,
            data_xy: Vec::new(),
            data_ohlc: Vec::new(),
            baseline: None,
            visible: true,
            color: None,
            point_colors: Vec::new(),
            line_width: 2.0,
            overlay_scale: None,
        }
    }

    pub fn with_data(id: impl Into<String>, series_type: SeriesType, data: Vec<(f64, f64)>) -> Self {
        Self { data_xy: data, ..Self::new(id, series_type) }
    }

    pub fn from_candles(id: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self { data_ohlc: candles, ..Self::new(id, SeriesType::Candlestick) }
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width.max(0.5);
        self
    }

    pub fn with_overlay_scale(mut self, margins: ScaleMargins) -> Self {
        self.overlay_scale = Some(margins);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Get baseline value or default (0.0) when not set.
    pub fn baseline_value(&self) -> f64 { self.baseline.unwrap_or(0.0) }

    /// Number of data points regardless of series type.
    pub fn len(&self) -> usize {
        match self.series_type {
            SeriesType::Candlestick => self.data_ohlc.len(),
            SeriesType::Line | SeriesType::Histogram => self.data_xy.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Timestamps of every point in the series.
    pub fn times(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self.series_type {
            SeriesType::Candlestick => Box::new(self.data_ohlc.iter().map(|c| c.t)),
            SeriesType::Line | SeriesType::Histogram => Box::new(self.data_xy.iter().map(|p| p.0)),
        }
    }
}

/// Horizontal reference line drawn across the whole plot at `value`.
#[derive(Clone, Debug)]
pub struct PriceLine {
    pub value: f64,
    pub label: String,
    pub color: Option<Color>,
}

impl PriceLine {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self { value, label: label.into(), color: None }
    }
}
