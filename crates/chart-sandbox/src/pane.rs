// File: crates/chart-sandbox/src/pane.rs
// Summary: The three pane kinds, their series layout, and the arena that owns them.

use chart_bridge::{ChartDataset, OverlayKey};
use chart_core::{Axis, Candle, Chart, Color, PriceLine, RenderOptions, ScaleMargins, Series, SeriesType};

use crate::config::EngineConfig;

/// Series ids used inside the panes.
pub mod series_id {
    pub const CANDLES: &str = "candles";
    pub const VOLUME: &str = "volume";
    pub const SMA20: &str = "sma20";
    pub const SMA50: &str = "sma50";
    pub const SMA200: &str = "sma200";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_LOWER: &str = "bb_lower";
    pub const RSI: &str = "rsi";
    pub const MACD: &str = "macd";
    pub const SIGNAL: &str = "signal";
    pub const HISTOGRAM: &str = "histogram";
}

/// Price-pane series controlled by an overlay key.
pub fn overlay_series(key: OverlayKey) -> &'static [&'static str] {
    match key {
        OverlayKey::Sma20 => &[series_id::SMA20],
        OverlayKey::Sma50 => &[series_id::SMA50],
        OverlayKey::Sma200 => &[series_id::SMA200],
        OverlayKey::Bb => &[series_id::BB_UPPER, series_id::BB_MIDDLE, series_id::BB_LOWER],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Price,
    Oscillator,
    Divergence,
}

impl PaneId {
    pub const ALL: [PaneId; 3] = [PaneId::Price, PaneId::Oscillator, PaneId::Divergence];

    fn slot(self) -> usize {
        match self {
            PaneId::Price => 0,
            PaneId::Oscillator => 1,
            PaneId::Divergence => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneState {
    Uninitialized,
    /// Auto-fitted to its own content after a dataset load.
    AutoFit,
    /// Range has been moved by a pan/zoom since the last load.
    Interactive,
}

/// User input delivered to one pane, in that pane's pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneInput {
    Pan { dx_px: f64 },
    /// Positive `wheel_lines` zooms in around `cursor_x`.
    Zoom { wheel_lines: f64, cursor_x: f64 },
    PointerMove { x: f32, y: f32 },
    PointerLeave,
}

pub struct Pane {
    id: PaneId,
    state: PaneState,
    pub(crate) chart: Chart,
    pub(crate) opts: RenderOptions,
}

impl Pane {
    pub(crate) fn new(id: PaneId, config: &EngineConfig) -> Self {
        let opts = config.pane_options(id);
        let theme = opts.theme;
        let mut chart = Chart::new();
        chart.x_axis = Axis::new("", 0.0, 1.0);
        match id {
            PaneId::Price => {
                chart.y_axis = Axis::new("Price", 0.0, 1.0);
                chart.add_series(Series::new(series_id::CANDLES, SeriesType::Candlestick));
                let volume = Series::new(series_id::VOLUME, SeriesType::Histogram)
                    .with_overlay_scale(ScaleMargins { top: 0.8, bottom: 0.0 });
                chart.add_series(if config.show_volume { volume } else { volume.hidden() });
                for (sid, color) in [
                    (series_id::SMA20, theme.sma_fast),
                    (series_id::SMA50, theme.sma_mid),
                    (series_id::SMA200, theme.sma_slow),
                ] {
                    chart.add_series(line(sid, color, 1.5));
                }
                for sid in [series_id::BB_UPPER, series_id::BB_MIDDLE, series_id::BB_LOWER] {
                    chart.add_series(line(sid, theme.band, 1.0));
                }
            }
            PaneId::Oscillator => {
                chart.y_axis = Axis::fixed("RSI", 0.0, 100.0);
                chart.add_series(line(series_id::RSI, theme.line_stroke, 1.5));
                chart.add_price_line(PriceLine::new(config.rsi_overbought, format!("{:.0}", config.rsi_overbought)));
                chart.add_price_line(PriceLine::new(config.rsi_oversold, format!("{:.0}", config.rsi_oversold)));
            }
            PaneId::Divergence => {
                chart.y_axis = Axis::new("MACD", -1.0, 1.0);
                chart.add_series(Series::new(series_id::HISTOGRAM, SeriesType::Histogram).with_baseline(0.0));
                chart.add_series(line(series_id::MACD, theme.line_stroke, 1.5));
                chart.add_series(line(series_id::SIGNAL, theme.signal, 1.5));
                chart.add_price_line(PriceLine::new(0.0, ""));
            }
        }
        Self { id, state: PaneState::Uninitialized, chart, opts }
    }

    pub fn id(&self) -> PaneId { self.id }
    pub fn state(&self) -> PaneState { self.state }
    pub fn chart(&self) -> &Chart { &self.chart }
    pub fn options(&self) -> &RenderOptions { &self.opts }

    pub(crate) fn mark_interactive(&mut self) {
        if self.state == PaneState::AutoFit {
            self.state = PaneState::Interactive;
        }
    }

    /// Replace every series this pane draws with data from `dataset`, then auto-fit.
    pub(crate) fn load(&mut self, dataset: &ChartDataset) {
        let theme = self.opts.theme;
        let chart = &mut self.chart;
        let candle_times: Vec<f64> = dataset.candles.iter().map(|c| c.t as f64).collect();
        match self.id {
            PaneId::Price => {
                let candles = dataset
                    .candles
                    .iter()
                    .map(|c| Candle { t: c.t as f64, o: c.o, h: c.h, l: c.l, c: c.c })
                    .collect();
                chart.set_candle_data(series_id::CANDLES, candles);

                let (volume, colors): (Vec<_>, Vec<_>) = dataset
                    .candles
                    .iter()
                    .map(|c| {
                        let base = if c.c >= c.o { theme.candle_up } else { theme.candle_down };
                        ((c.t as f64, c.v), base.with_a(110))
                    })
                    .unzip();
                chart.set_xy_data_colored(series_id::VOLUME, volume, colors);

                let ov = &dataset.overlays;
                chart.set_xy_data(series_id::SMA20, ov.sma20().iter().map(|p| (p.t as f64, p.v)).collect());
                chart.set_xy_data(series_id::SMA50, ov.sma50().iter().map(|p| (p.t as f64, p.v)).collect());
                chart.set_xy_data(series_id::SMA200, ov.sma200().iter().map(|p| (p.t as f64, p.v)).collect());
                let bands = ov.bollinger_bands();
                chart.set_xy_data(series_id::BB_UPPER, bands.iter().map(|b| (b.t as f64, b.upper)).collect());
                chart.set_xy_data(series_id::BB_MIDDLE, bands.iter().map(|b| (b.t as f64, b.middle)).collect());
                chart.set_xy_data(series_id::BB_LOWER, bands.iter().map(|b| (b.t as f64, b.lower)).collect());
            }
            PaneId::Oscillator => {
                let rsi = dataset.indicators.rsi();
                chart.set_xy_data(series_id::RSI, rsi.iter().map(|p| (p.t as f64, p.v)).collect());
                chart.set_whitespace(candle_times);
            }
            PaneId::Divergence => {
                let macd = dataset.indicators.macd();
                chart.set_xy_data(series_id::MACD, macd.iter().map(|p| (p.t as f64, p.value)).collect());
                chart.set_xy_data(series_id::SIGNAL, macd.iter().map(|p| (p.t as f64, p.signal)).collect());
                let (hist, colors): (Vec<_>, Vec<_>) = macd
                    .iter()
                    .map(|p| {
                        let color = if p.histogram >= 0.0 { theme.candle_up } else { theme.candle_down };
                        ((p.t as f64, p.histogram), color)
                    })
                    .unzip();
                chart.set_xy_data_colored(series_id::HISTOGRAM, hist, colors);
                chart.set_whitespace(candle_times);
            }
        }
        chart.fit_content();
        self.state = PaneState::AutoFit;
    }

    /// Drop all data and return to the pre-load state.
    pub(crate) fn dispose(&mut self) {
        self.chart = Chart::new();
        self.state = PaneState::Uninitialized;
    }
}

fn line(id: &str, color: Color, width: f32) -> Series {
    Series::new(id, SeriesType::Line).with_color(color).with_line_width(width)
}

/// Sole owner of the three panes.
pub struct PaneSet {
    panes: [Pane; 3],
}

impl PaneSet {
    pub(crate) fn new(config: &EngineConfig) -> Self {
        Self { panes: PaneId::ALL.map(|id| Pane::new(id, config)) }
    }

    pub fn get(&self, id: PaneId) -> &Pane { &self.panes[id.slot()] }

    pub(crate) fn get_mut(&mut self, id: PaneId) -> &mut Pane { &mut self.panes[id.slot()] }

    pub fn iter(&self) -> impl Iterator<Item = &Pane> { self.panes.iter() }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pane> { self.panes.iter_mut() }

    /// Every pane except `origin`.
    pub(crate) fn others_mut(&mut self, origin: PaneId) -> impl Iterator<Item = &mut Pane> {
        self.panes.iter_mut().filter(move |p| p.id != origin)
    }
}
