// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for pane rendering colors, including overlay and indicator palettes.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub crosshair: skia::Color,
    pub line_stroke: skia::Color,
    pub candle_up: skia::Color,
    pub candle_down: skia::Color,
    pub histogram: skia::Color,
    pub sma_fast: skia::Color,
    pub sma_mid: skia::Color,
    pub sma_slow: skia::Color,
    pub band: skia::Color,
    pub signal: skia::Color,
    pub reference_line: skia::Color,
    pub tooltip_background: skia::Color,
    pub tooltip_text: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            crosshair: skia::Color::from_argb(255, 255, 230, 70),
            line_stroke: skia::Color::from_argb(255, 64, 160, 255),
            candle_up: skia::Color::from_argb(255, 40, 200, 120),
            candle_down: skia::Color::from_argb(255, 220, 80, 80),
            histogram: skia::Color::from_argb(255, 96, 156, 255),
            sma_fast: skia::Color::from_argb(255, 250, 200, 60),
            sma_mid: skia::Color::from_argb(255, 60, 180, 250),
            sma_slow: skia::Color::from_argb(255, 200, 110, 250),
            band: skia::Color::from_argb(200, 150, 150, 170),
            signal: skia::Color::from_argb(255, 255, 140, 60),
            reference_line: skia::Color::from_argb(160, 150, 150, 160),
            tooltip_background: skia::Color::from_argb(220, 30, 30, 36),
            tooltip_text: skia::Color::from_argb(255, 235, 235, 245),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            crosshair: skia::Color::from_argb(255, 30, 120, 240),
            line_stroke: skia::Color::from_argb(255, 32, 120, 200),
            candle_up: skia::Color::from_argb(255, 20, 160, 90),
            candle_down: skia::Color::from_argb(255, 200, 60, 60),
            histogram: skia::Color::from_argb(255, 40, 120, 200),
            sma_fast: skia::Color::from_argb(255, 215, 150, 0),
            sma_mid: skia::Color::from_argb(255, 20, 120, 210),
            sma_slow: skia::Color::from_argb(255, 140, 60, 200),
            band: skia::Color::from_argb(200, 110, 110, 130),
            signal: skia::Color::from_argb(255, 230, 100, 20),
            reference_line: skia::Color::from_argb(160, 100, 100, 110),
            tooltip_background: skia::Color::from_argb(230, 255, 255, 255),
            tooltip_text: skia::Color::from_argb(255, 20, 20, 30),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            crosshair: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            line_stroke: skia::Color::from_argb(255, 0x00, 0xff, 0xff),
            candle_up: skia::Color::from_argb(255, 0x00, 0xff, 0x00),
            candle_down: skia::Color::from_argb(255, 0xff, 0x00, 0x00),
            histogram: skia::Color::from_argb(255, 0x00, 0xaa, 0xff),
            sma_fast: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            sma_mid: skia::Color::from_argb(255, 0x00, 0xff, 0xff),
            sma_slow: skia::Color::from_argb(255, 0xff, 0x00, 0xff),
            band: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            signal: skia::Color::from_argb(255, 0xff, 0x88, 0x00),
            reference_line: skia::Color::from_argb(255, 0x88, 0x88, 0x88),
            tooltip_background: skia::Color::from_argb(255, 0x11, 0x11, 0x11),
            tooltip_text: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::dark(),
        Theme::light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}
