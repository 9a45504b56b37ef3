// File: crates/chart-core/src/scale.rs
// Summary: Time (X) and Value (Y) scale transforms between logical/value space and pixels.

use crate::view::LogicalRange;

/// Logical X coordinate (bar index; fractional between bars).
pub type Logical = f64;
/// Value Y coordinate (e.g., price).
pub type Value = f64;

/// Horizontal time scale controlled via logical start and bar spacing (px per logical).
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub left_px: f32,
    pub start_logical: Logical,
    pub bar_spacing: f32,
}

impl TimeScale {
    pub fn new(left_px: f32, start_logical: Logical, bar_spacing: f32) -> Self {
        Self { left_px, start_logical, bar_spacing: bar_spacing.max(0.01) }
    }

    /// Scale that maps `range` onto `[left_px, left_px + width_px]`.
    pub fn for_range(range: LogicalRange, left_px: f32, width_px: f32) -> Self {
        let span = range.span().max(1e-9) as f32;
        Self::new(left_px, range.from(), width_px.max(1.0) / span)
    }

    #[inline]
    pub fn to_px(&self, x: Logical) -> f32 {
        self.left_px + ((x - self.start_logical) as f32) * self.bar_spacing
    }
    #[inline]
    pub fn from_px(&self, px: f32) -> Logical {
        self.start_logical + ((px - self.left_px) / self.bar_spacing) as f64
    }
}

/// Vertical value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }
    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
    #[inline]
    pub fn from_px(&self, py: f32) -> Value {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.vmin + ((self.bottom_px - py) / (self.bottom_px - self.top_px)) as f64 * span
    }
}
