// File: crates/chart-core/src/types.rs
// Summary: Pane-wide constants (default surface, zoom floor, autoscale headroom) and plot insets.

/// Default pane surface, in pixels.
pub const WIDTH: i32 = 1024;
pub const HEIGHT: i32 = 640;

/// Zooming in stops once this many bars are visible.
pub const MIN_VISIBLE_BARS: f64 = 2.0;
/// Fraction of the autoscaled value span added above and below it.
pub const VALUE_MARGIN: f64 = 0.02;

/// Gap between the surface edge and the plot area, per side. Axis labels live in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }

    pub const fn hsum(&self) -> u32 { self.left + self.right }
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }

    /// Plot width inside a surface `width` pixels wide; never below one pixel.
    pub fn inner_width(&self, width: i32) -> i32 {
        (width - self.hsum() as i32).max(1)
    }
}

impl Default for Insets {
    /// Room for price labels on the left and time labels underneath.
    fn default() -> Self {
        Self::new(72, 24, 24, 56)
    }
}
