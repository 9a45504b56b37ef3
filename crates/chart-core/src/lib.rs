// File: crates/chart-core/src/lib.rs
// Summary: Charting primitive entry point; exports series, logical time scale and pane rendering.

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;

pub use chart::{Chart, RenderOptions};
pub use series::{Candle, PriceLine, ScaleMargins, Series, SeriesType};
pub use axis::Axis;
pub use view::{LogicalRange, RangeError, TimeIndex};
pub use theme::Theme;
pub use geometry::RectI32;

/// Re-exported so downstream crates can name colors without a direct skia dependency.
pub use skia_safe::Color;
