// File: crates/chart-core/src/view.rs
// Logical (bar-index) visible range, pan/zoom math, and the time index logical positions refer to.

use thiserror::Error;

use crate::types::MIN_VISIBLE_BARS;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RangeError {
    #[error("logical range bounds must be finite (from={from}, to={to})")]
    NonFinite { from: f64, to: f64 },
    #[error("logical range is empty or inverted (from={from}, to={to})")]
    Inverted { from: f64, to: f64 },
}

/// Visible span of a pane's time axis in bar-index units. Bar `i` is centered on `i`.
/// Bounds are always finite with `from < to`; build one through `new` or `full`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogicalRange {
    from: f64,
    to: f64,
}

impl LogicalRange {
    pub fn new(from: f64, to: f64) -> Result<Self, RangeError> {
        if !from.is_finite() || !to.is_finite() {
            return Err(RangeError::NonFinite { from, to });
        }
        if to <= from {
            return Err(RangeError::Inverted { from, to });
        }
        Ok(Self { from, to })
    }

    /// Range that shows every one of `bar_count` bars edge to edge.
    pub fn full(bar_count: usize) -> Self {
        Self { from: -0.5, to: bar_count.max(1) as f64 - 0.5 }
    }

    pub fn from(&self) -> f64 { self.from }
    pub fn to(&self) -> f64 { self.to }
    pub fn span(&self) -> f64 { self.to - self.from }

    pub fn contains(&self, logical: f64) -> bool {
        logical >= self.from && logical <= self.to
    }

    /// Shift by a drag of `dx_px` across a plot `plot_width` pixels wide.
    pub fn panned(&self, dx_px: f64, plot_width: f64) -> Self {
        let shift = -dx_px / plot_width.max(1.0) * self.span();
        Self { from: self.from + shift, to: self.to + shift }
    }

    /// Zoom by a wheel `scroll` (positive zooms in) keeping the logical position under
    /// `cursor_px` fixed.
    pub fn zoomed(&self, scroll: f64, cursor_px: f64, plot_left: f64, plot_width: f64) -> Self {
        let plot_w = plot_width.max(1.0);
        let cx = cursor_px.clamp(plot_left, plot_left + plot_w);
        let span = self.span();
        let anchor = self.from + (cx - plot_left) / plot_w * span;
        let factor = (1.0 - scroll).clamp(0.1, 10.0);
        let new_span = (span * factor).max(MIN_VISIBLE_BARS);
        let ratio = (anchor - self.from) / span;
        let from = anchor - ratio * new_span;
        Self { from, to: from + new_span }
    }
}

/// Sorted, de-duplicated timestamps of every point a pane knows about.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeIndex {
    times: Vec<f64>,
}

impl TimeIndex {
    pub fn from_times(times: impl IntoIterator<Item = f64>) -> Self {
        let mut times: Vec<f64> = times.into_iter().filter(|t| t.is_finite()).collect();
        times.sort_by(f64::total_cmp);
        times.dedup();
        Self { times }
    }

    pub fn len(&self) -> usize { self.times.len() }
    pub fn is_empty(&self) -> bool { self.times.is_empty() }
    pub fn times(&self) -> &[f64] { &self.times }

    /// Bar index of exactly `t`, if present.
    pub fn index_of(&self, t: f64) -> Option<usize> {
        self.times.binary_search_by(|x| x.total_cmp(&t)).ok()
    }

    /// Timestamp of the bar nearest to `logical`, or `None` outside the data.
    pub fn time_at(&self, logical: f64) -> Option<f64> {
        if !logical.is_finite() { return None; }
        let idx = logical.round();
        if idx < 0.0 || idx >= self.times.len() as f64 { return None; }
        Some(self.times[idx as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_ranges() {
        assert!(matches!(LogicalRange::new(3.0, 3.0), Err(RangeError::Inverted { .. })));
        assert!(matches!(LogicalRange::new(f64::NAN, 3.0), Err(RangeError::NonFinite { .. })));
        assert!(matches!(LogicalRange::new(0.0, f64::INFINITY), Err(RangeError::NonFinite { .. })));
        assert!(matches!(LogicalRange::new(5.0, 1.0), Err(RangeError::Inverted { .. })));
        let ok = LogicalRange::new(1.0, 5.0).unwrap();
        assert_eq!((ok.from(), ok.to()), (1.0, 5.0));
    }

    #[test]
    fn zoom_keeps_anchor() {
        let r = LogicalRange::new(0.0, 100.0).unwrap();
        // cursor at the middle of a 1000px plot starting at x=0
        let z = r.zoomed(0.5, 500.0, 0.0, 1000.0);
        assert!((z.span() - 50.0).abs() < 1e-9);
        assert!(((z.from + z.to) / 2.0 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_respects_minimum_span() {
        let r = LogicalRange::new(0.0, 3.0).unwrap();
        let z = r.zoomed(0.9, 0.0, 0.0, 100.0);
        assert!((z.span() - MIN_VISIBLE_BARS).abs() < 1e-9);
    }

    #[test]
    fn time_index_dedups_and_rounds() {
        let idx = TimeIndex::from_times([30.0, 10.0, 20.0, 10.0]);
        assert_eq!(idx.times(), &[10.0, 20.0, 30.0]);
        assert_eq!(idx.index_of(20.0), Some(1));
        assert_eq!(idx.index_of(25.0), None);
        assert_eq!(idx.time_at(1.4), Some(20.0));
        assert_eq!(idx.time_at(-0.6), None);
        assert_eq!(idx.time_at(2.6), None);
    }
}
