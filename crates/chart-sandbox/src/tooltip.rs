// File: crates/chart-sandbox/src/tooltip.rs
// Summary: Crosshair tooltip for the price pane: OHLC, direction, percent change, volume.
// Non-finite or missing numbers display as 0; nothing here can fail.

use std::fmt;

use chart_bridge::{Candle, ChartDataset, Timestamp};

use crate::pane::{Pane, PaneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub time: Timestamp,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    /// Styling for the close value; compares close with this candle's own open.
    pub direction: Direction,
    pub change: String,
    pub volume: String,
}

impl Tooltip {
    pub fn from_candle(c: &Candle) -> Self {
        let (o, cl) = (finite_or_zero(c.o), finite_or_zero(c.c));
        Self {
            time: c.t,
            open: format_price(c.o),
            high: format_price(c.h),
            low: format_price(c.l),
            close: format_price(c.c),
            direction: if cl >= o { Direction::Up } else { Direction::Down },
            change: format_change(c.o, c.c),
            volume: format_volume(c.v),
        }
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "O {} H {} L {} C {} {} Vol {}",
            self.open, self.high, self.low, self.close, self.change, self.volume
        )
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

pub fn format_price(v: f64) -> String {
    format!("{:.2}", finite_or_zero(v))
}

/// `(close - open) / open` as a signed percentage; `0.00%` when open is zero.
pub fn format_change(open: f64, close: f64) -> String {
    let (o, c) = (finite_or_zero(open), finite_or_zero(close));
    if o == 0.0 {
        return "0.00%".to_string();
    }
    let pct = (c - o) / o * 100.0;
    if !pct.is_finite() {
        "0.00%".to_string()
    } else if pct >= 0.0 {
        format!("+{pct:.2}%")
    } else {
        format!("{pct:.2}%")
    }
}

/// `K`/`M` suffix at 1e3/1e6, else the rounded integer.
pub fn format_volume(v: f64) -> String {
    let v = finite_or_zero(v);
    if v.abs() >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if v.abs() >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        format!("{}", v.round() as i64)
    }
}

/// Session-local tooltip state. Never reported back to the host.
#[derive(Debug, Default)]
pub struct TooltipEngine {
    current: Option<Tooltip>,
    crosshair: Option<(f32, f32)>,
}

impl TooltipEngine {
    /// Pointer moved to `(x, y)` over `pane`. Only the price pane drives the tooltip.
    pub fn pointer_move(&mut self, pane: &Pane, dataset: &ChartDataset, x: f32, y: f32) {
        if pane.id() != PaneId::Price {
            return;
        }
        let candle = pane
            .chart()
            .time_at_pixel(x, pane.options())
            .and_then(|t| dataset.candle_at(t as Timestamp));
        match candle {
            Some(c) => {
                self.current = Some(Tooltip::from_candle(c));
                self.crosshair = Some((x, y));
            }
            None => self.hide(),
        }
    }

    pub fn hide(&mut self) {
        self.current = None;
        self.crosshair = None;
    }

    pub fn current(&self) -> Option<&Tooltip> { self.current.as_ref() }

    pub fn crosshair(&self) -> Option<(f32, f32)> { self.crosshair }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_candle_summary() {
        let c = Candle { t: 1000, o: 100.0, h: 110.0, l: 95.0, c: 105.0, v: 2_500_000.0 };
        let tip = Tooltip::from_candle(&c);
        assert_eq!(tip.direction, Direction::Up);
        assert_eq!(tip.to_string(), "O 100.00 H 110.00 L 95.00 C 105.00 +5.00% Vol 2.5M");
    }

    #[test]
    fn zero_open_guards_percentage() {
        let c = Candle { t: 1000, o: 0.0, h: 10.0, l: 0.0, c: 5.0, v: 0.0 };
        let tip = Tooltip::from_candle(&c);
        assert_eq!(tip.change, "0.00%");
        assert_eq!(tip.volume, "0");
        assert_eq!(tip.direction, Direction::Up);
    }

    #[test]
    fn down_compares_against_same_candle_open() {
        let c = Candle { t: 1, o: 50.0, h: 51.0, l: 40.0, c: 45.0, v: 1_500.0 };
        let tip = Tooltip::from_candle(&c);
        assert_eq!(tip.direction, Direction::Down);
        assert_eq!(tip.change, "-10.00%");
        assert_eq!(tip.volume, "1.5K");
    }

    #[test]
    fn non_finite_numbers_display_as_zero() {
        let c = Candle { t: 1, o: f64::NAN, h: f64::INFINITY, l: 1.0, c: 2.0, v: f64::NAN };
        let tip = Tooltip::from_candle(&c);
        assert_eq!(tip.open, "0.00");
        assert_eq!(tip.high, "0.00");
        assert_eq!(tip.change, "0.00%");
        assert_eq!(tip.volume, "0");
    }

    #[test]
    fn volume_thresholds() {
        assert_eq!(format_volume(999.4), "999");
        assert_eq!(format_volume(1_000.0), "1.0K");
        assert_eq!(format_volume(999_999.0), "1000.0K");
        assert_eq!(format_volume(1_000_000.0), "1.0M");
        assert_eq!(format_volume(12_345_678.0), "12.3M");
    }
}
