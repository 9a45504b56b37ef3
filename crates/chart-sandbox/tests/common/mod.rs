// File: crates/chart-sandbox/tests/common/mod.rs
// Purpose: Shared fixtures for sandbox integration tests: a synthetic daily dataset and a
// mounted sandbox wired to a live bridge channel.
#![allow(dead_code)]

use chart_bridge::{
    channel, BandPoint, BridgeSender, Candle, ChartDataset, Command, Indicators, InitPayload, LinePoint,
    MacdPoint, Meta, OverlayVisibility, Overlays,
};
use chart_core::scale::TimeScale;
use chart_sandbox::{EngineConfig, PaneId, Sandbox};

pub const T0: i64 = 1_700_000_000;
pub const DAY: i64 = 86_400;

pub fn candle(i: usize) -> Candle {
    let base = 100.0 + (i as f64 * 0.4).sin() * 10.0 + i as f64 * 0.2;
    let (o, c) = if i % 3 == 0 { (base + 1.0, base - 1.0) } else { (base - 1.0, base + 1.0) };
    Candle { t: T0 + i as i64 * DAY, o, h: base + 2.0, l: base - 2.0, c, v: 1_000.0 + i as f64 * 10.0 }
}

/// `n` daily candles with every overlay and indicator populated past its warm-up.
pub fn dataset(n: usize) -> ChartDataset {
    let candles: Vec<Candle> = (0..n).map(candle).collect();
    let line = |from: usize, f: &dyn Fn(&Candle) -> f64| -> Vec<LinePoint> {
        candles.iter().skip(from).map(|c| LinePoint { t: c.t, v: f(c) }).collect()
    };
    let overlays = Overlays {
        sma20: Some(line(19, &|c| c.c - 0.5)),
        sma50: Some(line(49.min(n), &|c| c.c - 1.0)),
        sma200: None,
        bollinger_bands: Some(
            candles
                .iter()
                .skip(19)
                .map(|c| BandPoint { t: c.t, upper: c.c + 4.0, middle: c.c, lower: c.c - 4.0 })
                .collect(),
        ),
    };
    let indicators = Indicators {
        rsi: Some(line(14, &|c| 50.0 + (c.c - 100.0) * 3.0)),
        macd: Some(
            candles
                .iter()
                .skip(25)
                .enumerate()
                .map(|(i, c)| {
                    let value = ((i as f64) * 0.3).sin();
                    let signal = ((i as f64) * 0.3 - 0.4).sin();
                    MacdPoint { t: c.t, value, signal, histogram: value - signal }
                })
                .collect(),
        ),
    };
    ChartDataset::from_candles(
        Meta { ticker: "ACME".into(), resolution: "1d".into(), range: "3M".into(), candle_count: 0 },
        candles,
    )
    .with_overlays(overlays)
    .with_indicators(indicators)
}

pub fn init_json(data: ChartDataset, overlays: OverlayVisibility) -> String {
    InitPayload { data, overlays }.encode().unwrap()
}

pub fn mount_with(data: ChartDataset, overlays: OverlayVisibility, config: EngineConfig) -> (BridgeSender, Sandbox) {
    let (tx, rx) = channel();
    let sandbox = Sandbox::mount(&init_json(data, overlays), rx, config).unwrap();
    (tx, sandbox)
}

pub fn mount(n: usize) -> (BridgeSender, Sandbox) {
    mount_with(dataset(n), OverlayVisibility::default(), EngineConfig::default())
}

pub fn update_text(data: ChartDataset) -> String {
    Command::UpdateData { data }.encode().unwrap()
}

/// Pane-local x pixel at the centre of bar `index` under the pane's current range.
pub fn bar_px(sandbox: &Sandbox, pane: PaneId, index: usize) -> f32 {
    let opts = sandbox.panes().get(pane).options();
    TimeScale::for_range(sandbox.visible_range(pane), opts.plot_left() as f32, opts.plot_width() as f32)
        .to_px(index as f64)
}
