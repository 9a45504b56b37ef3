// File: crates/chart-host/tests/end_to_end.rs
// Purpose: Host controller driving a real sandbox over the bridge channel.

use chart_bridge::{channel, Candle, ChartDataset, LinePoint, Meta, OverlayKey, Overlays};
use chart_host::{HostController, HostView, TimeRange};
use chart_sandbox::{series_id, EngineConfig, PaneId, PaneInput, PaneState, Sandbox};

fn dataset(n: i64, range: TimeRange) -> ChartDataset {
    let candles: Vec<Candle> = (0..n)
        .map(|i| {
            let p = 50.0 + i as f64;
            Candle { t: 86_400 * (19_000 + i), o: p, h: p + 2.0, l: p - 2.0, c: p + 1.0, v: 5_000.0 }
        })
        .collect();
    let sma20 = candles.iter().skip(19).map(|c| LinePoint { t: c.t, v: c.c }).collect();
    ChartDataset::from_candles(
        Meta { ticker: "ACME".into(), resolution: "1d".into(), range: range.label().into(), candle_count: 0 },
        candles,
    )
    .with_overlays(Overlays { sma20: Some(sma20), ..Overlays::default() })
}

#[test]
fn host_commands_reach_the_sandbox_in_order() {
    let (tx, rx) = channel();
    let mut host = HostController::new(tx);
    assert_eq!(host.view().unwrap(), HostView::Loading);

    host.receive_dataset(dataset(60, TimeRange::ThreeMonths));
    let HostView::Sandbox(init) = host.view().unwrap() else { panic!("expected sandbox view") };
    let mut sandbox = Sandbox::mount(&init, rx, EngineConfig::default()).unwrap();
    assert_eq!(sandbox.overlay_visibility(), host.overlays());

    host.toggle_overlay(OverlayKey::Sma20);
    host.toggle_overlay(OverlayKey::Bb);
    host.select_range(TimeRange::OneYear);
    host.receive_dataset(dataset(250, TimeRange::OneYear));

    let report = sandbox.pump();
    assert_eq!((report.applied, report.dropped), (3, 0));
    assert_eq!(sandbox.overlay_visibility(), host.overlays());
    assert_eq!(sandbox.series_visible(PaneId::Price, series_id::SMA20), Some(false));
    assert_eq!(sandbox.series_visible(PaneId::Price, series_id::BB_MIDDLE), Some(true));
    assert_eq!(sandbox.series_len(PaneId::Price, series_id::CANDLES), 250);
    assert_eq!(sandbox.series_len(PaneId::Price, series_id::SMA20), 231);
    assert_eq!(sandbox.dataset().meta.range, "1Y");
}

#[test]
fn sandbox_interaction_never_reaches_the_host() {
    let (tx, rx) = channel();
    let mut host = HostController::new(tx);
    host.receive_dataset(dataset(60, TimeRange::ThreeMonths));
    let HostView::Sandbox(init) = host.view().unwrap() else { panic!("expected sandbox view") };
    let mut sandbox = Sandbox::mount(&init, rx, EngineConfig::default()).unwrap();

    sandbox.handle_input(PaneId::Price, PaneInput::Pan { dx_px: 200.0 });
    sandbox.handle_input(PaneId::Price, PaneInput::PointerMove { x: 500.0, y: 100.0 });
    assert_eq!(sandbox.pane_state(PaneId::Divergence), PaneState::Interactive);
    assert_eq!(host.emitted(), 0);
}

#[test]
fn dropped_sandbox_does_not_disturb_the_host() {
    let (tx, rx) = channel();
    let mut host = HostController::new(tx);
    host.receive_dataset(dataset(10, TimeRange::ThreeMonths));
    let HostView::Sandbox(init) = host.view().unwrap() else { panic!("expected sandbox view") };
    drop(Sandbox::mount(&init, rx, EngineConfig::default()).unwrap());

    host.toggle_overlay(OverlayKey::Sma50);
    host.receive_dataset(dataset(20, TimeRange::ThreeMonths));
    assert_eq!(host.emitted(), 2);
    assert!(!host.overlays().sma50);
}
