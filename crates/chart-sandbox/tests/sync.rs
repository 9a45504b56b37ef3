// File: crates/chart-sandbox/tests/sync.rs
// Purpose: Viewport synchronization across the three panes: every user-driven range change
// lands in the other two panes, the driving pane raises exactly one notification per change,
// and the receivers raise none.

mod common;

use chart_core::LogicalRange;
use chart_sandbox::{PaneId, PaneInput, PaneState, Sandbox};

fn assert_in_step(sandbox: &Sandbox, origin: PaneId) {
    let want = sandbox.visible_range(origin);
    for pane in PaneId::ALL {
        assert_eq!(sandbox.visible_range(pane), want, "{pane:?} out of step with {origin:?}");
    }
}

fn inputs() -> Vec<PaneInput> {
    vec![
        PaneInput::Pan { dx_px: 120.0 },
        PaneInput::Zoom { wheel_lines: 3.0, cursor_x: 400.0 },
        PaneInput::Pan { dx_px: -45.5 },
        PaneInput::Zoom { wheel_lines: -1.0, cursor_x: 120.0 },
        PaneInput::Zoom { wheel_lines: 5.0, cursor_x: 900.0 },
        PaneInput::Pan { dx_px: 300.0 },
    ]
}

#[test]
fn mount_fits_every_pane_to_the_candles() {
    let (_tx, sandbox) = common::mount(60);
    for pane in PaneId::ALL {
        assert_eq!(sandbox.pane_state(pane), PaneState::AutoFit);
        assert_eq!(sandbox.visible_range(pane), LogicalRange::full(60));
        assert_eq!(sandbox.range_event_count(pane), 0);
    }
}

#[test]
fn every_pane_can_drive_the_others() {
    for origin in PaneId::ALL {
        let (_tx, mut sandbox) = common::mount(80);
        for (n, input) in inputs().into_iter().enumerate() {
            sandbox.handle_input(origin, input);
            assert_in_step(&sandbox, origin);
            assert_eq!(sandbox.range_event_count(origin), n as u64 + 1);
            for other in PaneId::ALL.into_iter().filter(|&p| p != origin) {
                assert_eq!(sandbox.range_event_count(other), 0, "{other:?} echoed a broadcast");
            }
        }
    }
}

#[test]
fn interleaved_drivers_stay_convergent() {
    let (_tx, mut sandbox) = common::mount(80);
    let drivers = [PaneId::Divergence, PaneId::Price, PaneId::Oscillator, PaneId::Price];
    for (origin, input) in drivers.into_iter().cycle().zip(inputs()) {
        sandbox.handle_input(origin, input);
        assert_in_step(&sandbox, origin);
    }
    let total: u64 = PaneId::ALL.iter().map(|&p| sandbox.range_event_count(p)).sum();
    assert_eq!(total, inputs().len() as u64);
}

#[test]
fn programmatic_range_is_mirrored() {
    let (_tx, mut sandbox) = common::mount(80);
    let range = LogicalRange::new(10.0, 30.0).unwrap();
    sandbox.set_visible_range(PaneId::Oscillator, range);
    for pane in PaneId::ALL {
        assert_eq!(sandbox.visible_range(pane), range);
    }
    assert_eq!(sandbox.range_event_count(PaneId::Oscillator), 1);
    assert_eq!(sandbox.range_event_count(PaneId::Price), 0);
}

#[test]
fn only_valid_ranges_reach_the_panes() {
    let (_tx, mut sandbox) = common::mount(40);
    for (from, to) in [(f64::NAN, 10.0), (0.0, f64::INFINITY), (30.0, 10.0), (5.0, 5.0)] {
        if let Ok(range) = LogicalRange::new(from, to) {
            sandbox.set_visible_range(PaneId::Price, range);
        }
    }
    for pane in PaneId::ALL {
        let range = sandbox.visible_range(pane);
        assert_eq!(range, LogicalRange::full(40));
        assert!(range.from().is_finite() && range.from() < range.to());
        assert_eq!(sandbox.range_event_count(pane), 0);
    }
}

#[test]
fn pan_makes_all_panes_interactive() {
    let (_tx, mut sandbox) = common::mount(60);
    sandbox.handle_input(PaneId::Oscillator, PaneInput::Pan { dx_px: 50.0 });
    for pane in PaneId::ALL {
        assert_eq!(sandbox.pane_state(pane), PaneState::Interactive);
    }
}

#[test]
fn pointer_input_never_moves_ranges() {
    let (_tx, mut sandbox) = common::mount(60);
    sandbox.handle_input(PaneId::Price, PaneInput::PointerMove { x: 300.0, y: 100.0 });
    sandbox.handle_input(PaneId::Price, PaneInput::PointerLeave);
    for pane in PaneId::ALL {
        assert_eq!(sandbox.visible_range(pane), LogicalRange::full(60));
        assert_eq!(sandbox.pane_state(pane), PaneState::AutoFit);
    }
}

#[test]
fn new_data_refits_each_pane_on_its_own() {
    let (tx, mut sandbox) = common::mount(60);
    sandbox.handle_input(PaneId::Price, PaneInput::Zoom { wheel_lines: 4.0, cursor_x: 500.0 });
    assert_ne!(sandbox.visible_range(PaneId::Price), LogicalRange::full(60));

    tx.post(common::update_text(common::dataset(90)));
    sandbox.pump();
    for pane in PaneId::ALL {
        assert_eq!(sandbox.pane_state(pane), PaneState::AutoFit);
        assert_eq!(sandbox.visible_range(pane), LogicalRange::full(90));
    }
    assert_eq!(sandbox.range_event_count(PaneId::Price), 1);
}

#[test]
fn indicator_panes_share_bar_numbering_with_candles() {
    let (_tx, sandbox) = common::mount(60);
    let price = sandbox.panes().get(PaneId::Price).chart();
    let rsi = sandbox.panes().get(PaneId::Oscillator).chart();
    let macd = sandbox.panes().get(PaneId::Divergence).chart();
    let t = (common::T0 + 30 * common::DAY) as f64;
    assert_eq!(price.logical_of(t), Some(30.0));
    assert_eq!(rsi.logical_of(t), Some(30.0));
    assert_eq!(macd.logical_of(t), Some(30.0));
}
