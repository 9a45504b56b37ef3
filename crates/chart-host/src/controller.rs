// File: crates/chart-host/src/controller.rs
// Summary: Host-side state holder and command emitter.
// Notes:
// - Emission is fire-and-forget; nothing here waits for or assumes application.
// - Until a dataset arrives the host shows a loading placeholder, never an empty sandbox.

use chart_bridge::{ChartDataset, Command, CommandSink, InitPayload, OverlayKey, OverlayVisibility};
use tracing::{debug, warn};

use crate::error::HostError;
use crate::range::TimeRange;

/// What the host screen should show in place of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostView {
    Loading,
    /// Mount a sandbox from this init payload.
    Sandbox(String),
}

pub struct HostController<S: CommandSink> {
    sink: S,
    overlays: OverlayVisibility,
    range: TimeRange,
    dataset: Option<ChartDataset>,
    emitted: u64,
}

impl<S: CommandSink> HostController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            overlays: OverlayVisibility::default(),
            range: TimeRange::default(),
            dataset: None,
            emitted: 0,
        }
    }

    /// Start from a given visibility instead of the default (sma20 and sma50 on).
    pub fn with_visibility(mut self, overlays: OverlayVisibility) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn overlays(&self) -> OverlayVisibility { self.overlays }
    pub fn range(&self) -> TimeRange { self.range }
    pub fn dataset(&self) -> Option<&ChartDataset> { self.dataset.as_ref() }

    /// Commands emitted so far.
    pub fn emitted(&self) -> u64 { self.emitted }

    /// Serialized init payload for a fresh sandbox.
    pub fn init_payload(&self) -> Result<String, HostError> {
        let data = self.dataset.clone().ok_or(HostError::NoDataset)?;
        Ok(InitPayload { data, overlays: self.overlays }.encode()?)
    }

    pub fn view(&self) -> Result<HostView, HostError> {
        match self.init_payload() {
            Ok(json) => Ok(HostView::Sandbox(json)),
            Err(HostError::NoDataset) => Ok(HostView::Loading),
            Err(e) => Err(e),
        }
    }

    /// Flip `key` and tell the sandbox. Returns the new visibility.
    pub fn toggle_overlay(&mut self, key: OverlayKey) -> bool {
        let visible = self.overlays.toggle(key);
        self.emit(Command::ToggleOverlay { key, visible });
        visible
    }

    /// Set `key` explicitly. Emits only when the value changes; returns whether it did.
    pub fn set_overlay(&mut self, key: OverlayKey, visible: bool) -> bool {
        if self.overlays.get(key) == visible {
            return false;
        }
        self.overlays.set(key, visible);
        self.emit(Command::ToggleOverlay { key, visible });
        true
    }

    /// Select a time range. Fetching the matching dataset is the caller's job; hand it back
    /// through `receive_dataset`. Returns whether the selection changed.
    pub fn select_range(&mut self, range: TimeRange) -> bool {
        if self.range == range {
            return false;
        }
        debug!(from = %self.range, to = %range, "time range selected");
        self.range = range;
        true
    }

    pub fn select_range_label(&mut self, label: &str) -> Result<bool, HostError> {
        Ok(self.select_range(label.parse()?))
    }

    /// Take a freshly fetched dataset. The first one switches the view from loading to the
    /// sandbox; later ones are pushed as `updateData`.
    pub fn receive_dataset(&mut self, data: ChartDataset) {
        for issue in data.validate() {
            warn!(%issue, ticker = %data.meta.ticker, "dataset issue");
        }
        if !data.meta.range.is_empty() && data.meta.range != self.range.label() {
            debug!(selected = %self.range, received = %data.meta.range, "dataset range differs from selection");
        }
        if self.dataset.is_some() {
            self.emit(Command::UpdateData { data: data.clone() });
        }
        self.dataset = Some(data);
    }

    fn emit(&mut self, command: Command) {
        debug!(kind = command.kind(), "emit");
        self.sink.emit(&command);
        self.emitted += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chart_bridge::{Candle, Meta};

    use super::*;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Command>>);

    impl CommandSink for Recorder {
        fn emit(&self, command: &Command) {
            self.0.borrow_mut().push(command.clone());
        }
    }

    fn dataset(n: usize) -> ChartDataset {
        let candles = (0..n as i64)
            .map(|i| Candle { t: 1_000 + i * 60, o: 1.0, h: 2.0, l: 0.5, c: 1.5, v: 10.0 })
            .collect();
        ChartDataset::from_candles(Meta { ticker: "ACME".into(), range: "3M".into(), ..Meta::default() }, candles)
    }

    #[test]
    fn loading_until_first_dataset() {
        let rec = Recorder::default();
        let mut host = HostController::new(&rec);
        assert_eq!(host.view().unwrap(), HostView::Loading);
        assert!(matches!(host.init_payload(), Err(HostError::NoDataset)));

        host.receive_dataset(dataset(3));
        let HostView::Sandbox(json) = host.view().unwrap() else { panic!("expected sandbox view") };
        let payload = InitPayload::decode(&json).unwrap();
        assert_eq!(payload.data.candles.len(), 3);
        assert_eq!(payload.overlays, OverlayVisibility::default());
        assert!(rec.0.borrow().is_empty(), "first dataset travels in the init payload");
    }

    #[test]
    fn toggle_flips_and_emits() {
        let rec = Recorder::default();
        let mut host = HostController::new(&rec);
        assert!(host.toggle_overlay(OverlayKey::Bb));
        assert!(!host.toggle_overlay(OverlayKey::Bb));
        let sent = rec.0.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], Command::ToggleOverlay { key: OverlayKey::Bb, visible: true });
        assert_eq!(sent[1], Command::ToggleOverlay { key: OverlayKey::Bb, visible: false });
        assert!(!host.overlays().bb);
    }

    #[test]
    fn set_overlay_skips_no_op() {
        let rec = Recorder::default();
        let mut host = HostController::new(&rec).with_visibility(OverlayVisibility::all_hidden());
        assert!(!host.set_overlay(OverlayKey::Sma20, false));
        assert!(host.set_overlay(OverlayKey::Sma20, true));
        assert_eq!(rec.0.borrow().len(), 1);
        assert_eq!(host.emitted(), 1);
    }

    #[test]
    fn later_datasets_are_pushed_whole() {
        let rec = Recorder::default();
        let mut host = HostController::new(&rec);
        host.receive_dataset(dataset(3));
        assert!(host.select_range(TimeRange::OneYear));
        assert!(!host.select_range(TimeRange::OneYear));
        host.receive_dataset(dataset(5));
        let sent = rec.0.borrow();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            Command::UpdateData { data } => assert_eq!(data.candles.len(), 5),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(host.dataset().map(|d| d.candles.len()), Some(5));
    }

    #[test]
    fn visibility_travels_in_init_payload() {
        let rec = Recorder::default();
        let mut host = HostController::new(&rec);
        host.toggle_overlay(OverlayKey::Sma200);
        host.receive_dataset(dataset(1));
        let json = host.init_payload().unwrap();
        assert!(InitPayload::decode(&json).unwrap().overlays.sma200);
    }

    #[test]
    fn range_label_parse_errors_surface() {
        let rec = Recorder::default();
        let mut host = HostController::new(&rec);
        assert!(host.select_range_label("1W").unwrap());
        assert!(host.select_range_label("bogus").is_err());
        assert_eq!(host.range(), TimeRange::OneWeek);
    }
}
