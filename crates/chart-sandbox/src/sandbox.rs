// File: crates/chart-sandbox/src/sandbox.rs
// Summary: The rendering sandbox. Mounted once from an init payload, then driven only by
// bridge commands (text) and by user input on its own panes.
// Notes:
// - A command that fails to decode is logged and dropped; the last good state stays on screen.
// - Commands are applied strictly in arrival order, one at a time.
// - After teardown every further command is dropped.

use std::path::Path;

use chart_bridge::{
    BridgeReceiver, ChartDataset, Command, InitPayload, OverlayKey, OverlayVisibility, Poll,
};
use chart_core::LogicalRange;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::SandboxError;
use crate::pane::{overlay_series, PaneId, PaneInput, PaneSet, PaneState};
use crate::render;
use crate::sync::ViewportSynchronizer;
use crate::tooltip::{Tooltip, TooltipEngine};

/// What one `pump` or `run` did with the queued messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub applied: usize,
    pub dropped: usize,
}

pub struct Sandbox {
    config: EngineConfig,
    panes: PaneSet,
    sync: ViewportSynchronizer,
    tooltip: TooltipEngine,
    overlays: OverlayVisibility,
    dataset: ChartDataset,
    receiver: Option<BridgeReceiver>,
    torn_down: bool,
}

impl Sandbox {
    /// Build the panes from the init payload and attach to the command channel.
    pub fn mount(init_json: &str, receiver: BridgeReceiver, config: EngineConfig) -> Result<Self, SandboxError> {
        config.validate()?;
        let payload = InitPayload::decode(init_json)?;
        let mut sandbox = Self {
            panes: PaneSet::new(&config),
            config,
            sync: ViewportSynchronizer::new(),
            tooltip: TooltipEngine::default(),
            overlays: payload.overlays,
            dataset: ChartDataset::default(),
            receiver: Some(receiver),
            torn_down: false,
        };
        sandbox.load_dataset(payload.data);
        for (key, visible) in payload.overlays.iter() {
            sandbox.show_overlay(key, visible);
        }
        info!(
            ticker = %sandbox.dataset.meta.ticker,
            candles = sandbox.dataset.candles.len(),
            "sandbox mounted"
        );
        Ok(sandbox)
    }

    /// Apply every command already queued, without blocking.
    pub fn pump(&mut self) -> PumpReport {
        let mut report = PumpReport::default();
        let Some(receiver) = self.receiver.take() else {
            return report;
        };
        loop {
            match receiver.poll() {
                Poll::Message(text) => report.count(self.deliver(&text)),
                Poll::Empty | Poll::Closed => break,
            }
        }
        self.receiver = Some(receiver);
        report
    }

    /// Apply commands as they arrive until the host side disconnects, then tear down.
    pub fn run(&mut self) -> PumpReport {
        let mut report = PumpReport::default();
        if let Some(receiver) = self.receiver.take() {
            while let Some(text) = receiver.recv() {
                report.count(self.deliver(&text));
            }
        }
        self.teardown();
        report
    }

    /// Decode and apply one raw message. Returns false when it was dropped.
    pub fn deliver(&mut self, text: &str) -> bool {
        if self.torn_down {
            debug!("sandbox torn down; message dropped");
            return false;
        }
        match Command::decode(text) {
            Ok(command) => {
                debug!(kind = command.kind(), "applying command");
                self.apply(command);
                true
            }
            Err(e) => {
                warn!(error = %e, "malformed command dropped");
                false
            }
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleOverlay { key, visible } => {
                self.overlays.set(key, visible);
                self.show_overlay(key, visible);
            }
            Command::UpdateData { data } => self.load_dataset(data),
        }
    }

    fn show_overlay(&mut self, key: OverlayKey, visible: bool) {
        let chart = &mut self.panes.get_mut(PaneId::Price).chart;
        for id in overlay_series(key) {
            chart.set_series_visible(id, visible);
        }
    }

    fn load_dataset(&mut self, data: ChartDataset) {
        for issue in data.validate() {
            warn!(%issue, ticker = %data.meta.ticker, "dataset issue");
        }
        for pane in self.panes.iter_mut() {
            pane.load(&data);
        }
        self.tooltip.hide();
        self.dataset = data;
    }

    /// Feed user input on `pane`. Range changes are mirrored into the other two panes.
    pub fn handle_input(&mut self, pane: PaneId, input: PaneInput) {
        if self.torn_down {
            return;
        }
        match input {
            PaneInput::Pan { dx_px } => {
                let p = self.panes.get_mut(pane);
                p.chart.pan_by_pixels(dx_px, &p.opts);
                self.sync.propagate(&mut self.panes);
            }
            PaneInput::Zoom { wheel_lines, cursor_x } => {
                let scroll = wheel_lines * self.config.wheel_sensitivity;
                let p = self.panes.get_mut(pane);
                p.chart.zoom_at_pixel(scroll, cursor_x, &p.opts);
                self.sync.propagate(&mut self.panes);
            }
            PaneInput::PointerMove { x, y } => {
                self.tooltip.pointer_move(self.panes.get(pane), &self.dataset, x, y);
            }
            PaneInput::PointerLeave => {
                if pane == PaneId::Price {
                    self.tooltip.hide();
                }
            }
        }
    }

    /// Map a point on the composite surface to the pane under it and pane-local coordinates.
    pub fn pane_at(&self, x: f32, y: f32) -> Option<(PaneId, f32, f32)> {
        PaneId::ALL
            .into_iter()
            .zip(render::pane_rows(&self.config))
            .find(|(_, row)| row.contains(x, y))
            .map(|(id, row)| (id, x - row.left as f32, y - row.top as f32))
    }

    /// Range change requested by a control on one pane (a "reset zoom" button, say).
    /// Counts as user-driven and is mirrored like a pan.
    pub fn set_visible_range(&mut self, pane: PaneId, range: LogicalRange) {
        if self.torn_down {
            return;
        }
        self.panes.get_mut(pane).chart.set_visible_range(range);
        self.sync.propagate(&mut self.panes);
    }

    /// Dispose every pane and detach from the channel. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        for pane in self.panes.iter_mut() {
            pane.dispose();
        }
        self.tooltip.hide();
        self.receiver = None;
        self.torn_down = true;
        info!(broadcasts = self.sync.broadcasts(), "sandbox torn down");
    }

    pub fn is_torn_down(&self) -> bool { self.torn_down }

    // ---- introspection --------------------------------------------------------

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn panes(&self) -> &PaneSet { &self.panes }
    pub fn dataset(&self) -> &ChartDataset { &self.dataset }
    pub fn overlay_visibility(&self) -> OverlayVisibility { self.overlays }
    pub fn tooltip(&self) -> Option<&Tooltip> { self.tooltip.current() }
    pub(crate) fn crosshair(&self) -> Option<(f32, f32)> { self.tooltip.crosshair() }

    pub fn pane_state(&self, pane: PaneId) -> PaneState { self.panes.get(pane).state() }

    pub fn visible_range(&self, pane: PaneId) -> LogicalRange {
        self.panes.get(pane).chart().visible_range()
    }

    /// `None` when the pane has no series with that id.
    pub fn series_visible(&self, pane: PaneId, id: &str) -> Option<bool> {
        self.panes.get(pane).chart().series_by_id(id).map(|s| s.visible)
    }

    pub fn series_len(&self, pane: PaneId, id: &str) -> usize {
        self.panes.get(pane).chart().series_by_id(id).map_or(0, |s| s.len())
    }

    /// Range-change notifications the pane has ever raised.
    pub fn range_event_count(&self, pane: PaneId) -> u64 {
        self.panes.get(pane).chart().range_events_emitted()
    }

    // ---- output ---------------------------------------------------------------

    pub fn render_png_bytes(&self) -> Result<Vec<u8>, SandboxError> {
        render::composite_png(self).map_err(SandboxError::Render)
    }

    pub fn render_png(&self, path: impl AsRef<Path>) -> Result<(), SandboxError> {
        let path = path.as_ref();
        let bytes = self.render_png_bytes()?;
        let io = |source| SandboxError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        std::fs::write(path, bytes).map_err(io)
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl PumpReport {
    fn count(&mut self, applied: bool) {
        if applied {
            self.applied += 1;
        } else {
            self.dropped += 1;
        }
    }
}
