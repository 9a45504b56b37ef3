// File: crates/chart-sandbox/src/sync.rs
// Summary: Viewport synchronizer. A mediator that copies a user-driven range change from one
// pane to the other two with the silent setter, so the receivers never report a change of
// their own and nothing can bounce back.

use chart_core::LogicalRange;
use tracing::debug;

use crate::pane::{PaneId, PaneSet};

#[derive(Debug, Default)]
pub struct ViewportSynchronizer {
    broadcasts: u64,
}

impl ViewportSynchronizer {
    pub fn new() -> Self { Self::default() }

    /// Push `range` to every pane other than `origin`.
    pub fn broadcast_range(&mut self, origin: PaneId, range: LogicalRange, panes: &mut PaneSet) {
        for pane in panes.others_mut(origin) {
            pane.chart.set_visible_range_silently(range);
            pane.mark_interactive();
        }
        self.broadcasts += 1;
        debug!(?origin, from = range.from(), to = range.to(), "viewport broadcast");
    }

    /// Drain each pane's pending range-change notifications and broadcast them in order.
    /// Returns how many notifications were handled.
    pub fn propagate(&mut self, panes: &mut PaneSet) -> usize {
        let mut handled = 0;
        for origin in PaneId::ALL {
            let events = {
                let pane = panes.get_mut(origin);
                let events = pane.chart.take_range_events();
                if !events.is_empty() {
                    pane.mark_interactive();
                }
                events
            };
            for range in events {
                self.broadcast_range(origin, range, panes);
                handled += 1;
            }
        }
        handled
    }

    pub fn broadcasts(&self) -> u64 { self.broadcasts }
}
