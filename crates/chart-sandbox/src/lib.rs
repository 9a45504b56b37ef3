// File: crates/chart-sandbox/src/lib.rs
// Summary: Rendering sandbox reachable only through bridge commands. Owns the price, oscillator
// and divergence panes, keeps their viewports in step, and derives the crosshair tooltip.

pub mod config;
pub mod error;
pub mod pane;
pub mod render;
pub mod sandbox;
pub mod sync;
pub mod tooltip;

pub use config::EngineConfig;
pub use error::SandboxError;
pub use pane::{series_id, Pane, PaneId, PaneInput, PaneSet, PaneState};
pub use sandbox::{PumpReport, Sandbox};
pub use sync::ViewportSynchronizer;
pub use tooltip::{Direction, Tooltip, TooltipEngine};
