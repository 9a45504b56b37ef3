// File: crates/chart-bridge/src/lib.rs
// Summary: Contract shared by the host controller and the rendering sandbox. Everything that
// crosses the boundary is text; this crate defines its shape and the one-way channel carrying it.

pub mod channel;
pub mod command;
pub mod dataset;
pub mod error;
pub mod overlay;
pub mod payload;

pub use channel::{channel, BridgeReceiver, BridgeSender, CommandSink, Poll};
pub use command::Command;
pub use dataset::{
    BandPoint, Candle, ChartDataset, ChartEvent, DatasetIssue, Indicators, LinePoint, MacdPoint,
    Meta, Overlays, Timestamp,
};
pub use error::BridgeError;
pub use overlay::{OverlayKey, OverlayVisibility};
pub use payload::InitPayload;
