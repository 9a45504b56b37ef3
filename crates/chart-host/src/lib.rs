// File: crates/chart-host/src/lib.rs
// Summary: Host controller. Owns overlay visibility and the selected time range, builds the
// sandbox's init payload, and turns state changes into bridge commands. No chart math here.

pub mod controller;
pub mod error;
pub mod range;

pub use controller::{HostController, HostView};
pub use error::HostError;
pub use range::TimeRange;
