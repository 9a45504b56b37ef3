// File: crates/chart-host/src/error.rs

use chart_bridge::BridgeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no dataset has been received yet")]
    NoDataset,

    #[error("cannot build init payload: {0}")]
    Payload(#[from] BridgeError),

    #[error("unknown time range '{0}'")]
    UnknownRange(String),
}
