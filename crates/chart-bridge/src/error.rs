// File: crates/chart-bridge/src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed message: {0}")]
    Decode(#[from] serde_json::Error),
}
