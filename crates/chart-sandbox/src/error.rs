// File: crates/chart-sandbox/src/error.rs

use std::path::PathBuf;

use chart_bridge::BridgeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("init payload rejected: {0}")]
    Payload(#[from] BridgeError),

    #[error("invalid engine config: {0}")]
    Config(String),

    #[error("failed to parse engine config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("render failed: {0:#}")]
    Render(anyhow::Error),
}
