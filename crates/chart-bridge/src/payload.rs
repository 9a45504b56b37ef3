// File: crates/chart-bridge/src/payload.rs
// Summary: Initial render payload handed to the sandbox when it is first mounted.

use serde::{Deserialize, Serialize};

use crate::dataset::ChartDataset;
use crate::error::BridgeError;
use crate::overlay::OverlayVisibility;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPayload {
    pub data: ChartDataset,
    #[serde(default)]
    pub overlays: OverlayVisibility,
}

impl InitPayload {
    pub fn encode(&self) -> Result<String, BridgeError> {
        serde_json::to_string(self).map_err(|source| BridgeError::Encode { what: "init payload", source })
    }

    pub fn decode(text: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(text)?)
    }
}
