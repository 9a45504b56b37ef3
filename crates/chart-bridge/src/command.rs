// File: crates/chart-bridge/src/command.rs
// Summary: Closed set of host -> sandbox commands and their text codec.
// Wire shape: `{ "type": "toggleOverlay", "key": "sma20", "visible": true }`
//             `{ "type": "updateData", "data": { ...ChartDataset } }`
// There is no version field; changing the shape is a breaking change.

use serde::{Deserialize, Serialize};

use crate::dataset::ChartDataset;
use crate::error::BridgeError;
use crate::overlay::OverlayKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Set one overlay's visibility. `bb` covers all three Bollinger lines.
    ToggleOverlay { key: OverlayKey, visible: bool },
    /// Replace every series in every pane.
    UpdateData { data: ChartDataset },
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::ToggleOverlay { .. } => "toggleOverlay",
            Command::UpdateData { .. } => "updateData",
        }
    }

    pub fn encode(&self) -> Result<String, BridgeError> {
        serde_json::to_string(self).map_err(|source| BridgeError::Encode { what: "command", source })
    }

    pub fn decode(text: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(text)?)
    }
}
