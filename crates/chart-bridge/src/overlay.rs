// File: crates/chart-bridge/src/overlay.rs
// Summary: Overlay keys and the key -> visible mapping owned by the host and mirrored by the sandbox.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKey {
    Sma20,
    Sma50,
    Sma200,
    /// Bollinger bands; one key for the upper, middle and lower lines.
    Bb,
}

impl OverlayKey {
    pub const ALL: [OverlayKey; 4] = [OverlayKey::Sma20, OverlayKey::Sma50, OverlayKey::Sma200, OverlayKey::Bb];

    pub fn as_str(self) -> &'static str {
        match self {
            OverlayKey::Sma20 => "sma20",
            OverlayKey::Sma50 => "sma50",
            OverlayKey::Sma200 => "sma200",
            OverlayKey::Bb => "bb",
        }
    }
}

impl fmt::Display for OverlayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverlayKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown overlay key '{s}'"))
    }
}

/// Visibility per overlay key. Serializes as `{ "sma20": true, ... }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayVisibility {
    #[serde(default)]
    pub sma20: bool,
    #[serde(default)]
    pub sma50: bool,
    #[serde(default)]
    pub sma200: bool,
    #[serde(default)]
    pub bb: bool,
}

impl Default for OverlayVisibility {
    fn default() -> Self {
        Self { sma20: true, sma50: true, sma200: false, bb: false }
    }
}

impl OverlayVisibility {
    pub fn all_hidden() -> Self {
        Self { sma20: false, sma50: false, sma200: false, bb: false }
    }

    pub fn get(&self, key: OverlayKey) -> bool {
        match key {
            OverlayKey::Sma20 => self.sma20,
            OverlayKey::Sma50 => self.sma50,
            OverlayKey::Sma200 => self.sma200,
            OverlayKey::Bb => self.bb,
        }
    }

    pub fn set(&mut self, key: OverlayKey, visible: bool) {
        let slot = match key {
            OverlayKey::Sma20 => &mut self.sma20,
            OverlayKey::Sma50 => &mut self.sma50,
            OverlayKey::Sma200 => &mut self.sma200,
            OverlayKey::Bb => &mut self.bb,
        };
        *slot = visible;
    }

    /// Flip `key` and return its new value.
    pub fn toggle(&mut self, key: OverlayKey) -> bool {
        let next = !self.get(key);
        self.set(key, next);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayKey, bool)> + '_ {
        OverlayKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}
