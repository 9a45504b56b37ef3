// File: crates/chart-sandbox/src/config.rs
// Summary: Engine configuration (surface sizes, theme, indicator levels), loadable from TOML.

use std::path::Path;

use chart_core::types::Insets;
use chart_core::{theme, RenderOptions, Theme};
use serde::{Deserialize, Serialize};

use crate::error::SandboxError;
use crate::pane::PaneId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width shared by all panes, in pixels.
    pub width: i32,
    pub price_height: i32,
    pub oscillator_height: i32,
    pub divergence_height: i32,
    /// Theme preset name; unknown names fall back to dark.
    pub theme: String,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    /// Draw the volume histogram along the bottom of the price pane.
    pub show_volume: bool,
    pub draw_labels: bool,
    /// Zoom amount per wheel line.
    pub wheel_sensitivity: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            price_height: 420,
            oscillator_height: 160,
            divergence_height: 160,
            theme: "dark".to_string(),
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            show_volume: true,
            draw_labels: true,
            wheel_sensitivity: 0.1,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SandboxError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| SandboxError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), SandboxError> {
        let min_w = PANE_INSETS.hsum() as i32 + 1;
        let min_h = PANE_INSETS.vsum() as i32 + 1;
        if self.width < min_w {
            return Err(SandboxError::Config(format!("width must be at least {min_w}px")));
        }
        for (name, h) in [
            ("price_height", self.price_height),
            ("oscillator_height", self.oscillator_height),
            ("divergence_height", self.divergence_height),
        ] {
            if h < min_h {
                return Err(SandboxError::Config(format!("{name} must be at least {min_h}px")));
            }
        }
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(SandboxError::Config(format!(
                "rsi levels must satisfy 0 <= oversold < overbought <= 100 (got {} / {})",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        if !(self.wheel_sensitivity > 0.0 && self.wheel_sensitivity < 1.0) {
            return Err(SandboxError::Config("wheel_sensitivity must be in (0, 1)".into()));
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }

    pub fn pane_height(&self, pane: PaneId) -> i32 {
        match pane {
            PaneId::Price => self.price_height,
            PaneId::Oscillator => self.oscillator_height,
            PaneId::Divergence => self.divergence_height,
        }
    }

    pub fn total_height(&self) -> i32 {
        PaneId::ALL.iter().map(|&p| self.pane_height(p)).sum()
    }

    /// Render options for one pane. Every pane uses the same horizontal insets so bar `i`
    /// lands on the same pixel column in all of them.
    pub fn pane_options(&self, pane: PaneId) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.pane_height(pane),
            insets: PANE_INSETS,
            theme: self.theme(),
            draw_labels: self.draw_labels,
            crosshair: None,
        }
    }
}

const PANE_INSETS: Insets = Insets::new(72, 24, 16, 36);
