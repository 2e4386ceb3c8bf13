//! Game settings
//!
//! Colours, field sizing and audio preferences. Parsed from an optional
//! JSON document; any field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::DISPLAY_FRACTION;
use crate::renderer::Color;

/// Entity colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub ball: Color,
    /// Human paddle
    pub player: Color,
    /// AI paddle
    pub ai: Color,
    pub score_first: Color,
    pub score_second: Color,
    /// Canvas background, used to overdraw stale score digits
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ball: Color::from("#f00"),
            player: Color::from("#fff"),
            ai: Color::from("#ff0"),
            score_first: Color::from("#fff"),
            score_second: Color::from("#ff0"),
            background: Color::black(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub colors: Palette,
    /// Fraction of the available display the field occupies
    pub display_fraction: f32,
    /// Hit cue volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
    /// Fixed serve RNG seed; the clock is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colors: Palette::default(),
            display_fraction: DISPLAY_FRACTION,
            master_volume: 0.8,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Effective cue volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        if !(self.display_fraction > 0.0 && self.display_fraction <= 1.0) {
            log::warn!(
                "display_fraction {} out of range, using {}",
                self.display_fraction,
                DISPLAY_FRACTION
            );
            self.display_fraction = DISPLAY_FRACTION;
        }
        self
    }

    /// Read settings from the canvas element's `data-settings` attribute
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        match canvas.get_attribute("data-settings") {
            Some(json) => {
                log::info!("Loaded settings from data-settings");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
