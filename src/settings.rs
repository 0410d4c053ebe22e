//! Player settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
#[cfg(target_arch = "wasm32")]
use crate::persistence::local_storage;
use crate::persistence::PersistenceError;

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Look ===
    /// Player car paint as `#rrggbb`
    pub car_color: String,
    /// Crash bursts
    pub particles: bool,
    /// Speed bar under the HUD
    pub speed_meter: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            car_color: "#00bfff".to_string(),
            particles: true,
            speed_meter: true,

            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.6,
            muted: false,
        }
    }
}

impl Settings {
    /// Car paint, falling back to the default blue on a malformed string
    pub fn car_rgba(&self) -> Rgba {
        Rgba::parse_or(&self.car_color, Rgba::DEFAULT_CAR)
    }

    /// Parse stored settings; unknown keys are ignored and missing ones default
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pixel_racer_settings";

    /// Settings from LocalStorage, defaults when absent or unreadable
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = local_storage::read_item(Self::STORAGE_KEY)
            .and_then(|raw| raw.as_deref().map(Self::from_json).transpose());
        match stored {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
