//! Game settings and preferences

use serde::{Deserialize, Serialize};

/// Demo auto-player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplaySettings {
    /// Delay before each click once the buttons go dark (seconds)
    pub reaction_secs: f32,
    /// Press a wrong button once the sequence reaches this length (0 = never)
    pub mistake_at_length: usize,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            reaction_secs: 0.3,
            mistake_at_length: 6,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Game ===
    /// Fixed run seed; a random one is drawn when absent
    pub seed: Option<u64>,

    // === Demo ===
    pub autoplay: AutoplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
            autoplay: AutoplaySettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Volume actually applied to tones
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Environment variable holding a JSON settings object
    pub const ENV_KEY: &'static str = "GENIUS_SETTINGS";

    /// Load settings from [`Self::ENV_KEY`], falling back to defaults
    pub fn load() -> Self {
        Self::load_from(std::env::var(Self::ENV_KEY).ok().as_deref())
    }

    /// Parse `json` if given; unparsable settings are logged and replaced by defaults
    pub fn load_from(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Self::ENV_KEY);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring bad {}: {}", Self::ENV_KEY, e);
                Self::default()
            }
        }
    }
}
