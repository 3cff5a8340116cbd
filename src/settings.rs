//! Game settings and preferences
//!
//! Compiled-in defaults, optionally overridden by a JSON block embedded in the
//! host page: `<script id="settings" type="application/json">`.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background drone volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence all audio
    pub muted: bool,

    // === Visual Effects ===
    /// Soft halos behind ships, shots and sparks
    pub glow: bool,

    // === Timing ===
    /// Run the simulation at a fixed 60Hz instead of once per animation frame
    pub fixed_timestep: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            glow: true,
            fixed_timestep: true,
        }
    }
}

impl Settings {
    /// Element id of the embedded JSON override
    pub const ELEMENT_ID: &'static str = "settings";

    /// Parse a (possibly partial) settings object; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.clamped())
    }

    /// Volumes forced into 0..=1
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from page");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "glow": false }"#).unwrap();
        assert!(!settings.glow);
        assert!(settings.fixed_timestep);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let settings =
            Settings::from_json(r#"{ "master_volume": 3.5, "sfx_volume": -1 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ glow: nope").is_err());
        assert!(Settings::from_json(r#"{ "muted": "yes" }"#).is_err());
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            muted: true,
            fixed_timestep: false,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
