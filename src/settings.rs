//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Native runs read an optional JSON
//! file named by `INVADERS_SETTINGS`.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Shot sample, relative to the page
    pub sound_url: String,

    // === Input ===
    /// Release held keys when the window loses focus
    pub release_keys_on_blur: bool,

    // === Page ===
    /// Id of the canvas element to draw into
    pub canvas_id: String,

    // === Simulation ===
    /// Drop bullets that have left the playfield
    pub cull_offscreen_bullets: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            sound_url: "shoot.wav".to_string(),
            release_keys_on_blur: true,
            canvas_id: "screen".to_string(),
            cull_offscreen_bullets: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "invaders_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_PATH: &'static str = "INVADERS_SETTINGS";

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    fn clamp(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `INVADERS_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sound_url, "shoot.wav");
        assert_eq!(settings.canvas_id, "screen");
        assert!(!settings.cull_offscreen_bullets);
        assert!(!settings.muted);
        assert!(settings.release_keys_on_blur);
    }

    #[test]
    fn test_input_group_parses() {
        let settings = Settings::from_json(r#"{"release_keys_on_blur": false}"#).unwrap();
        assert!(!settings.release_keys_on_blur);
        assert_eq!(settings.sound_url, "shoot.wav");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"muted": true}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.sound_url, "shoot.wav");
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            cull_offscreen_bullets: true,
            canvas_id: "game".to_string(),
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_volumes_clamped() {
        let settings = Settings::from_json(r#"{"master_volume": 4.0, "sfx_volume": -2.0}"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(GameError::Settings(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file() {
        let err = Settings::from_file("/nonexistent/invaders.json").unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }
}
