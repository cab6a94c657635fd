//! Game settings and preferences
//!
//! Persisted separately from score records in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform;

/// Player-facing toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Sound cues (no audio engine in the core; gates future cue events)
    pub sound_enabled: bool,
    /// Cosmetic particle bursts
    pub particles_enabled: bool,
    /// Screen-shake feedback events
    pub screen_shake: bool,
    /// Persist the best score automatically on game over
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            particles_enabled: true,
            screen_shake: true,
            auto_save: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "echo_pulse_settings";

    /// Load settings, falling back to defaults on anything unexpected
    pub fn load() -> Self {
        if let Some(json) = platform::storage_get(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str(&json) {
                log::info!("loaded settings");
                return settings;
            }
            log::warn!("stored settings unreadable, using defaults");
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            platform::storage_set(Self::STORAGE_KEY, &json);
            log::info!("settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_enabled() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert!(settings.particles_enabled);
        assert!(settings.screen_shake);
        assert!(settings.auto_save);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.screen_shake = false;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(!back.screen_shake);
        assert!(back.particles_enabled);
    }
}
