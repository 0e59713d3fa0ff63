//! Player preferences
//!
//! Presentation-only: none of these change simulation outcomes. They filter
//! what the loop driver hands to the renderer and the audio/haptic backend.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles handed to the renderer for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Trail samples drawn (fraction of the full trail)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Camera shake on hazard hits
    pub screen_shake: bool,
    /// Particle bursts
    pub particles: bool,
    /// Hit/close screen flash
    pub screen_flash: bool,

    // === Feedback ===
    /// Vibration on supported devices
    pub haptics: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            screen_shake: true,
            particles: true,
            screen_flash: true,

            haptics: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the flash for performance
        if preset == QualityPreset::Low {
            self.screen_flash = false;
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Trail samples to keep out of `full` for the current preset
    pub fn trail_samples(&self, full: usize) -> usize {
        ((full as f32) * self.quality.trail_quality()).ceil() as usize
    }

    /// Parse settings from JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Bad settings JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Read settings from a file. Unreadable files are an error; bad contents
    /// fall back to defaults like `from_json`.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        std::fs::read_to_string(path).map(|json| Self::from_json(&json))
    }

    pub fn to_json(&self) -> String {
        // Plain data, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}
