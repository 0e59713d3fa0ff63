//! Sound and haptic cues
//!
//! The simulation emits `GameEvent`s; this module turns them into procedural
//! tone and vibration cues for whatever audio/haptic backend the host has.
//! No synthesis happens here.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single enveloped tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency: f32,
    /// Seconds until the envelope has decayed
    pub duration: f32,
    pub waveform: Waveform,
    /// Peak gain after volume scaling
    pub gain: f32,
}

/// Vibration pattern keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticPattern {
    Light,
    Success,
    Error,
}

impl HapticPattern {
    /// Alternating on/off durations in milliseconds
    pub fn pulses(self) -> &'static [u32] {
        match self {
            HapticPattern::Light => &[10],
            HapticPattern::Success => &[25, 10, 25],
            HapticPattern::Error => &[100, 40, 100],
        }
    }
}

/// What a backend should play for one event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub tone: Option<Tone>,
    pub haptic: Option<HapticPattern>,
}

/// Peak gain of every tone at full volume
pub const BASE_GAIN: f32 = 0.08;

fn tone(frequency: f32, duration: f32, waveform: Waveform) -> Option<Tone> {
    Some(Tone {
        frequency,
        duration,
        waveform,
        gain: BASE_GAIN,
    })
}

/// Unscaled cue for an event
pub fn cue_for(event: &GameEvent) -> Cue {
    match *event {
        GameEvent::Jump => Cue {
            tone: tone(420.0, 0.08, Waveform::Sine),
            haptic: Some(HapticPattern::Light),
        },
        GameEvent::HazardHit { .. } => Cue {
            tone: tone(220.0, 0.25, Waveform::Sawtooth),
            haptic: Some(HapticPattern::Error),
        },
        // Pitch climbs with the combo held before this pickup
        GameEvent::Collect { combo, .. } => Cue {
            tone: tone(
                440.0 + combo.saturating_sub(1) as f32 * 18.0,
                0.08,
                Waveform::Sine,
            ),
            haptic: Some(HapticPattern::Light),
        },
        GameEvent::ProspectSatisfied { .. } => Cue {
            tone: tone(660.0, 0.4, Waveform::Sine),
            haptic: Some(HapticPattern::Success),
        },
        GameEvent::LevelAdvanced { .. } => Cue {
            tone: tone(880.0, 0.2, Waveform::Triangle),
            haptic: None,
        },
        GameEvent::GameOver { .. } => Cue {
            tone: tone(110.0, 0.6, Waveform::Sawtooth),
            haptic: Some(HapticPattern::Error),
        },
    }
}

/// Applies volume, mute and haptic preferences to cues
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    haptics: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            haptics: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut manager = Self::new();
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager.haptics = settings.haptics;
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_haptics(&mut self, enabled: bool) {
        self.haptics = enabled;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cue to deliver for an event, or `None` when nothing would be heard or felt
    pub fn cue(&self, event: &GameEvent) -> Option<Cue> {
        let base = cue_for(event);
        let vol = self.effective_volume();
        let cue = Cue {
            tone: base.tone.filter(|_| vol > 0.0).map(|t| Tone {
                gain: t.gain * vol,
                ..t
            }),
            haptic: base.haptic.filter(|_| self.haptics),
        };
        if cue.tone.is_none() && cue.haptic.is_none() {
            None
        } else {
            Some(cue)
        }
    }
}
