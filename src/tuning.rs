//! Data-driven game balance
//!
//! The knobs a designer is allowed to turn, with the ranges the game stays
//! playable in. Loaded from JSON; anything missing falls back to the shipped
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid tuning input
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Auto-forward pace in units per tick at game speed 1.0
    pub base_speed: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Jump impulse (negative = up)
    pub jump_force: f32,
    /// How much each point of flow adds to game speed
    pub flow_speed_influence: f32,
    /// Upper bound on game speed
    pub max_speed_mult: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 3.2,
            gravity: 0.55,
            jump_force: -11.0,
            flow_speed_influence: 0.004,
            max_speed_mult: 1.6,
        }
    }
}

impl Tuning {
    pub const BASE_SPEED_RANGE: (f32, f32) = (2.0, 5.0);
    pub const GRAVITY_RANGE: (f32, f32) = (0.4, 0.9);
    pub const JUMP_FORCE_RANGE: (f32, f32) = (-16.0, -8.0);
    pub const FLOW_INFLUENCE_RANGE: (f32, f32) = (0.0, 0.01);
    pub const MAX_SPEED_RANGE: (f32, f32) = (1.2, 2.5);

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check every knob against its playable range
    pub fn validate(&self) -> Result<(), TuningError> {
        check("base_speed", self.base_speed, Self::BASE_SPEED_RANGE)?;
        check("gravity", self.gravity, Self::GRAVITY_RANGE)?;
        check("jump_force", self.jump_force, Self::JUMP_FORCE_RANGE)?;
        check(
            "flow_speed_influence",
            self.flow_speed_influence,
            Self::FLOW_INFLUENCE_RANGE,
        )?;
        check("max_speed_mult", self.max_speed_mult, Self::MAX_SPEED_RANGE)?;
        Ok(())
    }

    /// Derived game speed for a given flow level, capped at `max_speed_mult`
    pub fn game_speed(&self, flow: f32) -> f32 {
        (1.0 + flow * self.flow_speed_influence).min(self.max_speed_mult)
    }
}

fn check(field: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), TuningError> {
    if !value.is_finite() {
        return Err(TuningError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(TuningError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
