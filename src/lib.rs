//! Sales Flow - a rhythm runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, hazards, collection, prospects, session)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences applied at the collaborator boundary
//! - `audio`: Event intents mapped to tone/haptic cues
//! - `snapshot`: Read-only view handed to the renderer each tick
//! - `driver`: Frame-synchronized loop driver and collaborator traits

pub mod audio;
pub mod driver;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use driver::{FrameHandle, FrameScheduler, LoopDriver, SinkError};
pub use settings::{QualityPreset, Settings};
pub use snapshot::Snapshot;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical design space (all simulation coordinates live here)
    pub const DESIGN_WIDTH: f32 = 1280.0;
    pub const DESIGN_HEIGHT: f32 = 720.0;

    /// Nominal frame step used to advance the clocks (60 Hz)
    pub const FRAME_DT: f32 = 0.016;
    /// Beat clock runs twice as fast as the animation clock
    pub const BEAT_RATE: f32 = 2.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 25.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    /// Lateral strafe speed when a direction is held
    pub const STRAFE_SPEED: f32 = 4.0;
    /// Lateral velocity decay when no direction is held
    pub const STRAFE_DECAY: f32 = 0.85;
    pub const TERMINAL_VELOCITY: f32 = 13.0;
    /// A jump is accepted mid-air while vy is above this (still rising slowly or falling)
    pub const JUMP_VY_THRESHOLD: f32 = -5.0;
    pub const GROUND_Y: f32 = 470.0;
    /// Where the player is put back after a hazard hit
    pub const KNOCKBACK_Y: f32 = 330.0;

    /// Camera keeps the player this fraction of the viewport from the left edge
    pub const CAMERA_LEAD: f32 = 0.3;
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const HAZARD_SHAKE: f32 = 16.0;
    pub const FLASH_DECAY: f32 = 0.95;

    /// Trail
    pub const TRAIL_LENGTH: usize = 18;
    pub const TRAIL_DECAY: f32 = 0.94;

    /// Session defaults
    pub const START_LIVES: u8 = 3;
    pub const START_GAME_SPEED: f32 = 0.9;
    pub const MAX_FLOW: f32 = 100.0;
    pub const FLOW_DECAY: f32 = 0.08;
    pub const MIN_MULTIPLIER: f32 = 1.0;
    pub const MAX_MULTIPLIER: f32 = 8.0;

    /// Level progression: level N ends this far past its origin
    pub const LEVEL_BASE_DISTANCE: f32 = 1800.0;
    pub const LEVEL_DISTANCE_PER_LEVEL: f32 = 900.0;
}

/// Axis-aligned rectangle in design units (top-left origin, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Grow the rect by `margin` on every side (negative shrinks)
    #[inline]
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }

    /// Strict overlap test; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x + self.size.x > other.pos.x
            && self.pos.x < other.pos.x + other.size.x
            && self.pos.y + self.size.y > other.pos.y
            && self.pos.y < other.pos.y + other.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Clamp a value into `[min, max]`, mapping NaN to `min`
#[inline]
pub fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
