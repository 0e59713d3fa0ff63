//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collect;
pub mod collision;
pub mod level;
pub mod meter;
pub mod particles;
pub mod physics;
pub mod prospect;
pub mod session;
pub mod state;
pub mod tick;

pub use catalog::{Archetype, Energy, Rhythm, Technique, TechniqueInfo};
pub use collect::{beat_accuracy, pickup_points};
pub use collision::resolve_hazards;
pub use level::{LevelLayout, generate_level};
pub use prospect::{close_bonus, sequence_satisfies};
pub use session::{SessionCommand, apply_command};
pub use state::{
    Camera, Collectible, GameEvent, GamePhase, GameState, Obstacle, Particle, Player, Prospect,
    ProspectState, TrailPoint,
};
pub use tick::{TickInput, tick};
