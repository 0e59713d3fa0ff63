//! Procedural level layout
//!
//! Spacing and heights follow sinusoids of the entity index so every level has
//! the same rolling shape; only technique and archetype picks draw from the
//! RNG, which keeps layouts reproducible for a given seed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::catalog::{Archetype, Technique};
use super::state::{Collectible, Obstacle, Prospect, ProspectState};
use crate::Rect;
use crate::consts::PLAYER_START_X;

const OBSTACLE_START_X: f32 = 500.0;
const OBSTACLE_STEP: f32 = 140.0;
const OBSTACLE_WIDTH: f32 = 20.0;

const COLLECTIBLE_START_X: f32 = 400.0;
const COLLECTIBLE_STEP: f32 = 90.0;

const PROSPECT_START_X: f32 = 900.0;
const PROSPECT_SPACING: f32 = 500.0;
const PROSPECT_Y: f32 = 300.0;

/// Everything placed for one level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelLayout {
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub prospects: Vec<Prospect>,
}

pub fn obstacle_count(level: u32) -> usize {
    (40 + 8 * level) as usize
}

pub fn collectible_count(level: u32) -> usize {
    (60 + 12 * level) as usize
}

pub fn prospect_count(level: u32) -> usize {
    (4 + level / 2) as usize
}

/// Generate the layout for `level` (1-based).
///
/// `origin_x` is the player x the level starts from; a layout generated at
/// the spawn point (`PLAYER_START_X`) uses the raw design coordinates.
pub fn generate_level<R: Rng + ?Sized>(level: u32, origin_x: f32, rng: &mut R) -> LevelLayout {
    let level = level.max(1);
    let offset = origin_x - PLAYER_START_X;

    let obstacles = (0..obstacle_count(level))
        .map(|i| {
            let f = i as f32;
            let x = OBSTACLE_START_X + f * (OBSTACLE_STEP + (f * 0.3).sin() * 40.0);
            let y = 360.0 + (f * 0.4).sin() * 100.0;
            let height = 50.0 + (f * 0.5).sin() * 30.0;
            Obstacle {
                id: i as u32 + 1,
                rect: Rect::new(Vec2::new(x + offset, y), Vec2::new(OBSTACLE_WIDTH, height)),
                phase: f * 0.2,
                dangerous: true,
            }
        })
        .collect();

    let collectibles = (0..collectible_count(level))
        .map(|i| {
            let f = i as f32;
            let technique = Technique::ALL[rng.random_range(0..Technique::ALL.len())];
            let x = COLLECTIBLE_START_X + f * (COLLECTIBLE_STEP + (f * 0.6).sin() * 30.0);
            let y = 220.0 + (f * 0.8 + technique.info().weight).sin() * 140.0;
            Collectible {
                id: i as u32 + 1,
                pos: Vec2::new(x + offset, y),
                technique,
                collected: false,
                magnetism: 0.0,
                pulse_phase: f * 0.3,
            }
        })
        .collect();

    let prospects = (0..prospect_count(level))
        .map(|i| {
            let archetype = Archetype::ALL[rng.random_range(0..Archetype::ALL.len())];
            Prospect {
                id: i as u32 + 1,
                pos: Vec2::new(
                    PROSPECT_START_X + i as f32 * PROSPECT_SPACING + offset,
                    PROSPECT_Y,
                ),
                archetype,
                state: ProspectState::Dormant,
            }
        })
        .collect();

    LevelLayout {
        obstacles,
        collectibles,
        prospects,
    }
}
