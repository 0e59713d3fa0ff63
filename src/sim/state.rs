//! Game state and core simulation types
//!
//! One aggregate owned by the loop driver and mutated only by `tick` and the
//! session commands. Rendering works from a `Snapshot` copied out of it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{Archetype, Technique};
use crate::Rect;
use crate::consts::*;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for `Start`
    Menu,
    /// Active gameplay; the only phase that ticks
    Playing,
    /// Lives ran out, waiting for `Retry` or `ExitToMenu`
    GameOver,
}

/// Trail sample for rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// 1.0 when recorded, decays every tick
    pub life: f32,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    /// Oldest first
    pub trail: Vec<TrailPoint>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            grounded: false,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Record current position and age older samples
    pub fn record_trail(&mut self) {
        self.trail.push(TrailPoint {
            pos: self.pos,
            life: 1.0,
        });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
        for point in &mut self.trail {
            point.life *= TRAIL_DECAY;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Horizontal scroll offset
    pub x: f32,
    /// Shake magnitude; jitter is sampled from this every tick
    pub shake: f32,
    /// Last sampled jitter
    pub jitter: Vec2,
}

/// A pulsing hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Phase offset of the pulsing hitbox
    pub phase: f32,
    pub dangerous: bool,
}

impl Obstacle {
    /// How far the hitbox currently reaches past the obstacle on each side
    #[inline]
    pub fn pulse_margin(&self, beat_time: f32) -> f32 {
        (beat_time * 3.0 + self.phase).sin() * 5.0 + 1.0
    }

    pub fn hitbox(&self, beat_time: f32) -> Rect {
        self.rect.expand(self.pulse_margin(beat_time))
    }
}

/// A technique token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    /// Center; pulled toward the player by magnetism
    pub pos: Vec2,
    pub technique: Technique,
    pub collected: bool,
    /// 0..=1
    pub magnetism: f32,
    pub pulse_phase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProspectState {
    Dormant,
    Approaching,
    /// Terminal
    Satisfied,
}

/// A prospect encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prospect {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub archetype: Archetype,
    pub state: ProspectState,
}

/// Size of the prospect box
pub const PROSPECT_SIZE: f32 = 30.0;

impl Prospect {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos - Vec2::splat(PROSPECT_SIZE / 2.0),
            Vec2::splat(PROSPECT_SIZE),
        )
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Intents emitted during a tick for the audio/haptic collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    HazardHit { lives_left: u8 },
    Collect { technique: Technique, combo: u32 },
    ProspectSatisfied { archetype: Archetype, bonus: u64 },
    LevelAdvanced { level: u32 },
    GameOver { score: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Drives level generation, particle spread and shake jitter
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// 1.0..=8.0
    pub multiplier: f32,
    pub combo: u32,
    /// Highest combo this session
    pub best_combo: u32,
    /// 1-based
    pub level: u32,
    pub lives: u8,
    /// Flow meter, 0..=100
    pub flow: f32,
    /// Derived from flow each tick
    pub game_speed: f32,
    /// Animation clock
    pub time: f32,
    /// Beat clock; one beat per whole unit
    pub beat_time: f32,
    /// Techniques collected since the last hazard hit or prospect close.
    /// Shared by every prospect: closing one clears it for all of them.
    pub sequence: Vec<Technique>,
    /// Player x when the current level was generated
    pub level_origin_x: f32,
    pub time_ticks: u64,
    pub screen_flash: f32,
    pub player: Player,
    pub camera: Camera,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub prospects: Vec<Prospect>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Intents queued this tick, drained by the driver
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state in the menu with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            multiplier: MIN_MULTIPLIER,
            combo: 0,
            best_combo: 0,
            level: 1,
            lives: START_LIVES,
            flow: 0.0,
            game_speed: START_GAME_SPEED,
            time: 0.0,
            beat_time: 0.0,
            sequence: Vec::new(),
            level_origin_x: PLAYER_START_X,
            time_ticks: 0,
            screen_flash: 0.0,
            player: Player::default(),
            camera: Camera::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            prospects: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset everything a fresh run starts from (level layout excluded)
    pub(crate) fn reset_run(&mut self) {
        self.score = 0;
        self.multiplier = MIN_MULTIPLIER;
        self.combo = 0;
        self.best_combo = 0;
        self.level = 1;
        self.lives = START_LIVES;
        self.flow = 0.0;
        self.game_speed = START_GAME_SPEED;
        self.time_ticks = 0;
        self.screen_flash = 0.0;
        self.player = Player::default();
        self.camera = Camera::default();
        self.particles.clear();
        self.events.clear();
    }
}
