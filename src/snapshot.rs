//! Read-only presentation snapshot
//!
//! Copied out of `GameState` after every tick and handed to the renderer.
//! Presentation preferences are applied here so the simulation never sees them.

use glam::Vec2;
use serde::Serialize;

use crate::Rect;
use crate::settings::Settings;
use crate::sim::{
    Archetype, GamePhase, GameState, Particle, ProspectState, Technique, TrailPoint,
};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    /// Degrees, rises with flow
    pub hue: f32,
    pub grounded: bool,
    pub trail: Vec<TrailPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub rect: Rect,
    /// Extra margin the hazard pulses out by this beat
    pub margin: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectibleView {
    pub pos: Vec2,
    pub technique: Technique,
    pub color: u32,
    pub glow: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProspectView {
    pub rect: Rect,
    pub archetype: Archetype,
    pub state: ProspectState,
    /// Tempo-synced pulse while approaching, 1.0 otherwise
    pub pulse: f32,
}

/// Everything the renderer may draw for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub player: PlayerView,
    /// World x of the viewport's left edge
    pub camera_x: f32,
    /// Shake offset to add on top of the camera (zero when shake is disabled)
    pub shake_offset: Vec2,
    pub obstacles: Vec<ObstacleView>,
    pub collectibles: Vec<CollectibleView>,
    pub prospects: Vec<ProspectView>,
    pub particles: Vec<Particle>,
    pub screen_flash: f32,
    pub flow: f32,
    pub score: u64,
    pub combo: u32,
    pub best_combo: u32,
    pub multiplier: f32,
    pub level: u32,
    pub lives: u8,
    pub sequence: Vec<Technique>,
}

/// Player hue in degrees for a flow value
pub fn player_hue(flow: f32) -> f32 {
    180.0 + flow * 1.8
}

/// Collectible glow for the current beat
pub fn collectible_glow(beat_time: f32, pulse_phase: f32) -> f32 {
    (beat_time * 2.0 + pulse_phase).sin() * 0.3 + 0.7
}

/// Prospect pulse at its archetype tempo
pub fn tempo_pulse(beat_time: f32, tempo: u32) -> f32 {
    (beat_time * tempo as f32 / 30.0).sin() * 0.3 + 0.7
}

impl Snapshot {
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let beat = state.beat_time;
        let player = &state.player;

        let trail_len = settings.trail_samples(player.trail.len());
        let trail = player.trail[player.trail.len() - trail_len..].to_vec();

        let obstacles = state
            .obstacles
            .iter()
            .map(|ob| ObstacleView {
                rect: ob.rect,
                margin: ob.pulse_margin(beat),
            })
            .collect();

        let collectibles = state
            .collectibles
            .iter()
            .filter(|c| !c.collected)
            .map(|c| CollectibleView {
                pos: c.pos,
                technique: c.technique,
                color: c.technique.info().color,
                glow: collectible_glow(beat, c.pulse_phase),
            })
            .collect();

        let prospects = state
            .prospects
            .iter()
            .map(|p| ProspectView {
                rect: p.rect(),
                archetype: p.archetype,
                state: p.state,
                pulse: match p.state {
                    ProspectState::Approaching => tempo_pulse(beat, p.archetype.rhythm().tempo),
                    _ => 1.0,
                },
            })
            .collect();

        // Newest particles win when capped
        let cap = settings.max_particles();
        let skip = state.particles.len().saturating_sub(cap);
        let particles = state.particles[skip..].to_vec();

        Self {
            phase: state.phase,
            tick: state.time_ticks,
            player: PlayerView {
                rect: player.rect(),
                hue: player_hue(state.flow),
                grounded: player.grounded,
                trail,
            },
            camera_x: state.camera.x,
            shake_offset: if settings.screen_shake {
                state.camera.jitter
            } else {
                Vec2::ZERO
            },
            obstacles,
            collectibles,
            prospects,
            particles,
            screen_flash: if settings.screen_flash {
                state.screen_flash
            } else {
                0.0
            },
            flow: state.flow,
            score: state.score,
            combo: state.combo,
            best_combo: state.best_combo,
            multiplier: state.multiplier,
            level: state.level,
            lives: state.lives,
            sequence: state.sequence.clone(),
        }
    }
}
