//! Per-frame simulation tick
//!
//! Core game loop that advances simulation deterministically. One call per
//! rendered frame while playing.

use super::collect::collect;
use super::collision::resolve_hazards;
use super::meter::{forward_speed, update_meter};
use super::physics::{can_jump, step_player, update_camera};
use super::prospect::update_prospects;
use super::session::{check_game_over, check_level_progress};
use super::state::{GameEvent, GamePhase, GameState};
use super::particles;
use crate::consts::*;
use crate::tuning::Tuning;

/// Normalized control signal for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump held/pressed this frame
    pub jump: bool,
    /// Idle/demo mode - the game steers itself
    pub idle_mode: bool,
}

/// Advance the game state by one frame.
///
/// Does nothing outside `Playing`. Order: clocks, player, camera, hazards
/// (game over is decided right here), collectibles, prospects, particles,
/// meter, level progress.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let autopilot;
    let input = if input.idle_mode {
        autopilot = autopilot_input(state);
        &autopilot
    } else {
        input
    };

    state.time_ticks += 1;
    let step = FRAME_DT * state.game_speed;
    state.time += step;
    state.beat_time += step * BEAT_RATE;

    let speed = forward_speed(state, tuning);
    if step_player(&mut state.player, input, speed, state.beat_time, tuning) {
        state.events.push(GameEvent::Jump);
    }
    update_camera(&mut state.camera, state.player.pos.x, &mut state.rng);

    state.screen_flash *= FLASH_DECAY;
    if state.screen_flash < 0.01 {
        state.screen_flash = 0.0;
    }

    resolve_hazards(state);
    if check_game_over(state) {
        return;
    }

    collect(state);
    update_prospects(state);
    particles::update(&mut state.particles);
    update_meter(state, tuning);
    check_level_progress(state);
}

/// How far ahead the autopilot looks for hazards
const AUTOPILOT_LOOKAHEAD: f32 = 90.0;
/// How far ahead the autopilot chases collectibles
const AUTOPILOT_CHASE: f32 = 200.0;

/// Demo-mode steering: hop over hazards, drift toward the next token
fn autopilot_input(state: &GameState) -> TickInput {
    let player = &state.player;
    let body = player.rect();
    let mut input = TickInput::default();

    let danger_ahead = state.obstacles.iter().any(|ob| {
        let hitbox = ob.hitbox(state.beat_time);
        let dx = hitbox.pos.x - (body.pos.x + body.size.x);
        dx > -body.size.x
            && dx < AUTOPILOT_LOOKAHEAD
            && hitbox.pos.y < body.pos.y + body.size.y + 10.0
            && hitbox.pos.y + hitbox.size.y > body.pos.y - 40.0
    });
    if danger_ahead {
        input.jump = can_jump(player);
        return input;
    }

    let target = state
        .collectibles
        .iter()
        .filter(|c| !c.collected)
        .filter(|c| c.pos.x > body.pos.x - 20.0 && c.pos.x < body.pos.x + AUTOPILOT_CHASE)
        .min_by(|a, b| {
            let da = a.pos.distance_squared(body.center());
            let db = b.pos.distance_squared(body.center());
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(item) = target {
        let center = body.center();
        if item.pos.y < center.y - 30.0 && player.grounded {
            input.jump = true;
        }
        if item.pos.x > center.x + 40.0 {
            input.move_right = true;
        } else if item.pos.x < center.x - 10.0 {
            input.move_left = true;
        }
    }

    input
}
