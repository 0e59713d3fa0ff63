//! Player kinematics and camera follow
//!
//! Velocities are per tick, not per second: the game advances one step per
//! rendered frame.

use glam::Vec2;
use rand::Rng;

use super::state::{Camera, Player};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Jump strength multiplier from the beat: 0.75..=1.25, peaking on the beat crest
#[inline]
pub fn rhythm_bonus(beat_time: f32) -> f32 {
    (beat_time * 4.0).sin() * 0.25 + 1.0
}

/// Whether the player may jump right now (grounded, or not rising fast)
#[inline]
pub fn can_jump(player: &Player) -> bool {
    player.grounded || player.vel.y > JUMP_VY_THRESHOLD
}

/// Advance the player one tick. Returns true if a jump was taken.
pub fn step_player(
    player: &mut Player,
    input: &TickInput,
    forward_speed: f32,
    beat_time: f32,
    tuning: &Tuning,
) -> bool {
    // Lateral control
    if input.move_left {
        player.vel.x = -STRAFE_SPEED;
    } else if input.move_right {
        player.vel.x = STRAFE_SPEED;
    } else {
        player.vel.x *= STRAFE_DECAY;
    }

    let jumped = input.jump && can_jump(player);
    if jumped {
        player.vel.y = tuning.jump_force * rhythm_bonus(beat_time);
    }

    player.vel.y = (player.vel.y + tuning.gravity).min(TERMINAL_VELOCITY);

    // Auto-forward never runs backwards, even when strafing against it
    player.pos.x += (forward_speed + player.vel.x).max(0.0);
    player.pos.y += player.vel.y;

    if player.pos.y > GROUND_Y {
        player.pos.y = GROUND_Y;
        player.vel.y = 0.0;
        player.grounded = true;
    } else {
        player.grounded = false;
    }

    player.record_trail();
    jumped
}

/// Follow the player and sample this tick's shake jitter
pub fn update_camera<R: Rng + ?Sized>(camera: &mut Camera, player_x: f32, rng: &mut R) {
    camera.x = player_x - DESIGN_WIDTH * CAMERA_LEAD;
    camera.shake *= SHAKE_DECAY;
    if camera.shake < 0.01 {
        camera.shake = 0.0;
    }
    camera.jitter = if camera.shake > 0.0 {
        Vec2::new(
            (rng.random::<f32>() - 0.5) * camera.shake,
            (rng.random::<f32>() - 0.5) * camera.shake,
        )
    } else {
        Vec2::ZERO
    };
}
