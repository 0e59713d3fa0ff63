//! Hazard detection and penalties
//!
//! Obstacles pulse with the beat: the hitbox grows and shrinks around the
//! drawn box, so the same gap can be safe on one beat and deadly on the next.

use super::particles::{self, BurstKind, HAZARD_COLOR};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Penalty flow lost per hit
pub const HAZARD_FLOW_PENALTY: f32 = 10.0;
/// Screen flash strength on a hit
pub const HAZARD_FLASH: f32 = 0.4;

/// Check the player against every obstacle and apply penalties.
///
/// Every overlapping obstacle applies its own penalty, so touching two at
/// once costs two lives. Returns the number of hits this tick.
pub fn resolve_hazards(state: &mut GameState) -> u32 {
    let mut hits = 0;

    for obstacle in &state.obstacles {
        if !obstacle.dangerous {
            continue;
        }
        let hitbox = obstacle.hitbox(state.beat_time);
        if !state.player.rect().overlaps(&hitbox) {
            continue;
        }

        hits += 1;
        state.lives = state.lives.saturating_sub(1);
        state.flow = (state.flow - HAZARD_FLOW_PENALTY).max(0.0);
        state.multiplier = MIN_MULTIPLIER;
        state.combo = 0;
        state.sequence.clear();
        state.camera.shake = HAZARD_SHAKE;
        state.screen_flash = HAZARD_FLASH;

        particles::burst(
            &mut state.particles,
            &mut state.rng,
            state.player.pos,
            HAZARD_COLOR,
            BurstKind::Explosion,
        );
        state.events.push(GameEvent::HazardHit {
            lives_left: state.lives,
        });

        // Knockback
        state.player.pos.y = KNOCKBACK_Y;
        state.player.vel.y = 0.0;

        log::debug!(
            "Hazard {} hit at x={:.0}, lives left {}",
            obstacle.id,
            state.player.pos.x,
            state.lives
        );
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::sim::catalog::Technique;
    use crate::sim::state::Obstacle;
    use glam::Vec2;

    fn obstacle_at(id: u32, x: f32, y: f32) -> Obstacle {
        Obstacle {
            id,
            rect: Rect::new(Vec2::new(x, y), Vec2::new(20.0, 50.0)),
            phase: 0.0,
            dangerous: true,
        }
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(11);
        state.player.pos = Vec2::new(1000.0, 400.0);
        state
    }

    #[test]
    fn test_hit_resets_multiplier_and_combo() {
        let mut state = playing_state();
        state.multiplier = 6.35;
        state.combo = 41;
        state.flow = 55.0;
        state.sequence = vec![Technique::Soft, Technique::Close];
        state.obstacles.push(obstacle_at(1, 1010.0, 400.0));

        assert_eq!(resolve_hazards(&mut state), 1);
        assert_eq!(state.multiplier, 1.0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.flow, 45.0);
        assert!(state.sequence.is_empty());
        assert_eq!(state.camera.shake, HAZARD_SHAKE);
        assert_eq!(state.player.pos.y, KNOCKBACK_Y);
        assert_eq!(state.particles.len(), BurstKind::Explosion.count());
        assert_eq!(
            state.events,
            vec![GameEvent::HazardHit {
                lives_left: START_LIVES - 1
            }]
        );
    }

    #[test]
    fn test_flow_penalty_floors_at_zero() {
        let mut state = playing_state();
        state.flow = 4.0;
        state.obstacles.push(obstacle_at(1, 1010.0, 400.0));
        resolve_hazards(&mut state);
        assert_eq!(state.flow, 0.0);
    }

    #[test]
    fn test_pulse_margin_extends_reach() {
        let mut state = playing_state();
        // Player spans x 1000..1025; obstacle starts 3 units past that
        state.obstacles.push(obstacle_at(1, 1028.0, 400.0));

        // Margin 1 at beat 0: clear
        state.beat_time = 0.0;
        assert_eq!(resolve_hazards(&mut state), 0);

        // Margin 6 at the pulse crest: hit
        state.beat_time = std::f32::consts::FRAC_PI_2 / 3.0;
        assert_eq!(resolve_hazards(&mut state), 1);
    }

    #[test]
    fn test_overlapping_obstacles_stack_penalties() {
        let mut state = playing_state();
        // Two obstacles covering both the current spot and the knockback spot
        state.obstacles.push(obstacle_at(1, 1010.0, 400.0));
        state.obstacles.push(obstacle_at(2, 1010.0, 310.0));
        assert_eq!(resolve_hazards(&mut state), 2);
        assert_eq!(state.lives, START_LIVES - 2);
        assert_eq!(state.events.len(), 2);
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut state = playing_state();
        state.lives = 1;
        state.obstacles.push(obstacle_at(1, 1010.0, 400.0));
        state.obstacles.push(obstacle_at(2, 1010.0, 310.0));
        resolve_hazards(&mut state);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_harmless_obstacle_ignored() {
        let mut state = playing_state();
        let mut obstacle = obstacle_at(1, 1010.0, 400.0);
        obstacle.dangerous = false;
        state.obstacles.push(obstacle);
        assert_eq!(resolve_hazards(&mut state), 0);
        assert_eq!(state.lives, START_LIVES);
    }
}
