//! Flow meter and derived game speed
//!
//! Flow feeds speed and speed makes timing harder, so the loop is capped by
//! `Tuning::max_speed_mult`.

use super::state::GameState;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::clamp_finite;

/// Passive decay, range clamps and speed derivation for one tick
pub fn update_meter(state: &mut GameState, tuning: &Tuning) {
    state.flow = clamp_finite(state.flow - FLOW_DECAY, 0.0, MAX_FLOW);
    state.multiplier = clamp_finite(state.multiplier, MIN_MULTIPLIER, MAX_MULTIPLIER);
    state.game_speed = tuning.game_speed(state.flow);
}

/// Auto-forward distance per tick, taken straight from the current flow.
/// `state.game_speed` only drives the clocks, so the opening slow-down
/// never slows the run itself.
#[inline]
pub fn forward_speed(state: &GameState, tuning: &Tuning) -> f32 {
    tuning.base_speed * tuning.game_speed(state.flow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_decays_and_floors() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        state.flow = 10.0;
        update_meter(&mut state, &tuning);
        assert!((state.flow - 9.92).abs() < 1e-5);

        state.flow = 0.05;
        update_meter(&mut state, &tuning);
        assert_eq!(state.flow, 0.0);
    }

    #[test]
    fn test_speed_tracks_flow_with_cap() {
        let tuning = Tuning {
            flow_speed_influence: 0.01,
            max_speed_mult: 1.5,
            ..Tuning::default()
        };
        let mut state = GameState::new(1);
        state.flow = 20.08;
        update_meter(&mut state, &tuning);
        assert!((state.game_speed - 1.2).abs() < 1e-4);
        assert!((forward_speed(&state, &tuning) - 3.84).abs() < 1e-3);

        state.flow = 100.0;
        update_meter(&mut state, &tuning);
        assert_eq!(state.game_speed, 1.5);
    }

    #[test]
    fn test_first_tick_runs_at_base_speed() {
        let tuning = Tuning::default();
        let state = GameState::new(1);
        assert_eq!(state.game_speed, START_GAME_SPEED);
        assert_eq!(forward_speed(&state, &tuning), tuning.base_speed);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        state.flow = 250.0;
        state.multiplier = 0.2;
        update_meter(&mut state, &tuning);
        assert_eq!(state.flow, MAX_FLOW);
        assert_eq!(state.multiplier, MIN_MULTIPLIER);
    }
}
