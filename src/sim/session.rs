//! Session lifecycle: menu, playing, game over
//!
//! Commands come from the UI; the transition to `GameOver` and level
//! progression are driven by the tick.

use serde::{Deserialize, Serialize};

use super::level::generate_level;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Commands accepted from outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Menu -> Playing (also accepted on the game-over screen)
    Start,
    /// GameOver -> Playing
    Retry,
    /// GameOver or Playing -> Menu
    ExitToMenu,
}

/// Apply a session command. Returns false when the command does not apply
/// to the current phase (the state is left untouched).
pub fn apply_command(state: &mut GameState, command: SessionCommand) -> bool {
    let next = match (state.phase, command) {
        (GamePhase::Menu | GamePhase::GameOver, SessionCommand::Start)
        | (GamePhase::GameOver, SessionCommand::Retry) => GamePhase::Playing,
        (GamePhase::GameOver | GamePhase::Playing, SessionCommand::ExitToMenu) => GamePhase::Menu,
        (phase, command) => {
            log::debug!("Ignoring {:?} in {:?}", command, phase);
            return false;
        }
    };

    log::info!("Session {:?} -> {:?}", state.phase, next);
    if next == GamePhase::Playing {
        start_run(state);
    }
    state.phase = next;
    true
}

/// Reset the run and lay out level 1
pub fn start_run(state: &mut GameState) {
    state.reset_run();
    load_level(state, 1);
}

/// Generate `level` starting at the player's current position.
/// Also restarts the clocks and clears the running sequence.
pub fn load_level(state: &mut GameState, level: u32) {
    let origin_x = state.player.pos.x;
    let layout = generate_level(level, origin_x, &mut state.rng);
    log::info!(
        "Level {}: {} obstacles, {} collectibles, {} prospects from x={:.0}",
        level,
        layout.obstacles.len(),
        layout.collectibles.len(),
        layout.prospects.len(),
        origin_x
    );

    state.level = level;
    state.level_origin_x = origin_x;
    state.obstacles = layout.obstacles;
    state.collectibles = layout.collectibles;
    state.prospects = layout.prospects;
    state.time = 0.0;
    state.beat_time = 0.0;
    state.sequence.clear();
}

/// Distance past the level origin at which `level` is complete
pub fn level_length(level: u32) -> f32 {
    LEVEL_BASE_DISTANCE + level as f32 * LEVEL_DISTANCE_PER_LEVEL
}

/// World x the player must pass to finish the current level. Level 1,
/// generated at the spawn point, ends at x = `level_length(1)`.
pub fn level_end_x(state: &GameState) -> f32 {
    state.level_origin_x - PLAYER_START_X + level_length(state.level)
}

/// Enter `GameOver` if the last life is gone. Returns true on transition.
pub fn check_game_over(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.lives > 0 {
        return false;
    }
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {}, level {}, best combo {}",
        state.score,
        state.level,
        state.best_combo
    );
    true
}

/// Advance to the next level once the player runs past the end of this one
pub fn check_level_progress(state: &mut GameState) -> bool {
    if state.player.pos.x <= level_end_x(state) {
        return false;
    }
    let next = state.level + 1;
    load_level(state, next);
    state.events.push(GameEvent::LevelAdvanced { level: next });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Technique;

    #[test]
    fn test_start_resets_everything() {
        let mut state = GameState::new(77);
        state.score = 999;
        state.multiplier = 5.0;
        state.combo = 12;
        state.level = 4;
        state.lives = 1;
        state.flow = 80.0;
        state.sequence.push(Technique::Hard);
        state.player.pos.x = 9000.0;

        assert!(apply_command(&mut state, SessionCommand::Start));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.multiplier, 1.0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.flow, 0.0);
        assert_eq!(state.game_speed, START_GAME_SPEED);
        assert!(state.sequence.is_empty());
        assert_eq!(state.player.pos.x, PLAYER_START_X);
        assert_eq!(state.obstacles.len(), 48);
        assert_eq!(state.prospects[0].pos.x, 900.0);
    }

    #[test]
    fn test_invalid_commands_ignored() {
        let mut state = GameState::new(1);
        assert!(!apply_command(&mut state, SessionCommand::Retry));
        assert!(!apply_command(&mut state, SessionCommand::ExitToMenu));
        assert_eq!(state.phase, GamePhase::Menu);

        apply_command(&mut state, SessionCommand::Start);
        assert!(!apply_command(&mut state, SessionCommand::Start));
        assert!(!apply_command(&mut state, SessionCommand::Retry));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_then_retry_or_exit() {
        let mut state = GameState::new(1);
        apply_command(&mut state, SessionCommand::Start);
        state.lives = 0;
        state.score = 1234;
        assert!(check_game_over(&mut state));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events, vec![GameEvent::GameOver { score: 1234 }]);
        // Only fires once
        assert!(!check_game_over(&mut state));

        assert!(apply_command(&mut state, SessionCommand::Retry));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);

        state.lives = 0;
        check_game_over(&mut state);
        assert!(apply_command(&mut state, SessionCommand::ExitToMenu));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_level_progress_regenerates_ahead_of_player() {
        let mut state = GameState::new(3);
        apply_command(&mut state, SessionCommand::Start);
        state.sequence.push(Technique::Soft);
        state.beat_time = 12.0;

        state.player.pos.x = level_length(1);
        assert_eq!(state.player.pos.x, 2700.0);
        assert!(!check_level_progress(&mut state));

        state.player.pos.x = 2750.0;
        let x = state.player.pos.x;
        assert!(check_level_progress(&mut state));
        assert_eq!(state.level, 2);
        assert_eq!(state.level_origin_x, x);
        // Level 2 is measured from where it was generated
        assert_eq!(level_end_x(&state), x - PLAYER_START_X + 3600.0);
        assert_eq!(state.obstacles.len(), 56);
        assert!(state.prospects.iter().all(|p| p.pos.x > x));
        assert!(state.sequence.is_empty());
        assert_eq!(state.beat_time, 0.0);
        assert_eq!(state.events, vec![GameEvent::LevelAdvanced { level: 2 }]);
    }
}
