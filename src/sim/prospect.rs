//! Prospect encounters
//!
//! `Dormant -> Approaching -> Satisfied`. A prospect is won by walking past it
//! with a running sequence that contains something it responds to plus the
//! closing technique.

use super::catalog::{Archetype, Technique};
use super::particles::{self, BurstKind, SATISFIED_COLOR};
use super::state::{GameEvent, GameState, ProspectState};
use crate::consts::*;

/// Horizontal distance at which a prospect notices the player
pub const APPROACH_DISTANCE: f32 = 220.0;
/// Horizontal distance at which the pitch is evaluated
pub const MATCH_DISTANCE: f32 = 60.0;

pub const CLOSE_BONUS_PER_TECHNIQUE: f32 = 90.0;
pub const CLOSE_FLOW_GAIN: f32 = 10.0;
pub const CLOSE_MULTIPLIER_GAIN: f32 = 1.0;
pub const CLOSE_FLASH: f32 = 0.25;

/// Does `sequence` close a prospect of this archetype?
pub fn sequence_satisfies(archetype: Archetype, sequence: &[Technique]) -> bool {
    !sequence.is_empty()
        && sequence.iter().any(|&t| archetype.accepts(t))
        && sequence.contains(&Technique::CLOSING)
}

/// Close bonus for a sequence of `len` techniques
#[inline]
pub fn close_bonus(multiplier: f32, len: usize) -> u64 {
    (CLOSE_BONUS_PER_TECHNIQUE * multiplier * len as f32).floor() as u64
}

/// Advance every prospect. Returns the number satisfied this tick.
pub fn update_prospects(state: &mut GameState) -> u32 {
    let player_x = state.player.pos.x;
    let mut satisfied = 0;

    for prospect in &mut state.prospects {
        if prospect.state == ProspectState::Satisfied {
            continue;
        }

        let dist = (player_x - prospect.pos.x).abs();
        if dist >= APPROACH_DISTANCE {
            continue;
        }
        if prospect.state == ProspectState::Dormant {
            prospect.state = ProspectState::Approaching;
            log::debug!("Approaching {:?} prospect {}", prospect.archetype, prospect.id);
        }

        if dist >= MATCH_DISTANCE || !sequence_satisfies(prospect.archetype, &state.sequence) {
            continue;
        }

        prospect.state = ProspectState::Satisfied;
        satisfied += 1;

        let bonus = close_bonus(state.multiplier, state.sequence.len());
        state.score += bonus;
        state.flow = (state.flow + CLOSE_FLOW_GAIN).min(MAX_FLOW);
        state.multiplier = (state.multiplier + CLOSE_MULTIPLIER_GAIN).min(MAX_MULTIPLIER);
        // The sequence is shared: every other prospect starts over too
        state.sequence.clear();
        state.screen_flash = CLOSE_FLASH;

        particles::burst(
            &mut state.particles,
            &mut state.rng,
            prospect.pos,
            SATISFIED_COLOR,
            BurstKind::Explosion,
        );
        state.events.push(GameEvent::ProspectSatisfied {
            archetype: prospect.archetype,
            bonus,
        });
        log::info!(
            "Closed {:?} prospect {} for {} points",
            prospect.archetype,
            prospect.id,
            bonus
        );
    }

    satisfied
}
