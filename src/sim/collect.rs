//! Collectible magnetism, pickup and beat-accuracy scoring

use super::particles::{self, BurstKind};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Collectibles inside this radius start drifting toward the player
pub const MAGNET_RADIUS: f32 = 90.0;
/// Magnetism gained per tick inside the radius
pub const MAGNET_RATE: f32 = 0.12;
/// Fraction of the gap closed per tick at full magnetism
pub const MAGNET_PULL: f32 = 0.08;
/// Pickup radius
pub const PICKUP_RADIUS: f32 = 28.0;

/// Base points per pickup before multiplier and accuracy
pub const PICKUP_POINTS: f32 = 8.0;
/// Accuracy above which the multiplier grows
pub const ACCURATE_THRESHOLD: f32 = 0.8;
pub const MULTIPLIER_STEP: f32 = 0.15;

/// How close to the middle of the beat an event landed: 1.0 exactly mid-beat,
/// 0.0 on a beat boundary
#[inline]
pub fn beat_accuracy(beat_time: f32) -> f32 {
    let phase = beat_time.rem_euclid(1.0);
    (1.0 - ((phase - 0.5) * 2.0).abs()).clamp(0.0, 1.0)
}

/// Points awarded for a pickup
#[inline]
pub fn pickup_points(multiplier: f32, accuracy: f32) -> u64 {
    (PICKUP_POINTS * multiplier * (1.0 + accuracy)).floor() as u64
}

/// Pull nearby collectibles in and pick up the ones in reach.
/// Returns the number collected this tick.
pub fn collect(state: &mut GameState) -> u32 {
    let player_pos = state.player.pos;
    let mut collected = 0;

    for item in state.collectibles.iter_mut().filter(|c| !c.collected) {
        let to_player = player_pos - item.pos;
        let dist = to_player.length();

        if dist < MAGNET_RADIUS {
            item.magnetism = (item.magnetism + MAGNET_RATE).min(1.0);
            item.pos += to_player * item.magnetism * MAGNET_PULL;
        }

        if dist >= PICKUP_RADIUS {
            continue;
        }

        item.collected = true;
        collected += 1;
        state.sequence.push(item.technique);

        let accuracy = beat_accuracy(state.beat_time);
        state.score += pickup_points(state.multiplier, accuracy);
        state.combo += 1;
        state.best_combo = state.best_combo.max(state.combo);
        state.flow = (state.flow + 1.0 + accuracy * 2.0).min(MAX_FLOW);
        if accuracy > ACCURATE_THRESHOLD {
            state.multiplier = (state.multiplier + MULTIPLIER_STEP).min(MAX_MULTIPLIER);
        }

        let info = item.technique.info();
        particles::burst(
            &mut state.particles,
            &mut state.rng,
            item.pos,
            info.color,
            BurstKind::Success,
        );
        state.events.push(GameEvent::Collect {
            technique: item.technique,
            combo: state.combo,
        });
        log::debug!(
            "Collected {} (accuracy {:.2}, combo {})",
            item.technique.as_str(),
            accuracy,
            state.combo
        );
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Technique;
    use crate::sim::state::Collectible;
    use glam::Vec2;

    fn item(id: u32, pos: Vec2, technique: Technique) -> Collectible {
        Collectible {
            id,
            pos,
            technique,
            collected: false,
            magnetism: 0.0,
            pulse_phase: 0.0,
        }
    }

    #[test]
    fn test_beat_accuracy_shape() {
        assert_eq!(beat_accuracy(0.5), 1.0);
        assert_eq!(beat_accuracy(3.5), 1.0);
        assert_eq!(beat_accuracy(0.0), 0.0);
        assert_eq!(beat_accuracy(2.0), 0.0);
        assert!((beat_accuracy(0.25) - 0.5).abs() < 1e-6);
        assert!((beat_accuracy(0.75) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mid_beat_pickup_doubles_points() {
        let mut state = GameState::new(1);
        state.beat_time = 4.5;
        state.multiplier = 2.0;
        state.collectibles.push(item(1, state.player.pos, Technique::Logic));

        assert_eq!(collect(&mut state), 1);
        assert_eq!(state.score, 32); // floor(8 * 2 * 2)
        assert_eq!(state.combo, 1);
        assert_eq!(state.flow, 3.0);
        assert!((state.multiplier - 2.15).abs() < 1e-6);
        assert_eq!(state.sequence, vec![Technique::Logic]);
        assert!(state.collectibles[0].collected);
        assert_eq!(
            state.events,
            vec![GameEvent::Collect {
                technique: Technique::Logic,
                combo: 1
            }]
        );
    }

    #[test]
    fn test_off_beat_pickup_keeps_multiplier() {
        let mut state = GameState::new(1);
        state.beat_time = 1.0;
        state.multiplier = 3.0;
        state.collectibles.push(item(1, state.player.pos, Technique::Soft));
        collect(&mut state);
        assert_eq!(state.score, 24);
        assert_eq!(state.multiplier, 3.0);
        assert_eq!(state.flow, 1.0);
    }

    #[test]
    fn test_multiplier_and_flow_clamped() {
        let mut state = GameState::new(1);
        state.beat_time = 0.5;
        state.multiplier = 7.95;
        state.flow = 99.5;
        state.collectibles.push(item(1, state.player.pos, Technique::Hard));
        collect(&mut state);
        assert_eq!(state.multiplier, MAX_MULTIPLIER);
        assert_eq!(state.flow, MAX_FLOW);
    }

    #[test]
    fn test_magnetism_pulls_without_collecting() {
        let mut state = GameState::new(1);
        let start = state.player.pos + Vec2::new(60.0, 0.0);
        state.collectibles.push(item(1, start, Technique::Walk));

        collect(&mut state);
        let c = &state.collectibles[0];
        assert!(!c.collected);
        assert!((c.magnetism - MAGNET_RATE).abs() < 1e-6);
        // 60 * 0.12 * 0.08 pulled toward the player
        assert!((c.pos.x - (start.x - 0.576)).abs() < 1e-3);

        for _ in 0..20 {
            collect(&mut state);
        }
        assert_eq!(state.collectibles[0].magnetism, 1.0);
    }

    #[test]
    fn test_far_items_untouched() {
        let mut state = GameState::new(1);
        let start = state.player.pos + Vec2::new(200.0, 0.0);
        state.collectibles.push(item(1, start, Technique::Walk));
        collect(&mut state);
        assert_eq!(state.collectibles[0].pos, start);
        assert_eq!(state.collectibles[0].magnetism, 0.0);
    }

    #[test]
    fn test_collected_items_skipped() {
        let mut state = GameState::new(1);
        let mut done = item(1, state.player.pos, Technique::Close);
        done.collected = true;
        state.collectibles.push(done);
        assert_eq!(collect(&mut state), 0);
        assert!(state.sequence.is_empty());
    }
}
