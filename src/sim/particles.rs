//! Particle bursts
//!
//! Purely cosmetic, but spread is drawn from the game RNG so replays stay
//! bit-identical.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;

pub const HAZARD_COLOR: u32 = 0xFF4444;
pub const SATISFIED_COLOR: u32 = 0x44FF44;

/// Gravity applied to particles each tick
const PARTICLE_GRAVITY: f32 = 0.18;
/// Life lost per tick
const PARTICLE_FADE: f32 = 0.02;

/// Hard cap in the sim; presets trim further when presenting
pub const MAX_PARTICLES: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    /// Small puff for a collection
    Success,
    /// Big burst for hazards and closes
    Explosion,
}

impl BurstKind {
    pub fn count(self) -> usize {
        match self {
            BurstKind::Success => 6,
            BurstKind::Explosion => 14,
        }
    }
}

/// Spawn a burst at `origin`
pub fn burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    color: u32,
    kind: BurstKind,
) {
    for _ in 0..kind.count() {
        if particles.len() >= MAX_PARTICLES {
            break;
        }
        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 20.0;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 6.0,
            (rng.random::<f32>() - 0.5) * 6.0 - 2.0,
        );
        particles.push(Particle {
            pos: origin + jitter,
            vel,
            color,
            life: 1.0,
            size: rng.random::<f32>() * 3.0 + 2.0,
        });
    }
}

/// Move, fade and cull in one pass
pub fn update(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= PARTICLE_FADE;
        p.life > 0.0
    });
}
