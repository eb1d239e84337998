//! Confetti particle simulation.
//!
//! `ParticleField` owns the live particles and the RNG that seeds them; the
//! emitter decides how many to spawn, the field decides how they move.

mod particle;
mod rng;
mod texture;

pub use particle::{Particle, CONFETTI_PALETTE};
pub use rng::Rng;
pub use texture::{ParticleTexture, StarTexture, STAR_TEXTURE_SIZE};

use crate::components::emitter::EmitterComponent;

/// Upper bound on live particles; spawns beyond it are dropped.
pub const MAX_PARTICLES: usize = 1024;

#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    rng: Rng,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(256),
            rng: Rng::new(seed),
        }
    }

    /// Spawn `count` particles at the emitter position, spraying upward.
    pub fn spawn(&mut self, emitter: &EmitterComponent, count: usize) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            // Upper half-plane in Y-down coordinates, widened a little past horizontal.
            let angle = self.rng.range(-std::f32::consts::PI - 0.3, 0.3);
            let speed = self.rng.range(emitter.speed_range.0, emitter.speed_range.1);
            let color = self.rng.pick(&CONFETTI_PALETTE).copied().unwrap_or(CONFETTI_PALETTE[0]);
            let spin = self.rng.range(-8.0, 8.0);
            self.particles.push(Particle {
                position: emitter.position,
                velocity: glam::Vec2::from_angle(angle) * speed,
                angle: 0.0,
                spin,
                size: emitter.size,
                color,
                age: 0.0,
                lifetime: emitter.lifetime,
            });
        }
    }

    /// Advance every particle and drop expired ones.
    pub fn tick(&mut self, gravity: f32, dt: f32) {
        self.particles.retain_mut(|p| p.tick(gravity, dt));
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
