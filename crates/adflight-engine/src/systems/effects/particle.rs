//! A single confetti particle.

use glam::Vec2;
use serde::Serialize;

/// Confetti colors (linear RGB).
pub const CONFETTI_PALETTE: [[f32; 3]; 6] = [
    [0.96, 0.26, 0.21],
    [1.0, 0.76, 0.03],
    [0.30, 0.69, 0.31],
    [0.13, 0.59, 0.95],
    [0.61, 0.15, 0.69],
    [1.0, 0.60, 0.0],
];

/// Fraction of the lifetime over which a particle fades out.
const FADE_FRACTION: f32 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Tumble angle in radians.
    pub angle: f32,
    /// Tumble rate in radians per second.
    pub spin: f32,
    pub size: f32,
    pub color: [f32; 3],
    pub age: f32,
    pub lifetime: f32,
}

impl Particle {
    /// Advance physics. Returns false once the particle has expired.
    pub fn tick(&mut self, gravity: f32, dt: f32) -> bool {
        self.age += dt;
        if self.age >= self.lifetime {
            return false;
        }
        self.velocity.y += gravity * dt;
        self.position += self.velocity * dt;
        self.angle += self.spin * dt;
        true
    }

    /// Opacity: fully opaque, then a linear fade over the tail of the lifetime.
    pub fn alpha(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        let remaining = 1.0 - self.age / self.lifetime;
        (remaining / FADE_FRACTION).clamp(0.0, 1.0)
    }
}
