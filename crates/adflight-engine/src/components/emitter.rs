use glam::Vec2;

use crate::api::config::CelebrationConfig;

/// The single shared confetti emitter.
///
/// Spawning is driven purely by `birth_rate`; lifecycle sequencing (burst,
/// drain, reset) lives in `systems::celebration`.
#[derive(Debug, Clone)]
pub struct EmitterComponent {
    /// Emission origin in scene coordinates.
    pub position: Vec2,
    /// Hidden emitters neither spawn nor render.
    pub visible: bool,
    /// Particles per second. 0 when idle or draining.
    pub birth_rate: f32,
    /// Min/max initial speed magnitude.
    pub speed_range: (f32, f32),
    /// Particle lifetime in seconds.
    pub lifetime: f32,
    /// Particle visual size.
    pub size: f32,
    /// Downward acceleration applied to each particle.
    pub gravity: f32,
    /// Fractional particles carried between ticks.
    accumulator: f32,
    /// Seconds simulated since the last reset.
    sim_time: f32,
}

impl Default for EmitterComponent {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            visible: false,
            birth_rate: 0.0,
            speed_range: (80.0, 260.0),
            lifetime: 2.0,
            size: 6.0,
            gravity: 320.0,
            accumulator: 0.0,
            sim_time: 0.0,
        }
    }
}

impl EmitterComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hidden, idle emitter from the celebration config.
    pub fn from_config(config: &CelebrationConfig) -> Self {
        Self::new()
            .with_speed_range(config.speed_range.0, config.speed_range.1)
            .with_lifetime(config.particle_lifetime)
            .with_size(config.particle_size)
            .with_gravity(config.gravity)
    }

    // -- Builder pattern --

    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_range = (min, max);
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Whether new particles are being spawned.
    pub fn is_emitting(&self) -> bool {
        self.visible && self.birth_rate > 0.0
    }

    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    /// Advance the emitter by `dt` seconds. Returns the number of particles to spawn.
    pub fn tick(&mut self, dt: f32) -> usize {
        if !self.visible {
            return 0;
        }
        self.sim_time += dt;
        if self.birth_rate <= 0.0 {
            self.accumulator = 0.0;
            return 0;
        }
        self.accumulator += self.birth_rate * dt;
        let count = self.accumulator as usize;
        self.accumulator -= count as f32;
        count
    }

    /// Rewind the simulation clock so the next burst starts clean.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.sim_time = 0.0;
        self.birth_rate = 0.0;
    }
}
