//! One-shot confetti celebration on a single reusable emitter.
//!
//! Lifecycle: `Idle -> BurstActive -> Draining -> Idle`.
//! - trigger: move the emitter, show it, spawn at the burst rate
//! - after `burst_duration`: stop spawning, let live particles finish
//! - after `drain_duration` more: hide, drop particles, rewind the emitter
//!
//! A trigger at any point restarts the sequence from `BurstActive`; the old
//! stage timer is cancelled first, so bursts never stack.

use glam::Vec2;
use serde::Serialize;

use crate::api::config::CelebrationConfig;
use crate::components::emitter::EmitterComponent;
use crate::core::timeline::{Timeline, TimerId};
use crate::systems::effects::{Particle, ParticleField, ParticleTexture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CelebrationPhase {
    #[default]
    Idle,
    BurstActive,
    Draining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    BurstEnd,
    DrainEnd,
}

pub struct Celebration {
    phase: CelebrationPhase,
    emitter: EmitterComponent,
    field: ParticleField,
    timeline: Timeline<Stage>,
    pending: Option<TimerId>,
    burst_birth_rate: f32,
    burst_duration: f32,
    drain_duration: f32,
    texture: ParticleTexture,
}

impl Celebration {
    pub fn new(config: &CelebrationConfig, texture: ParticleTexture) -> Self {
        Self {
            phase: CelebrationPhase::Idle,
            emitter: EmitterComponent::from_config(config),
            field: ParticleField::new(config.seed),
            timeline: Timeline::new(),
            pending: None,
            burst_birth_rate: config.burst_birth_rate,
            burst_duration: config.burst_duration,
            drain_duration: config.drain_duration,
            texture,
        }
    }

    /// Start (or restart) a burst at `at`.
    pub fn trigger(&mut self, at: Vec2) {
        if let Some(id) = self.pending.take() {
            self.timeline.cancel(id);
        }
        if self.phase != CelebrationPhase::Idle {
            log::debug!("celebration restarted from {:?}", self.phase);
        }
        self.emitter.position = at;
        self.emitter.visible = true;
        self.emitter.birth_rate = self.burst_birth_rate;
        self.phase = CelebrationPhase::BurstActive;
        self.pending = Some(self.timeline.schedule(self.burst_duration, Stage::BurstEnd));
    }

    /// Advance spawning, particle motion and stage timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let count = self.emitter.tick(dt);
        if count > 0 {
            self.field.spawn(&self.emitter, count);
        }
        self.field.tick(self.emitter.gravity, dt);

        for stage in self.timeline.tick(dt) {
            match stage {
                Stage::BurstEnd => {
                    self.emitter.birth_rate = 0.0;
                    self.phase = CelebrationPhase::Draining;
                    self.pending = Some(self.timeline.schedule(self.drain_duration, Stage::DrainEnd));
                    log::debug!("celebration draining ({} particles live)", self.field.len());
                }
                Stage::DrainEnd => {
                    self.pending = None;
                    self.reset();
                    log::debug!("celebration finished");
                }
            }
        }
    }

    /// Halt immediately: cancel timers, hide and rewind. No stage fires afterwards.
    pub fn cancel(&mut self) {
        self.timeline.clear();
        self.pending = None;
        self.reset();
    }

    fn reset(&mut self) {
        self.emitter.visible = false;
        self.emitter.reset();
        self.field.clear();
        self.phase = CelebrationPhase::Idle;
    }

    pub fn phase(&self) -> CelebrationPhase {
        self.phase
    }

    pub fn birth_rate(&self) -> f32 {
        self.emitter.birth_rate
    }

    pub fn is_visible(&self) -> bool {
        self.emitter.visible
    }

    pub fn position(&self) -> Vec2 {
        self.emitter.position
    }

    pub fn particles(&self) -> &[Particle] {
        &self.field.particles
    }

    pub fn texture(&self) -> &ParticleTexture {
        &self.texture
    }

    /// Swap the confetti texture, e.g. after a new asset manifest is loaded.
    pub fn set_texture(&mut self, texture: ParticleTexture) {
        self.texture = texture;
    }

    /// Stage timers still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.timeline.len()
    }

    /// Seconds simulated since the emitter was last rewound.
    pub fn sim_time(&self) -> f32 {
        self.emitter.sim_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::SpriteRegistry;

    fn config() -> CelebrationConfig {
        CelebrationConfig {
            burst_birth_rate: 100.0,
            burst_duration: 0.5,
            drain_duration: 1.0,
            particle_lifetime: 0.75,
            ..Default::default()
        }
    }

    fn celebration() -> Celebration {
        let texture = ParticleTexture::resolve(&SpriteRegistry::new(), "confetti");
        Celebration::new(&config(), texture)
    }

    fn run(c: &mut Celebration, seconds: f32) {
        let steps = (seconds / 0.05).round() as usize;
        for _ in 0..steps {
            c.tick(0.05);
        }
    }

    #[test]
    fn idle_until_triggered() {
        let mut c = celebration();
        run(&mut c, 1.0);
        assert_eq!(c.phase(), CelebrationPhase::Idle);
        assert!(!c.is_visible());
        assert!(c.particles().is_empty());
    }

    #[test]
    fn burst_then_drain_then_idle() {
        let mut c = celebration();
        c.trigger(Vec2::new(50.0, 60.0));
        assert_eq!(c.phase(), CelebrationPhase::BurstActive);
        assert_eq!(c.position(), Vec2::new(50.0, 60.0));

        run(&mut c, 0.25);
        assert!(c.birth_rate() > 0.0);
        assert!(!c.particles().is_empty());

        run(&mut c, 0.3);
        assert_eq!(c.phase(), CelebrationPhase::Draining);
        assert_eq!(c.birth_rate(), 0.0);
        assert!(c.is_visible());
        assert!(!c.particles().is_empty(), "live particles survive the burst");

        run(&mut c, 1.0);
        assert_eq!(c.phase(), CelebrationPhase::Idle);
        assert!(!c.is_visible());
        assert!(c.particles().is_empty());
        assert_eq!(c.sim_time(), 0.0);
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn retrigger_while_draining_restarts_burst() {
        let mut c = celebration();
        c.trigger(Vec2::ZERO);
        run(&mut c, 0.75);
        assert_eq!(c.phase(), CelebrationPhase::Draining);

        c.trigger(Vec2::new(10.0, 10.0));
        assert_eq!(c.phase(), CelebrationPhase::BurstActive);
        assert_eq!(c.pending_timers(), 1);

        // The cancelled drain timer must not hide the new burst.
        run(&mut c, 0.4);
        assert_eq!(c.phase(), CelebrationPhase::BurstActive);
        assert!(c.is_visible());
    }

    #[test]
    fn rapid_double_trigger_cleans_up() {
        let mut c = celebration();
        c.trigger(Vec2::ZERO);
        c.tick(0.05);
        c.trigger(Vec2::ZERO);
        run(&mut c, 0.5 + 1.0 + 0.1);
        assert_eq!(c.birth_rate(), 0.0);
        assert_eq!(c.phase(), CelebrationPhase::Idle);
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn cancel_halts_synchronously() {
        let mut c = celebration();
        c.trigger(Vec2::ZERO);
        run(&mut c, 0.2);
        c.cancel();
        assert_eq!(c.phase(), CelebrationPhase::Idle);
        assert_eq!(c.pending_timers(), 0);
        run(&mut c, 2.0);
        assert_eq!(c.phase(), CelebrationPhase::Idle);
        assert!(c.particles().is_empty());
    }
}
