//! Property-based tests for the frame pipeline using proptest.
//!
//! These check the invariants that must hold for any speed, position and
//! timing the host can throw at the scene.

use chrono::{Duration, TimeZone, Utc};
use glam::Vec2;
use proptest::prelude::*;

use crate::api::config::CelebrationConfig;
use crate::assets::registry::SpriteRegistry;
use crate::components::label::LabelState;
use crate::components::vehicle::AdContent;
use crate::core::motion::{integrate, MotionParams, MotionState};
use crate::systems::ad_gate;
use crate::systems::celebration::{Celebration, CelebrationPhase};
use crate::systems::effects::ParticleTexture;
use crate::systems::label::update_label;
use crate::systems::rotor::RotorAnimator;

const FRAME: f32 = 1.0 / 60.0;

fn params() -> MotionParams {
    MotionParams {
        viewport_width: 390.0,
        margin: 50.0,
        units_per_speed: 60.0,
        hover_rate: 2.0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The spin period is exactly the reciprocal of speed.
    #[test]
    fn prop_rotor_period_is_reciprocal_of_speed(
        speed in 0.001f32..50.0,
        rotors in 1usize..8,
    ) {
        let mut animator = RotorAnimator::new(rotors);
        animator.sync(speed);
        prop_assert_eq!(animator.period(), Some(1.0 / speed));
    }

    /// Heading toggles exactly once while a vehicle crosses the right edge.
    #[test]
    fn prop_single_flip_per_crossing(
        gap in 1.0f32..100.0,
        speed in 0.5f32..5.0,
    ) {
        let p = params();
        let mut state = MotionState::new(Vec2::new(p.viewport_width + p.margin - gap, 200.0), true);
        let frames = (gap / (speed * p.units_per_speed * FRAME)).ceil() as usize + 60;

        let mut flips = 0;
        for _ in 0..frames {
            if integrate(&mut state, speed, 0.0, &p, FRAME).direction_flipped {
                flips += 1;
            }
        }
        prop_assert_eq!(flips, 1);
        prop_assert!(!state.moving_right);
    }

    /// The banner does not move on the frame it detaches.
    #[test]
    fn prop_label_continuous_across_detach(
        x in -100.0f32..500.0,
        y in 0.0f32..800.0,
        offset_y in -80.0f32..0.0,
        heading in any::<bool>(),
    ) {
        let vehicle = Vec2::new(x, y);
        let offset = Vec2::new(0.0, offset_y);
        let before = LabelState::attached(heading);
        let after = update_label(before, vehicle, offset, true, !heading);
        let jump = (after.resolve(vehicle, offset) - before.resolve(vehicle, offset)).length();
        prop_assert!(after.is_detached());
        prop_assert!(jump < 1e-4, "label jumped {} units", jump);
    }

    /// Both ends of the ad window are active; one second past the end is not.
    #[test]
    fn prop_ad_window_bounds_inclusive(
        start_secs in 1_600_000_000i64..1_900_000_000,
        length_secs in 0i64..90 * 86_400,
    ) {
        let start = Utc.timestamp_opt(start_secs, 0).unwrap();
        let end = start + Duration::seconds(length_secs);
        let ad = AdContent::new("Acme", start, end);
        prop_assert!(ad_gate::is_active(&ad, start));
        prop_assert!(ad_gate::is_active(&ad, end));
        prop_assert!(!ad_gate::is_active(&ad, end + Duration::seconds(1)));
    }

    /// Two triggers in quick succession leave nothing spawning once the
    /// combined burst and drain window has passed.
    #[test]
    fn prop_double_trigger_cleans_up(
        gap_frames in 0usize..30,
        tap_x in 0.0f32..390.0,
    ) {
        let config = CelebrationConfig::default();
        let texture = ParticleTexture::resolve(&SpriteRegistry::new(), &config.texture);
        let mut c = Celebration::new(&config, texture);

        c.trigger(Vec2::new(tap_x, 400.0));
        for _ in 0..gap_frames {
            c.tick(FRAME);
        }
        c.trigger(Vec2::new(tap_x, 400.0));

        let window = config.burst_duration + config.drain_duration;
        let frames = (window / FRAME).ceil() as usize + 2;
        for _ in 0..frames {
            c.tick(FRAME);
        }
        prop_assert_eq!(c.birth_rate(), 0.0);
        prop_assert_eq!(c.phase(), CelebrationPhase::Idle);
        prop_assert_eq!(c.pending_timers(), 0);
        prop_assert!(c.particles().is_empty());
    }
}
