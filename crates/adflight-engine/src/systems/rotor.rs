//! Rotor animation: one endless full-turn spin per rotor mount.
//!
//! The spin period is `1 / speed` seconds. A running spin is never restarted
//! for the same period; a speed change cancels and re-issues it, keeping each
//! rotor's current angle so the blades do not jump.

use std::f32::consts::TAU;

/// What `RotorAnimator::sync` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotorSync {
    /// A spin was issued where none was running.
    Started,
    /// A spin with the requested period was already running.
    Unchanged,
    /// The running spin was cancelled and re-issued with a new period.
    Restarted,
    /// The running spin was cancelled because the vehicle is parked.
    Parked,
    /// Parked and nothing was running.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spin {
    period: f32,
}

/// Continuous rotation state for every rotor on one vehicle.
#[derive(Debug, Clone)]
pub struct RotorAnimator {
    /// Current angle of each rotor in radians, in `[0, TAU)`.
    angles: Vec<f32>,
    spin: Option<Spin>,
}

impl RotorAnimator {
    pub fn new(rotor_count: usize) -> Self {
        Self {
            angles: vec![0.0; rotor_count],
            spin: None,
        }
    }

    /// Make the running spin match `speed`.
    pub fn sync(&mut self, speed: f32) -> RotorSync {
        if !(speed > 0.0) || self.angles.is_empty() {
            return match self.spin.take() {
                Some(_) => {
                    log::debug!("rotors parked");
                    RotorSync::Parked
                }
                None => RotorSync::Idle,
            };
        }

        let period = 1.0 / speed;
        match self.spin {
            Some(spin) if spin.period == period => RotorSync::Unchanged,
            Some(spin) => {
                log::debug!("rotor period {:.3}s -> {:.3}s", spin.period, period);
                self.spin = Some(Spin { period });
                RotorSync::Restarted
            }
            None => {
                self.spin = Some(Spin { period });
                RotorSync::Started
            }
        }
    }

    /// Advance every rotor. Even-indexed rotors turn clockwise, odd ones
    /// counter-clockwise.
    pub fn tick(&mut self, dt: f32) {
        let Some(spin) = self.spin else { return };
        let step = TAU * dt / spin.period;
        for (i, angle) in self.angles.iter_mut().enumerate() {
            let signed = if i % 2 == 0 { step } else { -step };
            *angle = wrap_angle(*angle + signed);
        }
    }

    /// Cancel the spin, leaving rotors at their current angles.
    pub fn stop(&mut self) {
        self.spin = None;
    }

    /// Seconds per full turn, if spinning.
    pub fn period(&self) -> Option<f32> {
        self.spin.map(|s| s.period)
    }

    pub fn is_running(&self) -> bool {
        self.spin.is_some()
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    pub fn rotor_count(&self) -> usize {
        self.angles.len()
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn period_is_inverse_speed() {
        let mut rotors = RotorAnimator::new(4);
        assert_eq!(rotors.sync(4.0), RotorSync::Started);
        assert_eq!(rotors.period(), Some(0.25));
    }

    #[test]
    fn same_speed_does_not_restart() {
        let mut rotors = RotorAnimator::new(4);
        rotors.sync(2.0);
        rotors.tick(0.1);
        let before = rotors.angles().to_vec();
        assert_eq!(rotors.sync(2.0), RotorSync::Unchanged);
        assert_eq!(rotors.angles(), before.as_slice());
    }

    #[test]
    fn speed_change_restarts_and_keeps_angle() {
        let mut rotors = RotorAnimator::new(2);
        rotors.sync(1.0);
        rotors.tick(0.25);
        let before = rotors.angles()[0];
        assert_eq!(rotors.sync(2.0), RotorSync::Restarted);
        assert_eq!(rotors.period(), Some(0.5));
        assert_eq!(rotors.angles()[0], before);
    }

    #[test]
    fn zero_speed_parks_without_error() {
        let mut rotors = RotorAnimator::new(4);
        assert_eq!(rotors.sync(0.0), RotorSync::Idle);
        rotors.sync(3.0);
        assert_eq!(rotors.sync(0.0), RotorSync::Parked);
        assert!(!rotors.is_running());
        rotors.tick(1.0);
        assert!(rotors.angles().iter().all(|a| a.is_finite()));
    }

    #[test]
    fn no_mounts_never_spin() {
        let mut rotors = RotorAnimator::new(0);
        assert_eq!(rotors.rotor_count(), 0);
        assert_eq!(rotors.sync(5.0), RotorSync::Idle);
        assert_eq!(rotors.period(), None);
    }

    #[test]
    fn quarter_period_is_quarter_turn() {
        let mut rotors = RotorAnimator::new(2);
        rotors.sync(2.0);
        rotors.tick(0.125);
        assert_abs_diff_eq!(rotors.angles()[0], TAU / 4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(rotors.angles()[1], TAU * 3.0 / 4.0, epsilon = 1e-5);
    }

    #[test]
    fn angles_stay_wrapped() {
        let mut rotors = RotorAnimator::new(3);
        rotors.sync(7.0);
        for _ in 0..1000 {
            rotors.tick(1.0 / 60.0);
        }
        assert!(rotors.angles().iter().all(|&a| (0.0..TAU).contains(&a)));
    }
}
