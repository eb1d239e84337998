use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

/// Turns host frame input into per-frame elapsed seconds.
///
/// The first frame after a (re)start has no reliable predecessor, so it
/// always yields zero. Stalls longer than `max_delta` are clamped.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_delta: f32,
    /// False until the first frame after `reset` has been consumed.
    primed: bool,
    /// Last absolute timestamp seen by `advance_to`, in seconds.
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            max_delta,
            primed: false,
            last_timestamp: None,
        }
    }

    /// Forget the previous frame. Called on start and resume.
    pub fn reset(&mut self) {
        self.primed = false;
        self.last_timestamp = None;
    }

    /// Consume a host-supplied frame delta.
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        if !self.primed {
            self.primed = true;
            return 0.0;
        }
        self.sanitize(elapsed)
    }

    /// Consume an absolute host timestamp (seconds, any epoch).
    pub fn advance_to(&mut self, timestamp: f64) -> f32 {
        self.primed = true;
        match self.last_timestamp.replace(timestamp) {
            Some(prev) => self.sanitize((timestamp - prev) as f32),
            None => 0.0,
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    fn sanitize(&self, elapsed: f32) -> f32 {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return 0.0;
        }
        if elapsed > self.max_delta {
            log::debug!("frame delta {:.3}s clamped to {:.3}s", elapsed, self.max_delta);
            return self.max_delta;
        }
        elapsed
    }
}

/// Source of the current wall-clock time for ad window checks.
pub trait WallClock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock. Clones share the same instant, so a host (or test) can
/// keep a handle and move time while the scene owns another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
