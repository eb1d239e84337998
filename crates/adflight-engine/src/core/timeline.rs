//! Cooperative one-shot timers advanced by the frame loop.
//!
//! Timers only fire from `tick`, on the caller's thread, so once `clear`
//! returns nothing scheduled earlier can fire.

use std::collections::HashMap;

/// Handle to a scheduled timer for later cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer<K> {
    due: f64,
    key: K,
}

/// One-shot timers keyed by a caller-defined payload.
#[derive(Debug)]
pub struct Timeline<K> {
    timers: HashMap<TimerId, Timer<K>>,
    next_id: u32,
    /// Seconds ticked since construction.
    now: f64,
}

impl<K> Default for Timeline<K> {
    fn default() -> Self {
        Self {
            timers: HashMap::new(),
            next_id: 0,
            now: 0.0,
        }
    }
}

impl<K: Copy> Timeline<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `key` once `delay` seconds of ticks have elapsed.
    pub fn schedule(&mut self, delay: f32, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let due = self.now + f64::from(delay.max(0.0));
        self.timers.insert(id, Timer { due, key });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Seconds until `id` fires, if pending.
    pub fn remaining(&self, id: TimerId) -> Option<f32> {
        self.timers.get(&id).map(|t| (t.due - self.now).max(0.0) as f32)
    }

    /// Advance time and return the keys of every timer that came due,
    /// earliest first.
    pub fn tick(&mut self, dt: f32) -> Vec<K> {
        self.now += f64::from(dt.max(0.0));

        let mut due: Vec<(f64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= self.now)
            .map(|(&id, t)| (t.due, id))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1 .0.cmp(&b.1 .0)));

        due.into_iter()
            .filter_map(|(_, id)| self.timers.remove(&id).map(|t| t.key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_when_due() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.5, 'a');
        assert!(timeline.tick(0.25).is_empty());
        assert_eq!(timeline.tick(0.25), vec!['a']);
        assert!(timeline.tick(1.0).is_empty());
        assert!(timeline.is_empty());
    }

    #[test]
    fn fires_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.75, 2);
        timeline.schedule(0.25, 1);
        timeline.schedule(0.5, 3);
        assert_eq!(timeline.tick(1.0), vec![1, 3, 2]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timeline = Timeline::new();
        let id = timeline.schedule(0.5, "hide");
        assert!(timeline.is_pending(id));
        assert!(timeline.cancel(id));
        assert!(!timeline.is_pending(id));
        assert!(!timeline.cancel(id));
        assert!(timeline.tick(1.0).is_empty());
    }

    #[test]
    fn remaining_counts_down() {
        let mut timeline = Timeline::new();
        let id = timeline.schedule(1.0, ());
        timeline.tick(0.25);
        assert_eq!(timeline.remaining(id), Some(0.75));
    }

    #[test]
    fn clear_drops_everything() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.1, 1);
        timeline.schedule(0.2, 2);
        timeline.clear();
        assert!(timeline.tick(1.0).is_empty());
    }
}
