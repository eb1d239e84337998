use glam::Vec2;

/// Pointer events in scene coordinates (the host has already mapped them
/// from screen space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began. Treated as a tap.
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
}

impl InputEvent {
    /// Scene point of a tap, if this event is one.
    pub fn tap_point(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerDown { x, y } => Some(Vec2::new(x, y)),
            _ => None,
        }
    }
}

/// Input collected between frames; drained by the scene at the frame boundary.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
