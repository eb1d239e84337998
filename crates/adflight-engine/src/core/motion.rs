//! Motion integration: horizontal travel, boundary turn-around, hover bob.
//!
//! Travel is scaled by elapsed time, never by frame count. A vehicle that
//! passes `viewport_width + margin` heading right (or `-margin` heading left)
//! turns around in place; it is never teleported.

use glam::Vec2;

use crate::api::config::SceneConfig;

/// Per-vehicle animation state owned by the scene while flying.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    pub position: Vec2,
    /// Hover baseline; `position.y` oscillates around it.
    pub base_y: f32,
    /// Accumulated hover phase in radians. Only ever grows.
    pub hover_phase: f64,
    pub moving_right: bool,
}

impl MotionState {
    pub fn new(position: Vec2, moving_right: bool) -> Self {
        Self {
            position,
            base_y: position.y,
            hover_phase: 0.0,
            moving_right,
        }
    }
}

/// World parameters the integrator needs, read from the scene config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub viewport_width: f32,
    pub margin: f32,
    pub units_per_speed: f32,
    pub hover_rate: f32,
}

impl MotionParams {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            viewport_width: config.viewport_width,
            margin: config.wrap_margin,
            units_per_speed: config.units_per_speed,
            hover_rate: config.hover_rate,
        }
    }
}

/// Outcome of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub position: Vec2,
    /// True when this step turned the vehicle around.
    pub direction_flipped: bool,
}

/// Advance `state` by `elapsed` seconds.
///
/// Parked vehicles (`speed <= 0`) keep hovering but do not travel.
pub fn integrate(
    state: &mut MotionState,
    speed: f32,
    hover_amplitude: f32,
    params: &MotionParams,
    elapsed: f32,
) -> MotionStep {
    if speed > 0.0 {
        let dir = if state.moving_right { 1.0 } else { -1.0 };
        state.position.x += dir * speed * params.units_per_speed * elapsed;
    }

    let direction_flipped = crossed_boundary(state, params);
    if direction_flipped {
        state.moving_right = !state.moving_right;
        log::debug!(
            "vehicle turned at x={:.1}, now heading {}",
            state.position.x,
            if state.moving_right { "right" } else { "left" }
        );
    }

    state.hover_phase += f64::from(elapsed) * f64::from(params.hover_rate);
    state.position.y = state.base_y + (state.hover_phase.sin() as f32) * hover_amplitude;

    MotionStep {
        position: state.position,
        direction_flipped,
    }
}

fn crossed_boundary(state: &MotionState, params: &MotionParams) -> bool {
    if state.moving_right {
        state.position.x > params.viewport_width + params.margin
    } else {
        state.position.x < -params.margin
    }
}
