//! Banner attachment: keeps the ad label visually continuous while the
//! vehicle turns around.
//!
//! Attached labels ride along at `vehicle + offset`. On the frame a vehicle
//! turns, an attached label is converted into a world-space coordinate at
//! exactly the spot it occupied, so the mirrored vehicle frame never drags
//! it. Once detached it stays detached for the rest of the selection and is
//! re-placed by direct assignment every frame.

use glam::Vec2;

use crate::api::config::LabelConfig;
use crate::components::label::{AnchorSide, LabelState, ParentSpace};

/// Banner offset from the vehicle center.
pub fn label_offset(config: &LabelConfig) -> Vec2 {
    Vec2::new(0.0, config.offset_y)
}

/// Per-frame label transition.
pub fn update_label(
    state: LabelState,
    vehicle_pos: Vec2,
    offset: Vec2,
    direction_flipped: bool,
    moving_right: bool,
) -> LabelState {
    let anchor = AnchorSide::for_heading(moving_right);
    match state.parent_space {
        ParentSpace::AttachedToVehicle if direction_flipped => {
            let world_position = state.resolve(vehicle_pos, offset);
            log::debug!("label detached at ({:.1}, {:.1})", world_position.x, world_position.y);
            LabelState {
                parent_space: ParentSpace::DetachedWorldSpace,
                world_position,
                anchor,
            }
        }
        ParentSpace::AttachedToVehicle => LabelState { anchor, ..state },
        ParentSpace::DetachedWorldSpace => LabelState {
            parent_space: ParentSpace::DetachedWorldSpace,
            world_position: vehicle_pos + offset,
            anchor,
        },
    }
}

/// Banner geometry in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub center: Vec2,
    pub size: Vec2,
    /// Center of the direction indicator icon.
    pub icon_center: Vec2,
}

impl LabelLayout {
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        let half = self.size * 0.5;
        d.x <= half.x && d.y <= half.y
    }
}

/// Lay out a banner around `center`. Text advance follows bitmap-font rules
/// (`glyph_size * glyph_spacing` per character).
pub fn layout_label(text: &str, center: Vec2, anchor: AnchorSide, config: &LabelConfig) -> LabelLayout {
    let text_width = text.chars().count() as f32 * config.glyph_size * config.glyph_spacing;
    let size = Vec2::new(
        config.padding * 2.5 + config.icon_size + text_width,
        config.height,
    );
    let icon_dx = size.x * 0.5 - config.padding - config.icon_size * 0.5;
    let icon_center = match anchor {
        AnchorSide::Left => center - Vec2::new(icon_dx, 0.0),
        AnchorSide::Right => center + Vec2::new(icon_dx, 0.0),
    };
    LabelLayout { center, size, icon_center }
}
