use glam::Vec2;
use serde::Serialize;

use crate::api::types::VehicleId;
use crate::components::label::{AnchorSide, ParentSpace};
use crate::components::vehicle::VisualTemplate;
use crate::core::scene::SceneState;
use crate::systems::celebration::CelebrationPhase;

/// Read-only view of the scene after a frame, for the host renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub state: SceneState,
    pub vehicle: Option<VehicleRender>,
    /// Present only while the vehicle carries a displayable ad.
    pub label: Option<LabelRender>,
    pub celebration: CelebrationRender,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRender {
    pub id: VehicleId,
    pub template: VisualTemplate,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub visible: bool,
    /// Vehicles heading left are drawn mirrored.
    pub is_moving_right: bool,
    /// Rotor angle in radians, one per mount, in template order.
    pub rotor_phases: Vec<f32>,
    /// World position of each rotor hub, in template order.
    pub rotor_positions: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRender {
    pub text: String,
    pub position: Vec2,
    pub size: Vec2,
    pub parent_space: ParentSpace,
    pub anchor: AnchorSide,
    pub icon_position: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelebrationRender {
    pub phase: CelebrationPhase,
    pub visible: bool,
    pub position: Vec2,
    pub birth_rate: f32,
    pub particles: Vec<ParticleRender>,
    /// True when confetti uses the generated star instead of an atlas sprite.
    pub procedural_texture: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleRender {
    pub position: Vec2,
    pub angle: f32,
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

impl RenderSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
