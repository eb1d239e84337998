pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{CelebrationConfig, LabelConfig, SceneConfig};
pub use api::error::{Result, SceneError};
pub use api::types::{SceneEvent, SceneListener, VehicleId};
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use components::emitter::EmitterComponent;
pub use components::label::{AnchorSide, LabelState, ParentSpace};
pub use components::sprite::{AtlasId, SpriteRef};
pub use components::vehicle::{AdContent, VehicleDescriptor, VisualTemplate};
pub use crate::core::motion::{integrate, MotionParams, MotionState, MotionStep};
pub use crate::core::scene::{SceneController, SceneState};
pub use crate::core::time::{FixedClock, FrameClock, SystemClock, WallClock};
pub use crate::core::timeline::{Timeline, TimerId};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{InstanceKind, RenderBuffer, RenderInstance};
pub use renderer::snapshot::{CelebrationRender, LabelRender, ParticleRender, RenderSnapshot, VehicleRender};
pub use systems::celebration::{Celebration, CelebrationPhase};
pub use systems::effects::{Particle, ParticleTexture, StarTexture};
pub use systems::hit_test::{HitTarget, VehicleShape};
pub use systems::label::LabelLayout;
pub use systems::rotor::{RotorAnimator, RotorSync};
