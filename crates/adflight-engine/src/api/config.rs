use serde::{Deserialize, Serialize};

use crate::api::error::{Result, SceneError};

/// Configuration for the scene, provided by the host once at construction.
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Viewport width in scene units.
    pub viewport_width: f32,
    /// Viewport height in scene units.
    pub viewport_height: f32,
    /// Off-screen buffer past each horizontal edge before a vehicle turns around.
    pub wrap_margin: f32,
    /// Horizontal units per second for each unit of vehicle speed.
    pub units_per_speed: f32,
    /// Hover oscillation rate in radians per second.
    pub hover_rate: f32,
    /// Upper bound on a single frame's elapsed time, in seconds.
    pub max_frame_delta: f32,
    pub label: LabelConfig,
    pub celebration: CelebrationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport_width: 390.0,
            viewport_height: 844.0,
            wrap_margin: 50.0,
            units_per_speed: 60.0,
            hover_rate: 2.0,
            max_frame_delta: 0.25,
            label: LabelConfig::default(),
            celebration: CelebrationConfig::default(),
        }
    }
}

/// Banner metrics. Text width follows bitmap-font advance rules:
/// `chars * glyph_size * glyph_spacing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Vertical offset of the banner center from the vehicle center (Y-down).
    pub offset_y: f32,
    pub glyph_size: f32,
    pub glyph_spacing: f32,
    pub padding: f32,
    /// Size of the direction indicator icon inside the banner.
    pub icon_size: f32,
    pub height: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            offset_y: -30.0,
            glyph_size: 12.0,
            glyph_spacing: 0.55,
            padding: 8.0,
            icon_size: 10.0,
            height: 22.0,
        }
    }
}

/// Confetti burst parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    /// Particles per second while the burst is active.
    pub burst_birth_rate: f32,
    /// Seconds of active spawning.
    pub burst_duration: f32,
    /// Seconds after the burst before the emitter hides and resets.
    /// Must cover `particle_lifetime`.
    pub drain_duration: f32,
    pub particle_lifetime: f32,
    /// Min/max initial particle speed.
    pub speed_range: (f32, f32),
    /// Downward acceleration applied to particles (Y-down).
    pub gravity: f32,
    pub particle_size: f32,
    /// Sprite name looked up in the registry; falls back to a generated star.
    pub texture: String,
    pub seed: u64,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            burst_birth_rate: 240.0,
            burst_duration: 0.35,
            drain_duration: 2.5,
            particle_lifetime: 2.0,
            speed_range: (80.0, 260.0),
            gravity: 320.0,
            particle_size: 6.0,
            texture: "confetti".to_string(),
            seed: 42,
        }
    }
}

impl SceneConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would break scene invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(SceneError::Config(format!(
                "viewport must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if !(self.wrap_margin >= 0.0) {
            return Err(SceneError::Config(format!(
                "wrap_margin must be non-negative, got {}",
                self.wrap_margin
            )));
        }
        if !(self.units_per_speed > 0.0) {
            return Err(SceneError::Config("units_per_speed must be positive".into()));
        }
        if !(self.max_frame_delta > 0.0) {
            return Err(SceneError::Config("max_frame_delta must be positive".into()));
        }
        let c = &self.celebration;
        if !(c.burst_duration > 0.0) {
            return Err(SceneError::Config("celebration.burst_duration must be positive".into()));
        }
        if c.drain_duration < c.particle_lifetime {
            return Err(SceneError::Config(format!(
                "celebration.drain_duration ({}) must cover particle_lifetime ({})",
                c.drain_duration, c.particle_lifetime
            )));
        }
        if c.speed_range.0 > c.speed_range.1 {
            return Err(SceneError::Config("celebration.speed_range min exceeds max".into()));
        }
        Ok(())
    }
}
