use chrono::{DateTime, Utc};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::VehicleId;

/// Body shape, size and rotor layout of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualTemplate {
    #[default]
    Quadcopter,
    Hexacopter,
    CargoDrone,
    Spaceship,
}

const QUAD_MOUNTS: [Vec2; 4] = [
    Vec2::new(-24.0, -10.0),
    Vec2::new(-12.0, -12.0),
    Vec2::new(12.0, -12.0),
    Vec2::new(24.0, -10.0),
];

const HEX_MOUNTS: [Vec2; 6] = [
    Vec2::new(-32.0, -10.0),
    Vec2::new(-20.0, -13.0),
    Vec2::new(-8.0, -14.0),
    Vec2::new(8.0, -14.0),
    Vec2::new(20.0, -13.0),
    Vec2::new(32.0, -10.0),
];

const CARGO_MOUNTS: [Vec2; 2] = [Vec2::new(-34.0, -20.0), Vec2::new(34.0, -20.0)];

impl VisualTemplate {
    pub const ALL: [VisualTemplate; 4] = [
        Self::Quadcopter,
        Self::Hexacopter,
        Self::CargoDrone,
        Self::Spaceship,
    ];

    /// Unscaled body size in scene units.
    pub fn body_size(self) -> Vec2 {
        match self {
            Self::Quadcopter => Vec2::new(60.0, 24.0),
            Self::Hexacopter => Vec2::new(72.0, 26.0),
            Self::CargoDrone => Vec2::new(84.0, 36.0),
            Self::Spaceship => Vec2::new(90.0, 32.0),
        }
    }

    /// Rotor mount offsets relative to the body center, left to right.
    pub fn rotor_mounts(self) -> &'static [Vec2] {
        match self {
            Self::Quadcopter => &QUAD_MOUNTS,
            Self::Hexacopter => &HEX_MOUNTS,
            Self::CargoDrone => &CARGO_MOUNTS,
            Self::Spaceship => &[],
        }
    }

    /// Radius of each rotor disc.
    pub fn rotor_radius(self) -> f32 {
        match self {
            Self::Quadcopter => 9.0,
            Self::Hexacopter => 7.0,
            Self::CargoDrone => 14.0,
            Self::Spaceship => 0.0,
        }
    }

    /// Registry name of the body sprite.
    pub fn sprite_name(self) -> &'static str {
        match self {
            Self::Quadcopter => "quadcopter",
            Self::Hexacopter => "hexacopter",
            Self::CargoDrone => "cargo_drone",
            Self::Spaceship => "spaceship",
        }
    }
}

/// Sponsored content carried by a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdContent {
    pub advertiser_name: String,
    #[serde(default)]
    pub banner_text: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub impression_count: u32,
    #[serde(default)]
    pub click_count: u32,
}

impl AdContent {
    pub fn new(
        advertiser_name: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            advertiser_name: advertiser_name.into(),
            banner_text: None,
            start_date,
            end_date,
            impression_count: 0,
            click_count: 0,
        }
    }

    pub fn with_banner_text(mut self, text: impl Into<String>) -> Self {
        self.banner_text = Some(text.into());
        self
    }
}

fn default_scale() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Snapshot of a flying object's visual and behavioral parameters.
///
/// Once a scene is flying, `position` belongs to the engine; hosts replace
/// the whole descriptor through `SceneController::select_vehicle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDescriptor {
    pub id: VehicleId,
    #[serde(default)]
    pub template: VisualTemplate,
    /// Initial position; `y` is the hover baseline.
    #[serde(default)]
    pub position: Vec2,
    /// Rotation in radians.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Drives both horizontal travel and rotor spin. `<= 0` means parked.
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub hover_amplitude: f32,
    /// Initial heading when the vehicle is first flown.
    #[serde(default = "default_true")]
    pub start_moving_right: bool,
    #[serde(default)]
    pub ad: Option<AdContent>,
}

impl VehicleDescriptor {
    pub fn new(id: VehicleId, template: VisualTemplate) -> Self {
        Self {
            id,
            template,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            visible: true,
            speed: 1.0,
            hover_amplitude: 0.0,
            start_moving_right: true,
            ad: None,
        }
    }

    /// Parse a descriptor sent by the host as JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_hover_amplitude(mut self, amplitude: f32) -> Self {
        self.hover_amplitude = amplitude;
        self
    }

    pub fn moving_left(mut self) -> Self {
        self.start_moving_right = false;
        self
    }

    pub fn with_ad(mut self, ad: AdContent) -> Self {
        self.ad = Some(ad);
        self
    }

    /// Whether the vehicle is parked (no travel, no rotor spin).
    pub fn is_parked(&self) -> bool {
        !(self.speed > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_have_distinct_rotor_layouts() {
        let counts: Vec<usize> = VisualTemplate::ALL
            .iter()
            .map(|t| t.rotor_mounts().len())
            .collect();
        assert_eq!(counts, vec![4, 6, 2, 0]);
    }

    #[test]
    fn rotor_mounts_lie_within_body_span() {
        for template in VisualTemplate::ALL {
            let half = template.body_size() * 0.5;
            for mount in template.rotor_mounts() {
                assert!(mount.x.abs() <= half.x, "{:?} mount {:?}", template, mount);
            }
        }
    }

    #[test]
    fn zero_and_nan_speed_are_parked() {
        let d = VehicleDescriptor::new(VehicleId(1), VisualTemplate::Quadcopter);
        assert!(!d.is_parked());
        assert!(d.clone().with_speed(0.0).is_parked());
        assert!(d.clone().with_speed(-2.0).is_parked());
        assert!(d.with_speed(f32::NAN).is_parked());
    }

    #[test]
    fn parse_minimal_descriptor() {
        let json = r#"{
            "id": 9,
            "template": "cargo_drone",
            "position": [10.0, 120.0],
            "speed": 2.5,
            "ad": {
                "advertiser_name": "Acme",
                "start_date": "2026-01-01T00:00:00Z",
                "end_date": "2026-12-31T23:59:59Z"
            }
        }"#;
        let d = VehicleDescriptor::from_json(json).unwrap();
        assert_eq!(d.id, VehicleId(9));
        assert_eq!(d.template, VisualTemplate::CargoDrone);
        assert_eq!(d.position, Vec2::new(10.0, 120.0));
        assert_eq!(d.scale, 1.0);
        assert!(d.visible);
        assert!(d.start_moving_right);
        let ad = d.ad.unwrap();
        assert_eq!(ad.advertiser_name, "Acme");
        assert_eq!(ad.banner_text, None);
        assert_eq!(ad.click_count, 0);
    }
}
