use glam::Vec2;
use serde::Serialize;

/// Which coordinate space the banner position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ParentSpace {
    /// Position is implicit: vehicle position plus the banner offset.
    #[default]
    AttachedToVehicle,
    /// Position is an explicit world coordinate owned by the label.
    DetachedWorldSpace,
}

/// Side of the banner the direction indicator sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnchorSide {
    Left,
    Right,
}

impl AnchorSide {
    /// Indicator points toward the direction of travel.
    pub fn for_heading(moving_right: bool) -> Self {
        if moving_right {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Coordinate-space state of the ad banner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelState {
    pub parent_space: ParentSpace,
    /// Authoritative only while detached.
    pub world_position: Vec2,
    pub anchor: AnchorSide,
}

impl Default for LabelState {
    fn default() -> Self {
        Self {
            parent_space: ParentSpace::AttachedToVehicle,
            world_position: Vec2::ZERO,
            anchor: AnchorSide::Right,
        }
    }
}

impl LabelState {
    /// Fresh attached label for a vehicle with the given heading.
    pub fn attached(moving_right: bool) -> Self {
        Self {
            anchor: AnchorSide::for_heading(moving_right),
            ..Default::default()
        }
    }

    pub fn is_detached(&self) -> bool {
        self.parent_space == ParentSpace::DetachedWorldSpace
    }

    /// Where the banner renders, given the vehicle position and banner offset.
    pub fn resolve(&self, vehicle_pos: Vec2, offset: Vec2) -> Vec2 {
        match self.parent_space {
            ParentSpace::AttachedToVehicle => vehicle_pos + offset,
            ParentSpace::DetachedWorldSpace => self.world_position,
        }
    }
}
