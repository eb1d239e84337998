use serde::{Deserialize, Serialize};

/// Stable identity of a vehicle. Assigned by the host once, never reused
/// for a different vehicle within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub u32);

/// Interaction signals raised by the scene.
///
/// `Interaction` and `AdTap` are distinct, composable signals: a label tap
/// produces both, a body tap produces only `Interaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "vehicle")]
pub enum SceneEvent {
    Interaction(VehicleId),
    AdTap(VehicleId),
}

/// Receives interaction signals as they are raised.
///
/// `Vec<SceneEvent>` implements this so a host can simply buffer events and
/// drain them once per frame.
pub trait SceneListener {
    fn on_interaction(&mut self, _vehicle: VehicleId) {}

    fn on_ad_tap(&mut self, _vehicle: VehicleId) {}
}

impl SceneListener for Vec<SceneEvent> {
    fn on_interaction(&mut self, vehicle: VehicleId) {
        self.push(SceneEvent::Interaction(vehicle));
    }

    fn on_ad_tap(&mut self, vehicle: VehicleId) {
        self.push(SceneEvent::AdTap(vehicle));
    }
}
