//! Scene controller: owns the selected vehicle and runs the per-frame
//! pipeline `motion -> rotors -> label -> ad metrics -> celebration`.
//!
//! State machine: `Stopped -> Flying <-> Paused -> Stopped`.
//!
//! Host writes (vehicle selection, speed, render hints) are staged and
//! applied atomically at the next frame boundary while the scene runs, and
//! immediately while it is stopped. Later writes replace earlier ones.

use chrono::{DateTime, Utc};
use glam::Vec2;
use serde::Serialize;

use crate::api::config::SceneConfig;
use crate::api::error::{Result, SceneError};
use crate::api::types::{SceneEvent, SceneListener, VehicleId};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::SpriteRegistry;
use crate::components::label::LabelState;
use crate::components::vehicle::{AdContent, VehicleDescriptor};
use crate::core::motion::{self, MotionParams, MotionState};
use crate::core::time::{FrameClock, SystemClock, WallClock};
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;
use crate::renderer::snapshot::{
    CelebrationRender, LabelRender, ParticleRender, RenderSnapshot, VehicleRender,
};
use crate::systems::ad_gate;
use crate::systems::celebration::Celebration;
use crate::systems::effects::ParticleTexture;
use crate::systems::hit_test::{self, HitTarget, VehicleShape};
use crate::systems::label::{self, LabelLayout};
use crate::systems::render;
use crate::systems::rotor::{RotorAnimator, RotorSync};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SceneState {
    #[default]
    Stopped,
    Flying,
    Paused,
}

/// Everything the engine tracks for the selected vehicle.
struct ActiveVehicle {
    descriptor: VehicleDescriptor,
    motion: MotionState,
    rotors: RotorAnimator,
    label: LabelState,
    /// Set once the banner has been counted for this selection.
    impression_recorded: bool,
}

impl ActiveVehicle {
    fn new(descriptor: VehicleDescriptor, hover_phase: f64) -> Self {
        let mut motion = MotionState::new(descriptor.position, descriptor.start_moving_right);
        motion.hover_phase = hover_phase;
        Self {
            rotors: RotorAnimator::new(descriptor.template.rotor_mounts().len()),
            label: LabelState::attached(descriptor.start_moving_right),
            motion,
            descriptor,
            impression_recorded: false,
        }
    }

    /// Take over host-owned fields from a descriptor for the same vehicle.
    /// Position, heading and label state stay engine-owned, and so do the ad
    /// counters while the campaign is unchanged. A different campaign starts
    /// its own counts.
    fn update(&mut self, mut descriptor: VehicleDescriptor) {
        if descriptor.template != self.descriptor.template {
            self.rotors = RotorAnimator::new(descriptor.template.rotor_mounts().len());
        }
        match (self.descriptor.ad.as_ref(), descriptor.ad.as_mut()) {
            (Some(current), Some(incoming)) if same_campaign(current, incoming) => {
                incoming.impression_count = current.impression_count;
                incoming.click_count = current.click_count;
            }
            (None, None) => {}
            _ => self.impression_recorded = false,
        }
        let position = self.descriptor.position;
        self.descriptor = VehicleDescriptor { position, ..descriptor };
    }

    fn shape(&self) -> VehicleShape {
        VehicleShape {
            template: self.descriptor.template,
            position: self.descriptor.position,
            rotation: self.descriptor.rotation,
            scale: self.descriptor.scale,
            moving_right: self.motion.moving_right,
        }
    }
}

fn same_campaign(a: &AdContent, b: &AdContent) -> bool {
    a.advertiser_name == b.advertiser_name && a.start_date == b.start_date && a.end_date == b.end_date
}

/// Host writes waiting for the next frame boundary.
#[derive(Debug, Default)]
struct PendingEdits {
    vehicle: Option<VehicleDescriptor>,
    speed: Option<f32>,
    rotation: Option<f32>,
    scale: Option<f32>,
    visible: Option<bool>,
}

impl PendingEdits {
    fn is_empty(&self) -> bool {
        self.vehicle.is_none()
            && self.speed.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
            && self.visible.is_none()
    }
}

pub struct SceneController {
    config: SceneConfig,
    state: SceneState,
    vehicle: Option<ActiveVehicle>,
    pending: PendingEdits,
    frame_clock: FrameClock,
    wall_clock: Box<dyn WallClock>,
    celebration: Celebration,
    registry: SpriteRegistry,
    events: Vec<SceneEvent>,
    listener: Option<Box<dyn SceneListener>>,
}

impl SceneController {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SceneConfig) -> Self {
        let registry = SpriteRegistry::new();
        let texture = ParticleTexture::resolve(&registry, &config.celebration.texture);
        Self {
            frame_clock: FrameClock::new(config.max_frame_delta),
            celebration: Celebration::new(&config.celebration, texture),
            config,
            state: SceneState::Stopped,
            vehicle: None,
            pending: PendingEdits::default(),
            wall_clock: Box::new(SystemClock),
            registry,
            events: Vec::new(),
            listener: None,
        }
    }

    /// Use `clock` for ad window checks instead of the system clock.
    pub fn with_wall_clock(mut self, clock: impl WallClock + 'static) -> Self {
        self.wall_clock = Box::new(clock);
        self
    }

    /// Forward interaction signals to `listener` as they are raised. Events
    /// are still buffered for `drain_events`.
    pub fn set_listener(&mut self, listener: impl SceneListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    // -- Host writes --

    /// Replace the selected vehicle.
    ///
    /// A descriptor with the current vehicle's id updates it in place: the
    /// engine keeps its position, heading, rotor phase and label state. Any
    /// other id starts a fresh selection with an attached label.
    pub fn select_vehicle(&mut self, descriptor: VehicleDescriptor) {
        self.pending.vehicle = Some(descriptor);
        self.apply_if_stopped();
    }

    /// Change travel and rotor speed. `<= 0` parks the vehicle.
    pub fn set_speed(&mut self, speed: f32) {
        self.pending.speed = Some(speed);
        self.apply_if_stopped();
    }

    pub fn set_render_hints(&mut self, rotation: f32, scale: f32, visible: bool) {
        self.pending.rotation = Some(rotation);
        self.pending.scale = Some(scale);
        self.pending.visible = Some(visible);
        self.apply_if_stopped();
    }

    /// Resize the playfield. Non-positive sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring invalid viewport {}x{}", width, height);
            return;
        }
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        log::debug!("viewport set to {}x{}", width, height);
    }

    /// Rebuild the sprite registry and re-resolve the confetti texture.
    pub fn load_manifest(&mut self, manifest: &AssetManifest) {
        self.registry = SpriteRegistry::from_manifest(manifest);
        let texture = ParticleTexture::resolve(&self.registry, &self.config.celebration.texture);
        self.celebration.set_texture(texture);
        log::info!("asset manifest loaded: {} sprites", self.registry.len());
    }

    // -- Lifecycle --

    /// `Stopped -> Flying`. Returns `Ok(false)` when already running.
    pub fn start(&mut self) -> Result<bool> {
        if self.state != SceneState::Stopped {
            log::debug!("start ignored in {:?}", self.state);
            return Ok(false);
        }
        self.apply_pending();
        let Some(vehicle) = &self.vehicle else {
            return Err(SceneError::NoVehicle);
        };
        if vehicle.descriptor.is_parked() {
            log::warn!("vehicle {:?} starts parked (speed {})", vehicle.descriptor.id, vehicle.descriptor.speed);
        }
        log::info!("scene started with vehicle {:?}", vehicle.descriptor.id);
        self.frame_clock.reset();
        self.state = SceneState::Flying;
        Ok(true)
    }

    /// `Flying -> Paused`. Motion and rotor phase are frozen, not reset.
    pub fn pause(&mut self) -> bool {
        if self.state != SceneState::Flying {
            log::debug!("pause ignored in {:?}", self.state);
            return false;
        }
        self.state = SceneState::Paused;
        log::info!("scene paused");
        true
    }

    /// `Paused -> Flying`. The paused interval counts as zero elapsed time.
    pub fn resume(&mut self) -> bool {
        if self.state != SceneState::Paused {
            log::debug!("resume ignored in {:?}", self.state);
            return false;
        }
        self.frame_clock.reset();
        self.state = SceneState::Flying;
        log::info!("scene resumed");
        true
    }

    /// `Flying | Paused -> Stopped`. Halts rotors and the celebration
    /// synchronously; nothing scheduled fires afterwards.
    pub fn stop(&mut self) -> bool {
        if self.state == SceneState::Stopped {
            log::debug!("stop ignored: already stopped");
            return false;
        }
        self.celebration.cancel();
        if let Some(vehicle) = self.vehicle.as_mut() {
            vehicle.rotors.stop();
        }
        self.frame_clock.reset();
        self.state = SceneState::Stopped;
        self.apply_pending();
        log::info!("scene stopped");
        true
    }

    // -- Frame loop --

    /// Run one frame with a host-supplied elapsed time in seconds.
    pub fn advance(&mut self, elapsed: f32) {
        if self.state != SceneState::Flying {
            return;
        }
        let dt = self.frame_clock.advance(elapsed);
        self.step(dt);
    }

    /// Run one frame from an absolute host timestamp in seconds.
    pub fn advance_to(&mut self, timestamp: f64) {
        if self.state != SceneState::Flying {
            return;
        }
        let dt = self.frame_clock.advance_to(timestamp);
        self.step(dt);
    }

    fn step(&mut self, dt: f32) {
        self.apply_pending();
        let now = self.wall_clock.now();
        let params = MotionParams::from_config(&self.config);
        let offset = label::label_offset(&self.config.label);

        if let Some(vehicle) = self.vehicle.as_mut() {
            let step = motion::integrate(
                &mut vehicle.motion,
                vehicle.descriptor.speed,
                vehicle.descriptor.hover_amplitude,
                &params,
                dt,
            );
            vehicle.descriptor.position = step.position;

            if vehicle.rotors.sync(vehicle.descriptor.speed) == RotorSync::Parked {
                log::warn!("vehicle {:?} parked, rotors stopped", vehicle.descriptor.id);
            }
            vehicle.rotors.tick(dt);

            vehicle.label = label::update_label(
                vehicle.label,
                step.position,
                offset,
                step.direction_flipped,
                vehicle.motion.moving_right,
            );

            if !vehicle.impression_recorded {
                if let Some(ad) = vehicle.descriptor.ad.as_mut() {
                    if ad_gate::is_active(ad, now) {
                        ad.impression_count += 1;
                        vehicle.impression_recorded = true;
                    }
                }
            }
        }

        self.celebration.tick(dt);
    }

    // -- Input --

    /// Route a tap in scene coordinates. A hit raises `Interaction`; a hit on
    /// the banner also raises `AdTap` and counts a click. Any hit launches
    /// the celebration at the tap point.
    pub fn handle_tap(&mut self, point: Vec2) -> Option<HitTarget> {
        if self.state == SceneState::Stopped {
            log::debug!("tap ignored while stopped");
            return None;
        }
        let shape = self.vehicle_shape();
        let layout = self.label_layout();
        let target = hit_test::route_tap(point, shape.as_ref(), layout.as_ref())?;

        let vehicle = self.vehicle.as_mut()?;
        let id = vehicle.descriptor.id;
        if target == HitTarget::Label {
            if let Some(ad) = vehicle.descriptor.ad.as_mut() {
                ad.click_count += 1;
            }
        }

        self.emit(SceneEvent::Interaction(id));
        if target == HitTarget::Label {
            self.emit(SceneEvent::AdTap(id));
        }
        self.celebration.trigger(point);
        log::debug!("tap at ({:.1}, {:.1}) hit {:?}", point.x, point.y, target);
        Some(target)
    }

    /// Drain queued pointer input, treating each pointer-down as a tap.
    pub fn handle_input(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            if let Some(point) = event.tap_point() {
                self.handle_tap(point);
            }
        }
    }

    fn emit(&mut self, event: SceneEvent) {
        if let Some(listener) = self.listener.as_mut() {
            match event {
                SceneEvent::Interaction(id) => listener.on_interaction(id),
                SceneEvent::AdTap(id) => listener.on_ad_tap(id),
            }
        }
        self.events.push(event);
    }

    /// Take every event raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Reads --

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The current descriptor, including engine-owned position and ad counters.
    pub fn vehicle(&self) -> Option<&VehicleDescriptor> {
        self.vehicle.as_ref().map(|v| &v.descriptor)
    }

    /// Id of the selected vehicle, after any staged selection has landed.
    pub fn vehicle_id(&self) -> Option<VehicleId> {
        self.vehicle.as_ref().map(|v| v.descriptor.id)
    }

    pub fn label_state(&self) -> Option<LabelState> {
        self.vehicle.as_ref().map(|v| v.label)
    }

    pub fn is_moving_right(&self) -> Option<bool> {
        self.vehicle.as_ref().map(|v| v.motion.moving_right)
    }

    pub fn rotor_period(&self) -> Option<f32> {
        self.vehicle.as_ref().and_then(|v| v.rotors.period())
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn registry(&self) -> &SpriteRegistry {
        &self.registry
    }

    /// Ad to show right now, if the vehicle carries one inside its window.
    fn displayed_ad(&self, now: DateTime<Utc>) -> Option<&AdContent> {
        let vehicle = self.vehicle.as_ref()?;
        ad_gate::displayable(vehicle.descriptor.ad.as_ref(), now)
    }

    /// Hit shape of the vehicle, `None` when hidden or absent.
    fn vehicle_shape(&self) -> Option<VehicleShape> {
        let vehicle = self.vehicle.as_ref()?;
        vehicle.descriptor.visible.then(|| vehicle.shape())
    }

    /// Banner geometry, `None` when the vehicle is hidden or no ad is displayable.
    pub fn label_layout(&self) -> Option<LabelLayout> {
        let vehicle = self.vehicle.as_ref().filter(|v| v.descriptor.visible)?;
        let ad = self.displayed_ad(self.wall_clock.now())?;
        let offset = label::label_offset(&self.config.label);
        let center = vehicle.label.resolve(vehicle.descriptor.position, offset);
        Some(label::layout_label(
            ad_gate::banner_text(ad),
            center,
            vehicle.label.anchor,
            &self.config.label,
        ))
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let vehicle = self.vehicle.as_ref().map(|v| {
            let shape = v.shape();
            VehicleRender {
                id: v.descriptor.id,
                template: v.descriptor.template,
                position: v.descriptor.position,
                rotation: v.descriptor.rotation,
                scale: v.descriptor.scale,
                visible: v.descriptor.visible,
                is_moving_right: v.motion.moving_right,
                rotor_phases: v.rotors.angles().to_vec(),
                rotor_positions: v
                    .descriptor
                    .template
                    .rotor_mounts()
                    .iter()
                    .map(|&mount| shape.to_world(mount))
                    .collect(),
            }
        });

        let label = self.vehicle.as_ref().and_then(|v| {
            let ad = self.displayed_ad(self.wall_clock.now())?;
            let layout = self.label_layout()?;
            Some(LabelRender {
                text: ad_gate::banner_text(ad).to_string(),
                position: layout.center,
                size: layout.size,
                parent_space: v.label.parent_space,
                anchor: v.label.anchor,
                icon_position: layout.icon_center,
            })
        });

        let c = &self.celebration;
        RenderSnapshot {
            state: self.state,
            vehicle,
            label,
            celebration: CelebrationRender {
                phase: c.phase(),
                visible: c.is_visible(),
                position: c.position(),
                birth_rate: c.birth_rate(),
                particles: c
                    .particles()
                    .iter()
                    .map(|p| ParticleRender {
                        position: p.position,
                        angle: p.angle,
                        size: p.size,
                        color: p.color,
                        alpha: p.alpha(),
                    })
                    .collect(),
                procedural_texture: c.texture().is_procedural(),
            },
        }
    }

    /// Rebuild `buffer` from the current frame.
    pub fn render_into(&self, buffer: &mut RenderBuffer) {
        render::build_render_buffer(&self.snapshot(), &self.registry, self.celebration.texture(), buffer);
    }

    // -- Pending writes --

    fn apply_if_stopped(&mut self) {
        if self.state == SceneState::Stopped {
            self.apply_pending();
        }
    }

    fn apply_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);

        if let Some(descriptor) = pending.vehicle {
            self.install_vehicle(descriptor);
        }
        let Some(vehicle) = self.vehicle.as_mut() else {
            log::debug!("render hints dropped: no vehicle selected");
            return;
        };
        let d = &mut vehicle.descriptor;
        if let Some(speed) = pending.speed {
            d.speed = speed;
        }
        if let Some(rotation) = pending.rotation {
            d.rotation = rotation;
        }
        if let Some(scale) = pending.scale {
            d.scale = scale;
        }
        if let Some(visible) = pending.visible {
            d.visible = visible;
        }
    }

    fn install_vehicle(&mut self, descriptor: VehicleDescriptor) {
        let id = descriptor.id;
        if let Some(current) = self.vehicle.as_mut().filter(|v| v.descriptor.id == id) {
            current.update(descriptor);
            log::debug!("vehicle {:?} updated", id);
            return;
        }
        let hover_phase = self.vehicle.as_ref().map_or(0.0, |v| v.motion.hover_phase);
        self.vehicle = Some(ActiveVehicle::new(descriptor, hover_phase));
        log::info!("vehicle {:?} selected", id);
    }
}

impl Default for SceneController {
    fn default() -> Self {
        Self::build(SceneConfig::default())
    }
}
