use crate::assets::registry::SpriteRegistry;
use crate::components::sprite::SpriteRef;
use crate::renderer::instance::{InstanceKind, RenderBuffer, RenderInstance};
use crate::renderer::snapshot::RenderSnapshot;
use crate::systems::effects::ParticleTexture;

/// Registry name of the rotor blade sprite.
pub const ROTOR_SPRITE: &str = "rotor";
/// Registry name of the banner background sprite.
pub const BANNER_SPRITE: &str = "banner";

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Sprite cell for an instance, or (-1, -1) so the host draws a fallback shape.
fn cell(sprite: Option<&SpriteRef>) -> (f32, f32) {
    sprite.map_or((-1.0, -1.0), |s| (s.col, s.row))
}

fn instance(kind: InstanceKind, x: f32, y: f32, sprite: (f32, f32), color: [f32; 3]) -> RenderInstance {
    RenderInstance {
        x,
        y,
        scale_x: 1.0,
        scale_y: 1.0,
        alpha: 1.0,
        sprite_col: sprite.0,
        sprite_row: sprite.1,
        r: color[0],
        g: color[1],
        b: color[2],
        kind: kind as u8 as f32,
        ..Default::default()
    }
}

/// Build the flat instance buffer from a frame snapshot.
/// Draw order: body, rotors, banner, confetti.
pub fn build_render_buffer(
    snapshot: &RenderSnapshot,
    registry: &SpriteRegistry,
    confetti: &ParticleTexture,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    if let Some(v) = snapshot.vehicle.as_ref().filter(|v| v.visible) {
        let mirror = if v.is_moving_right { 1.0 } else { -1.0 };
        buffer.push(RenderInstance {
            rotation: v.rotation,
            scale_x: v.scale * mirror,
            scale_y: v.scale,
            ..instance(
                InstanceKind::Body,
                v.position.x,
                v.position.y,
                cell(registry.get(v.template.sprite_name())),
                WHITE,
            )
        });

        let rotor = cell(registry.get(ROTOR_SPRITE));
        for (pos, phase) in v.rotor_positions.iter().zip(&v.rotor_phases) {
            buffer.push(RenderInstance {
                rotation: v.rotation + phase,
                scale_x: v.scale,
                scale_y: v.scale,
                ..instance(InstanceKind::Rotor, pos.x, pos.y, rotor, WHITE)
            });
        }
    }

    if let Some(label) = &snapshot.label {
        buffer.push(RenderInstance {
            scale_x: label.size.x,
            scale_y: label.size.y,
            ..instance(
                InstanceKind::Label,
                label.position.x,
                label.position.y,
                cell(registry.get(BANNER_SPRITE)),
                WHITE,
            )
        });
    }

    let c = &snapshot.celebration;
    if c.visible {
        let sprite = match confetti {
            ParticleTexture::Atlas(sprite) => cell(Some(sprite)),
            ParticleTexture::Procedural(_) => cell(None),
        };
        for p in &c.particles {
            buffer.push(RenderInstance {
                rotation: p.angle,
                scale_x: p.size,
                scale_y: p.size,
                alpha: p.alpha,
                ..instance(InstanceKind::Particle, p.position.x, p.position.y, sprite, p.color)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::VehicleId;
    use crate::components::label::{AnchorSide, ParentSpace};
    use crate::components::vehicle::VisualTemplate;
    use crate::core::scene::SceneState;
    use crate::renderer::snapshot::{CelebrationRender, LabelRender, ParticleRender, VehicleRender};
    use crate::systems::celebration::CelebrationPhase;
    use glam::Vec2;

    fn snapshot(moving_right: bool) -> RenderSnapshot {
        RenderSnapshot {
            state: SceneState::Flying,
            vehicle: Some(VehicleRender {
                id: VehicleId(1),
                template: VisualTemplate::CargoDrone,
                position: Vec2::new(100.0, 200.0),
                rotation: 0.0,
                scale: 2.0,
                visible: true,
                is_moving_right: moving_right,
                rotor_phases: vec![0.5, 1.0],
                rotor_positions: vec![Vec2::new(32.0, 160.0), Vec2::new(168.0, 160.0)],
            }),
            label: Some(LabelRender {
                text: "Acme".into(),
                position: Vec2::new(100.0, 170.0),
                size: Vec2::new(60.0, 22.0),
                parent_space: ParentSpace::AttachedToVehicle,
                anchor: AnchorSide::Right,
                icon_position: Vec2::new(117.0, 170.0),
            }),
            celebration: CelebrationRender {
                phase: CelebrationPhase::BurstActive,
                visible: true,
                position: Vec2::ZERO,
                birth_rate: 240.0,
                particles: vec![ParticleRender {
                    position: Vec2::new(5.0, 5.0),
                    angle: 0.3,
                    size: 6.0,
                    color: [1.0, 0.0, 0.0],
                    alpha: 0.5,
                }],
                procedural_texture: true,
            },
        }
    }

    #[test]
    fn emits_body_rotors_label_and_particles() {
        let registry = SpriteRegistry::new();
        let confetti = ParticleTexture::resolve(&registry, "confetti");
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&snapshot(true), &registry, &confetti, &mut buffer);

        assert_eq!(buffer.instance_count(), 5);
        assert_eq!(buffer.count_of(InstanceKind::Body), 1);
        assert_eq!(buffer.count_of(InstanceKind::Rotor), 2);
        assert_eq!(buffer.count_of(InstanceKind::Label), 1);
        assert_eq!(buffer.count_of(InstanceKind::Particle), 1);
        // No sprites registered: every instance asks for a fallback.
        assert!(buffer.instances.iter().all(|i| i.sprite_col == -1.0));
        assert_eq!(buffer.instances[4].alpha, 0.5);
    }

    #[test]
    fn left_heading_mirrors_body() {
        let mut registry = SpriteRegistry::new();
        registry.insert("cargo_drone", SpriteRef { col: 3.0, row: 1.0, ..Default::default() });
        let confetti = ParticleTexture::resolve(&registry, "confetti");
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&snapshot(false), &registry, &confetti, &mut buffer);

        let body = buffer.instances[0];
        assert_eq!(body.scale_x, -2.0);
        assert_eq!(body.scale_y, 2.0);
        assert_eq!((body.sprite_col, body.sprite_row), (3.0, 1.0));
    }

    #[test]
    fn hidden_vehicle_and_idle_celebration_are_skipped() {
        let mut snap = snapshot(true);
        if let Some(v) = snap.vehicle.as_mut() {
            v.visible = false;
        }
        snap.label = None;
        snap.celebration.visible = false;

        let registry = SpriteRegistry::new();
        let confetti = ParticleTexture::resolve(&registry, "confetti");
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&snap, &registry, &confetti, &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }
}
