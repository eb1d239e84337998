//! Confetti texture resolution with a procedural fallback.

use glam::Vec2;
use serde::Serialize;

use crate::assets::registry::SpriteRegistry;
use crate::components::sprite::SpriteRef;

/// Side length of the generated fallback texture.
pub const STAR_TEXTURE_SIZE: u32 = 16;
const STAR_POINTS: u32 = 5;
const STAR_INNER_RATIO: f32 = 0.45;

/// Alpha mask of a star, row-major, one byte per texel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarTexture {
    pub size: u32,
    pub alpha: Vec<u8>,
}

impl StarTexture {
    /// Rasterize a `points`-pointed star centered in a `size`×`size` grid,
    /// sampling each texel at its center.
    pub fn generate(size: u32, points: u32, inner_ratio: f32) -> Self {
        let outer = size as f32 * 0.5;
        let inner = outer * inner_ratio;
        let polygon: Vec<Vec2> = (0..points * 2)
            .map(|i| {
                let r = if i % 2 == 0 { outer } else { inner };
                let theta = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / points as f32;
                Vec2::new(outer + r * theta.cos(), outer + r * theta.sin())
            })
            .collect();

        let mut alpha = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                alpha.push(if point_in_polygon(p, &polygon) { 255 } else { 0 });
            }
        }
        Self { size, alpha }
    }

    pub fn texel(&self, x: u32, y: u32) -> u8 {
        self.alpha[(y * self.size + x) as usize]
    }
}

/// Even-odd rule.
fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Texture used to draw confetti.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParticleTexture {
    Atlas(SpriteRef),
    Procedural(StarTexture),
}

impl ParticleTexture {
    /// Use the named sprite if the host registered one, otherwise generate a star.
    pub fn resolve(registry: &SpriteRegistry, name: &str) -> Self {
        match registry.get(name) {
            Some(sprite) => Self::Atlas(*sprite),
            None => {
                log::warn!("particle texture '{}' not found, using generated star", name);
                Self::Procedural(StarTexture::generate(STAR_TEXTURE_SIZE, STAR_POINTS, STAR_INNER_RATIO))
            }
        }
    }

    pub fn is_procedural(&self) -> bool {
        matches!(self, Self::Procedural(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_is_filled_at_center_and_empty_at_corners() {
        let star = StarTexture::generate(16, 5, 0.45);
        assert_eq!(star.alpha.len(), 256);
        assert_eq!(star.texel(8, 8), 255);
        assert_eq!(star.texel(0, 0), 0);
        assert_eq!(star.texel(15, 15), 0);
        assert_eq!(star.texel(15, 0), 0);
    }

    #[test]
    fn star_top_point_reaches_upper_edge() {
        let star = StarTexture::generate(16, 5, 0.45);
        let top_row_hits = (0..16).filter(|&x| star.texel(x, 1) > 0).count();
        assert!(top_row_hits > 0);
    }

    #[test]
    fn missing_asset_falls_back_to_star() {
        let texture = ParticleTexture::resolve(&SpriteRegistry::new(), "confetti");
        assert!(texture.is_procedural());
    }

    #[test]
    fn registered_asset_is_used() {
        let mut registry = SpriteRegistry::new();
        registry.insert("confetti", SpriteRef { col: 4.0, ..Default::default() });
        match ParticleTexture::resolve(&registry, "confetti") {
            ParticleTexture::Atlas(sprite) => assert_eq!(sprite.col, 4.0),
            other => panic!("expected atlas texture, got {:?}", other),
        }
    }
}
