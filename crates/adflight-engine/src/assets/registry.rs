use std::collections::HashMap;
use crate::assets::manifest::AssetManifest;
use crate::components::sprite::{AtlasId, SpriteRef};

/// Registry of named sprites, built from an AssetManifest.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteRef>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest. Sprites pointing at a
    /// missing atlas are skipped so lookups fall back instead of rendering garbage.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            if desc.atlas as usize >= manifest.atlases.len() {
                log::warn!("sprite '{}' references missing atlas {}", name, desc.atlas);
                continue;
            }
            sprites.insert(name.clone(), SpriteRef {
                atlas: AtlasId(desc.atlas),
                col: desc.col as f32,
                row: desc.row as f32,
                cell_span: desc.span as f32,
            });
        }
        Self { sprites }
    }

    pub fn insert(&mut self, name: impl Into<String>, sprite: SpriteRef) {
        self.sprites.insert(name.into(), sprite);
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SpriteRef> {
        self.sprites.get(name)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "fleet", "cols": 8, "rows": 4, "path": "fleet.png" }
            ],
            "sprites": {
                "spaceship": { "atlas": 0, "col": 3, "row": 1, "span": 2 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let reg = SpriteRegistry::from_manifest(&manifest);

        let ship = reg.get("spaceship").expect("spaceship should exist");
        assert_eq!(ship.atlas, AtlasId(0));
        assert_eq!(ship.col, 3.0);
        assert_eq!(ship.row, 1.0);
        assert_eq!(ship.cell_span, 2.0);
    }

    #[test]
    fn sprite_with_missing_atlas_is_skipped() {
        let json = r#"{ "atlases": [], "sprites": { "confetti": { "atlas": 2, "col": 0, "row": 0 } } }"#;
        let reg = SpriteRegistry::from_manifest(&AssetManifest::from_json(json).unwrap());
        assert!(reg.get("confetti").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SpriteRegistry::new();
        assert!(reg.get("nonexistent").is_none());
    }
}
