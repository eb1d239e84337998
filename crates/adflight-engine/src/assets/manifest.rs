use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::api::error::Result;

/// Atlases and named sprites the host has loaded for the scene.
/// Vehicle bodies are looked up by template sprite name, confetti by the
/// celebration texture name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub atlases: Vec<AtlasDescriptor>,
    /// Named sprite lookup: name → atlas index + cell coordinates.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    pub name: String,
    pub cols: u32,
    pub rows: u32,
    /// Relative path to the image file.
    pub path: String,
}

/// Describes a named sprite within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    pub col: u32,
    pub row: u32,
    #[serde(default = "default_span")]
    pub span: u32,
}

fn default_span() -> u32 {
    1
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vehicle_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "fleet", "cols": 8, "rows": 4, "path": "fleet.png" }
            ],
            "sprites": {
                "quadcopter": { "atlas": 0, "col": 0, "row": 0, "span": 2 },
                "confetti": { "atlas": 0, "col": 7, "row": 3 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.atlases.len(), 1);
        assert_eq!(manifest.sprites["quadcopter"].span, 2);
        assert_eq!(manifest.sprites["confetti"].span, 1);
    }

    #[test]
    fn empty_manifest_is_valid() {
        let manifest = AssetManifest::from_json("{}").unwrap();
        assert!(manifest.atlases.is_empty());
        assert!(manifest.sprites.is_empty());
    }
}
