use serde::Serialize;

/// Identifies which texture atlas a sprite belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct AtlasId(pub u32);

/// A cell (or block of cells) inside a texture atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteRef {
    pub atlas: AtlasId,
    pub col: f32,
    pub row: f32,
    /// Number of cells this sprite spans (1.0 = single cell).
    pub cell_span: f32,
}

impl Default for SpriteRef {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            col: 0.0,
            row: 0.0,
            cell_span: 1.0,
        }
    }
}
