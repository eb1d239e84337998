use bytemuck::{Pod, Zeroable};

/// What a render instance depicts. Stored as a float in the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InstanceKind {
    Body = 0,
    Rotor = 1,
    Label = 2,
    Particle = 3,
}

/// Per-instance render data read by a GPU host through a raw pointer.
/// 12 floats = 48 bytes stride.
///
/// `sprite_col`/`sprite_row` are -1 when no atlas sprite is registered and
/// the host should draw its fallback shape.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Negative when mirrored.
    pub scale_x: f32,
    pub scale_y: f32,
    pub alpha: f32,
    pub sprite_col: f32,
    pub sprite_row: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// `InstanceKind` as f32.
    pub kind: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat list of instances, rebuilt every frame.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn count_of(&self, kind: InstanceKind) -> usize {
        let k = kind as u8 as f32;
        self.instances.iter().filter(|i| i.kind == k).count()
    }

    /// The instances as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
