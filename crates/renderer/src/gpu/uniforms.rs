use bytemuck::{Pod, Zeroable};

/// CPU-side mirror of the scene uniform block.
///
/// The layout matches the GLSL header injected by `compile::wrap_fragment`
/// and therefore must observe std140 alignment rules: `vec2` slots sit on
/// 8-byte boundaries and the whole block rounds up to 16 bytes.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct SceneUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub _pad0: f32,
    pub pointer: [f32; 2],
    pub _pad1: [f32; 2],
}

unsafe impl Zeroable for SceneUniforms {}
unsafe impl Pod for SceneUniforms {}

impl SceneUniforms {
    /// Prepares a uniform block sized to the current surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            time: 0.0,
            _pad0: 0.0,
            pointer: [0.0, 0.0],
            _pad1: [0.0, 0.0],
        }
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.time = seconds;
    }

    pub fn set_pointer(&mut self, pointer: [f32; 2]) {
        self.pointer = pointer;
    }
}
