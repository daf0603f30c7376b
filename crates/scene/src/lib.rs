//! CPU-side evaluator for the pulsegrid scene.
//!
//! The scene is an infinite lattice of chamfered wireframe box frames that
//! breathe, wobble and flash to a one-second beat. The GPU renders it from the
//! GLSL body in `shaders/scene.frag`; this crate implements the identical
//! algorithm as a pure function over `(pixel, resolution, time, pointer)` so
//! the same frame can be produced without a GPU — for still exports, for
//! regression tests, and as the reference for what the fragment shader must
//! compute.
//!
//! Evaluation is stateless: [`SceneEvaluator::new`] snapshots the per-frame
//! quantities (camera basis, lattice spacing, beat amplitude) from a
//! [`FrameInput`], after which [`SceneEvaluator::shade`] maps any pixel
//! coordinate to a color with no shared mutable state, so whole frames can be
//! filled in parallel (see [`render_rgba8`]).

use glam::Vec2;

mod camera;
mod clock;
mod evaluator;
mod field;
mod frame;
mod math;

pub use camera::{CameraAngles, CameraRig, PointerInput};
pub use clock::SceneClock;
pub use evaluator::SceneEvaluator;
pub use field::{box_frame, displacement, DistanceField};
pub use frame::render_rgba8;

/// GLSL twin of this crate, compiled by the renderer into the fragment stage.
pub const FRAGMENT_SHADER: &str = include_str!("../shaders/scene.frag");

/// Upper bound on sphere-tracing iterations per ray.
pub const MAX_STEPS: u32 = 100;
/// Rays that accumulate this much travel are treated as misses.
pub const MAX_DIST: f32 = 100.0;
/// Surface thickness below which a march step counts as a hit.
pub const SURF_DIST: f32 = 1e-3;

/// Inputs the driver snapshots once per frame. Clock, pointer and resolution
/// are owned by the host loop; the evaluator only reads them.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Render-target size in pixels.
    pub resolution: Vec2,
    /// Seconds since the driver started its loop.
    pub time: f32,
    /// Latest pointer sample, already classified as active or absent.
    pub pointer: PointerInput,
}

impl FrameInput {
    pub fn new(resolution: Vec2, time: f32, pointer: PointerInput) -> Self {
        Self {
            resolution,
            time,
            pointer,
        }
    }
}
