//! GPU orchestration for the single-pipeline scene renderer.
//!
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the window resizes.
//! - `pipeline` compiles the wrapped GLSL into a render pipeline with a
//!   single uniform bind group layout.
//! - `uniforms` mirrors the std140 scene block and writes changes straight
//!   through the queue each frame.
//! - `state` glues everything together and exposes the `GpuState` API used
//!   by `window`.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
