//! Renderer crate for pulsegrid.
//!
//! The module glues the preview window, the `wgpu` pipeline, and the scene
//! fragment shader together. The overall flow is:
//!
//! ```text
//!   CLI / pulsegrid
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ window::run ──▶ winit event loop ──▶ render_frame()
//!          ▲                                     │
//!          │                                     └─▶ update_uniforms() ─▶ GPU UBO
//! ```
//!
//! [`gpu::GpuState`] owns every GPU resource (surface, device, pipeline,
//! uniform buffer); `Renderer` is the thin entry point that validates the
//! configuration and hands it to the event loop. The fragment shader body is
//! wrapped at compile time so it can be fed the `{resolution, time, pointer}`
//! uniform block the window loop refreshes each frame.

mod compile;
mod gpu;
mod window;

use anyhow::Result;

/// Anti-aliasing policy for the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Antialiasing {
    /// Pick the highest sample count supported by the surface format.
    Auto,
    /// Disable MSAA and render directly into the swapchain.
    Off,
    /// Request a specific MSAA sample count (clamped to what the device supports).
    Samples(u32),
}

impl Default for Antialiasing {
    fn default() -> Self {
        Self::Auto
    }
}

/// Immutable configuration passed to the renderer at start-up.
#[derive(Clone)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Title of the preview window.
    pub window_title: String,
    /// Anti-aliasing mode requested by the caller.
    pub antialiasing: Antialiasing,
    /// GLSL fragment body declaring `mainImage(out vec4, in vec2)`.
    pub fragment_source: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            window_title: "pulsegrid".to_string(),
            antialiasing: Antialiasing::default(),
            fragment_source: String::new(),
        }
    }
}

/// High-level entry point that owns the chosen configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the window and drives the event loop until the user closes it.
    ///
    /// Setup failures (no adapter, shader compile error) are fatal and
    /// surface here before the first frame; per-frame surface hiccups are
    /// handled inside the loop.
    pub fn run(&self) -> Result<()> {
        anyhow::ensure!(
            !self.config.fragment_source.is_empty(),
            "renderer started without a fragment shader body"
        );
        window::run(&self.config)
    }
}
