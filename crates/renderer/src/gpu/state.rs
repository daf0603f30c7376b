use std::time::{Duration, Instant};

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::Antialiasing;

use super::context::GpuContext;
use super::pipeline::ScenePipeline;
use super::uniforms::SceneUniforms;

/// Aggregates every GPU resource needed to present a frame.
///
/// The layout mirrors the lifetime relationship between objects:
///
/// ```text
///   Window ─┐
///           ├─▶ Surface ─▶ Device ─▶ Queue
///           │                 │
///           │                 ├─▶ RenderPipeline
///           │                 ├─▶ Uniform buffer / bind group
///           │                 └─▶ Optional MSAA color target
/// ```
pub(crate) struct GpuState {
    context: GpuContext,
    pipeline: ScenePipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    multisample_target: Option<MultisampleTarget>,
    /// CPU copy of the uniform data mirrored into the buffer each frame.
    uniforms: SceneUniforms,
    /// Instant captured when the first frame renders; drives the scene clock.
    start_time: Instant,
    /// Monotonic frame counter.
    frame_count: u32,
    /// Used to throttle debug logging.
    last_log_time: Instant,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        fragment_source: &str,
        antialiasing: Antialiasing,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size, antialiasing)?;
        let pipeline = ScenePipeline::new(
            &context.device,
            context.surface_format,
            context.sample_count,
            fragment_source,
        )?;

        let uniforms = SceneUniforms::new(context.size.width, context.size.height);
        let uniform_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("uniform buffer"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let uniform_bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("uniform bind group"),
                layout: &pipeline.uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        let multisample_target = MultisampleTarget::for_context(&context);

        Ok(Self {
            context,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            multisample_target,
            uniforms,
            start_time: Instant::now(),
            frame_count: 0,
            last_log_time: Instant::now(),
        })
    }

    /// Current swapchain size in physical pixels.
    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    /// Reacts to platform resize events by updating the swapchain, the MSAA
    /// target and the resolution uniform.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if !self.context.resize(new_size) {
            return;
        }
        self.multisample_target = MultisampleTarget::for_context(&self.context);
        self.uniforms
            .set_resolution(new_size.width as f32, new_size.height as f32);
    }

    /// Advances the scene clock, mirrors the uniforms to the GPU and submits
    /// one frame.
    pub(crate) fn render_frame(&mut self, pointer: [f32; 2]) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms(pointer);

        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render encoder"),
                });

        let (attachment_view, resolve_target) = match &self.multisample_target {
            Some(msaa) => (&msaa.view, Some(&view)),
            None => (&view, None),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: attachment_view,
                    depth_slice: None,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn update_uniforms(&mut self, pointer: [f32; 2]) {
        let now = Instant::now();
        if self.frame_count == 0 {
            self.start_time = now;
        }
        let elapsed = now.duration_since(self.start_time);

        self.uniforms.set_time(elapsed.as_secs_f32());
        self.uniforms.set_pointer(pointer);
        self.frame_count = self.frame_count.saturating_add(1);
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        if now.duration_since(self.last_log_time) >= Duration::from_secs(1) {
            tracing::debug!(
                time = self.uniforms.time,
                frame = self.frame_count,
                pointer_x = pointer[0],
                pointer_y = pointer[1],
                width = self.context.size.width,
                height = self.context.size.height,
                "frame stats"
            );
            self.last_log_time = now;
        }
    }
}

/// Offscreen multisampled color buffer resolved into the swapchain.
struct MultisampleTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl MultisampleTarget {
    fn for_context(context: &GpuContext) -> Option<Self> {
        if context.sample_count <= 1 {
            return None;
        }
        Some(Self::new(
            &context.device,
            context.surface_format,
            context.size,
            context.sample_count,
        ))
    }

    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pulsegrid msaa color"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}
