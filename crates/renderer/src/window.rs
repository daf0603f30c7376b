//! Windowed presentation path: winit event loop, pointer tracking, redraw
//! scheduling.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::gpu::GpuState;
use crate::RendererConfig;

/// Opens the preview window and drives the `winit` event loop.
///
/// A `WindowState` is created up-front and moved into the event loop
/// closure. Redraws are requested from `AboutToWait`, so presentation runs
/// at the compositor's pace.
pub(crate) fn run(config: &RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create preview window")?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window.clone(), config)?;
    state.window().request_redraw();

    event_loop
        .run(move |event, elwt| {
            // Drive redraws via vblank by waiting between events.
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            elwt.exit();
                        }
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    logical_key: Key::Named(NamedKey::Escape),
                                    state: ElementState::Pressed,
                                    ..
                                },
                            ..
                        } => {
                            elwt.exit();
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            state.pointer.handle_cursor_moved(position);
                        }
                        WindowEvent::MouseInput {
                            state: button_state,
                            button: MouseButton::Left,
                            ..
                        } => {
                            state.pointer.handle_button(button_state);
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(new_size);
                        }
                        WindowEvent::ScaleFactorChanged {
                            mut inner_size_writer,
                            ..
                        } => {
                            // Keep the current physical size when the scale factor changes.
                            let _ = inner_size_writer.request_inner_size(state.size());
                        }
                        WindowEvent::RedrawRequested => match state.render_frame() {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                state.resize(state.size());
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                tracing::error!("surface out of memory; exiting");
                                elwt.exit();
                            }
                            Err(other) => {
                                tracing::warn!(error = ?other, "surface error; retrying next frame");
                            }
                        },
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    // Schedule the next frame once winit is about to wait for events.
                    state.window().request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}

/// Aggregates the window handle, GPU state and pointer tracking.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    pointer: PointerState,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(
            window.as_ref(),
            size,
            &config.fragment_source,
            config.antialiasing,
        )?;

        Ok(Self {
            window,
            gpu,
            pointer: PointerState::default(),
        })
    }

    fn window(&self) -> &Window {
        self.window.as_ref()
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let pointer = self.pointer.as_uniform(self.size().height.max(1) as f32);
        self.gpu.render_frame(pointer)
    }
}

/// Tracks cursor drags so the shader receives the pointer uniform.
///
/// The scene treats the origin as the "no pointer" sentinel, so the uniform
/// is only populated while the left button is held; releasing it hands the
/// camera back to its autonomous orbit.
#[derive(Default)]
struct PointerState {
    position: Option<PhysicalPosition<f64>>,
    dragging: bool,
}

impl PointerState {
    /// Records the latest cursor position.
    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.position = Some(position);
    }

    /// Notes when the primary button transitions between pressed/released.
    fn handle_button(&mut self, state: ElementState) {
        self.dragging = matches!(state, ElementState::Pressed);
    }

    /// Produces the two floats of the pointer uniform, flipped to the
    /// bottom-left origin the scene works in.
    fn as_uniform(&self, height: f32) -> [f32; 2] {
        match self.position {
            Some(pos) if self.dragging => [pos.x as f32, height - pos.y as f32],
            _ => [0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_inactive_until_a_drag_starts() {
        let mut pointer = PointerState::default();
        pointer.handle_cursor_moved(PhysicalPosition::new(120.0, 40.0));
        assert_eq!(pointer.as_uniform(600.0), [0.0, 0.0]);

        pointer.handle_button(ElementState::Pressed);
        assert_eq!(pointer.as_uniform(600.0), [120.0, 560.0]);
    }

    #[test]
    fn releasing_the_button_restores_the_sentinel() {
        let mut pointer = PointerState::default();
        pointer.handle_button(ElementState::Pressed);
        pointer.handle_cursor_moved(PhysicalPosition::new(300.0, 200.0));
        assert_eq!(pointer.as_uniform(720.0), [300.0, 520.0]);

        pointer.handle_button(ElementState::Released);
        assert_eq!(pointer.as_uniform(720.0), [0.0, 0.0]);
    }

    #[test]
    fn pressing_without_a_position_reports_the_sentinel() {
        let mut pointer = PointerState::default();
        pointer.handle_button(ElementState::Pressed);
        assert_eq!(pointer.as_uniform(480.0), [0.0, 0.0]);
    }
}
