use std::sync::Arc;

use fia_core::game_loop::FrameRenderer;
use fia_core::world::{FrameSnapshot, Viewport};
use winit::window::Window;

use crate::gpu_context::{GpuContext, RenderError};
use crate::hud::{Hud, CLEAR_COLOR};

/// Draws game frames into the window surface. Lives on the game loop thread
/// while the loop runs.
///
/// The window handle goes into the surface at construction and is never
/// touched again: window queries from the loop thread can block on the main
/// thread, which may itself be waiting in `GameLoop::stop`. Size and scale
/// factor come from the frame's [`Viewport`] instead.
pub struct SceneRenderer {
    gpu: GpuContext,
    hud: Hud,
    frames_presented: u64,
}

impl SceneRenderer {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let gpu = GpuContext::new(window)?;
        let hud = Hud::new(&gpu.device, gpu.surface_format);
        Ok(Self {
            gpu,
            hud,
            frames_presented: 0,
        })
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Follow window resizes. Returns false while the window has no area
    /// (minimized), in which case nothing should be drawn.
    fn sync_surface_size(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() {
            return false;
        }
        if viewport.size() != self.gpu.size {
            self.gpu.resize(viewport.width, viewport.height);
            log::info!("Surface resized to {}x{}", viewport.width, viewport.height);
        }
        true
    }
}

impl FrameRenderer for SceneRenderer {
    fn render(&mut self, frame: &FrameSnapshot) {
        if !self.sync_surface_size(frame.viewport) {
            return;
        }
        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let pixels_per_point = frame.viewport.scale_factor;
        let (primitives, textures_delta) = self.hud.prepare(frame, self.gpu.size, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.hud.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.hud
                .paint(&mut render_pass, &primitives, &screen_descriptor);
        }

        self.hud.cleanup(&textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.frames_presented += 1;
    }
}
