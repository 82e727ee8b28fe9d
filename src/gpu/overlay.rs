//! The egui control panel, painted over the galaxy.

use winit::window::Window;

/// Tessellated panel for one frame.
pub struct PanelFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
}

/// egui context plus its winit input state and wgpu painter.
pub struct PanelOverlay {
    ctx: egui::Context,
    winit_state: egui_winit::State,
    painter: egui_wgpu::Renderer,
}

impl PanelOverlay {
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();
        let mut visuals = egui::Visuals::dark();
        visuals.window_shadow = egui::Shadow::NONE;
        visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_visuals(visuals);

        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        // Surface has no depth buffer and a single sample
        let painter = egui_wgpu::Renderer::new(device, target_format, None, 1, false);

        Self {
            ctx,
            winit_state,
            painter,
        }
    }

    /// Feed a window event to egui. Returns true if the panel consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// The pointer is over the panel or dragging one of its widgets, so
    /// presses must not orbit the camera or highlight points.
    pub fn blocks_pointer(&self) -> bool {
        self.ctx.is_pointer_over_area() || self.ctx.wants_pointer_input()
    }

    /// Run one UI pass and tessellate the result.
    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) -> PanelFrame {
        let input = self.winit_state.take_egui_input(window);
        let output = self.ctx.run(input, build);
        self.winit_state
            .handle_platform_output(window, output.platform_output);

        PanelFrame {
            paint_jobs: self.ctx.tessellate(output.shapes, output.pixels_per_point),
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Record the panel on top of `view`.
    ///
    /// Returns command buffers egui paint callbacks asked for; submit them
    /// before `encoder`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        frame: &PanelFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };

        for (id, delta) in &frame.textures_delta.set {
            self.painter.update_texture(device, queue, *id, delta);
        }
        let callback_buffers =
            self.painter
                .update_buffers(device, queue, encoder, &frame.paint_jobs, &screen);

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Panel Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.painter.render(&mut pass, &frame.paint_jobs, &screen);
        }

        // Only after this frame's jobs are recorded
        for id in &frame.textures_delta.free {
            self.painter.free_texture(id);
        }

        callback_buffers
    }
}
