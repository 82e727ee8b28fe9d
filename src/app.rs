//! Window, event dispatch and the per-frame loop.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::error::AppError;
use crate::gpu::{GpuState, PanelOverlay};
use crate::highlight::{HighlightRequest, Viewport};
use crate::input::{Input, MouseButton};
use crate::params::GalaxyParameters;
use crate::point_cloud::PointCloud;
use crate::scene::{Scene, SceneCommand, SceneEvent};
use crate::ui::{ControlPanel, PanelResponse};

pub const WINDOW_TITLE: &str = "Galaxy Generator";
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Open the viewer and block until the window closes.
pub fn run(params: GalaxyParameters, params_path: PathBuf) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(params, params_path);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Window-bound state, created once the event loop resumes.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuState,
    overlay: PanelOverlay,
}

struct App {
    graphics: Option<Graphics>,
    scene: Scene,
    panel: ControlPanel,
    camera: Camera,
    input: Input,
    viewport: Viewport,
    /// The current left press started over the galaxy, not the panel.
    scene_press: bool,
    /// The current right press started over the galaxy.
    pan_press: bool,
    /// Scene generation currently on the GPU.
    uploaded_generation: u64,
    error: Option<AppError>,
}

impl App {
    fn new(params: GalaxyParameters, params_path: PathBuf) -> Self {
        let mut scene = Scene::with_entropy();
        scene.regenerate(&params);

        Self {
            graphics: None,
            scene,
            panel: ControlPanel::new(params, params_path),
            camera: Camera::new(WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32),
            input: Input::new(),
            viewport: Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT, 1.0),
            scene_press: false,
            pan_press: false,
            uploaded_generation: 0,
            error: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<Graphics, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        self.viewport = Viewport::new(size.width, size.height, window.scale_factor() as f32);
        self.camera.set_aspect(size.width, size.height);

        let gpu = pollster::block_on(GpuState::new(window.clone(), self.viewport.pixel_ratio()))?;
        let overlay = PanelOverlay::new(gpu.device(), gpu.surface_format(), &window);

        Ok(Graphics {
            window,
            gpu,
            overlay,
        })
    }

    /// Rebuild the cloud from the panel's parameters.
    fn regenerate(&mut self) {
        // Release the old GPU buffers before the new cloud is built
        if let Some(g) = &mut self.graphics {
            g.gpu.clear_cloud();
        }
        let params = self.panel.params().clone();
        if let SceneEvent::Regenerated { generation, count } =
            self.scene.apply(SceneCommand::ParametersChanged(params))
        {
            log::debug!("scene generation {} has {} points", generation, count);
        }
    }

    /// Turn this frame's pointer input into camera moves and clicks.
    fn handle_pointer(&mut self, over_ui: bool) {
        if self.input.mouse_pressed(MouseButton::Left) {
            self.scene_press = !over_ui;
        }

        if self.scene_press && self.input.mouse_held(MouseButton::Left) {
            let delta = self.input.mouse_delta();
            self.camera.rotate(delta.x, delta.y, self.viewport.height as f32);
        }

        if self.input.mouse_pressed(MouseButton::Right) {
            self.pan_press = !over_ui;
        }
        if self.pan_press && self.input.mouse_held(MouseButton::Right) {
            let delta = self.input.mouse_delta();
            self.camera.pan(delta.x, delta.y, self.viewport.height as f32);
        }
        if self.input.mouse_released(MouseButton::Right) {
            self.pan_press = false;
        }

        if self.input.mouse_released(MouseButton::Left) {
            if self.scene_press && !over_ui {
                self.highlight_at_cursor();
            }
            self.scene_press = false;
        }

        let scroll = self.input.scroll_delta();
        if scroll != 0.0 && !over_ui {
            self.camera.zoom(scroll);
        }

        self.input.begin_frame();
    }

    fn highlight_at_cursor(&mut self) {
        let request = HighlightRequest {
            point: self.input.screen_point(),
            viewport: self.viewport,
            camera: &self.camera,
            neighbors: self.panel.neighbors(),
        };
        let command = SceneCommand::Highlight {
            ray: request.ray(),
            neighbors: request.neighbors,
        };
        if let SceneEvent::Unchanged = self.scene.apply(command) {
            log::debug!("click with no points to highlight");
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let over_ui = self
            .graphics
            .as_ref()
            .is_some_and(|g| g.overlay.blocks_pointer());
        self.handle_pointer(over_ui);
        self.camera.update();

        let Some(g) = self.graphics.as_mut() else {
            return;
        };

        let point_count = self.scene.cloud().map_or(0, PointCloud::len);
        let panel = &mut self.panel;
        let mut response = PanelResponse::default();
        let panel_frame = g.overlay.run(&g.window, |ctx| {
            response = panel.show(ctx, point_count);
        });

        if response.regenerate {
            self.regenerate();
        }

        let Some(g) = self.graphics.as_mut() else {
            return;
        };

        if self.scene.generation() != self.uploaded_generation {
            match self.scene.cloud_mut() {
                Some(cloud) => g.gpu.replace_cloud(cloud),
                None => g.gpu.clear_cloud(),
            }
            self.uploaded_generation = self.scene.generation();
        } else if let Some(cloud) = self.scene.cloud_mut() {
            g.gpu.sync_colors(cloud);
        }

        let point_size = self.panel.params().size;
        match g.gpu.render(&self.camera, point_size, &mut g.overlay, &panel_frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }

        g.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(g) = &mut self.graphics {
            g.overlay.on_window_event(&g.window, &event);
        }
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.viewport.width = physical_size.width;
                self.viewport.height = physical_size.height;
                self.camera.set_aspect(physical_size.width, physical_size.height);
                if let Some(g) = &mut self.graphics {
                    g.gpu.resize(physical_size, self.viewport.pixel_ratio());
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.viewport.scale_factor = scale_factor as f32;
                if let Some(g) = &mut self.graphics {
                    let size = g.window.inner_size();
                    g.gpu.resize(size, self.viewport.pixel_ratio());
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
