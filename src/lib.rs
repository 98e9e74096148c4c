use std::sync::Arc;
use winit::window::{CursorGrabMode, Window};

pub mod config;
pub mod error;
pub mod model;
pub mod renderer;
pub mod scene;

pub use config::{Args, DemoConfig};
pub use error::{DemoError, ResourceKind, Result};
pub use scene::FrameSignal;

use glam::Vec3;
use renderer::Renderer;
use scene::{camera::Camera, PointLight, Scene};

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Uninitialized,
    Ready,
    Updating,
    Rendering,
    Disposed,
}

impl FrameState {
    pub fn begin_update(self) -> Result<Self> {
        match self {
            FrameState::Ready | FrameState::Updating | FrameState::Rendering => Ok(FrameState::Updating),
            other => Err(DemoError::graphics(format!("cannot update in state {:?}", other))),
        }
    }

    pub fn begin_render(self) -> Result<Self> {
        match self {
            FrameState::Ready | FrameState::Updating | FrameState::Rendering => Ok(FrameState::Rendering),
            other => Err(DemoError::graphics(format!("cannot render in state {:?}", other))),
        }
    }

    pub fn is_live(self) -> bool {
        !matches!(self, FrameState::Uninitialized | FrameState::Disposed)
    }
}

pub struct State {
    window: Arc<Window>,
    pub scene: Scene,
    renderer: Renderer,
    frame_state: FrameState,
}

impl State {
    /// One-time setup: GPU context, shader program, textures, quad upload, camera.
    pub fn new(window: Window, config: &DemoConfig) -> Result<Self> {
        let window = Arc::new(window);
        let size = window.inner_size();

        log::info!("Creating WGPU instance...");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            flags: wgpu::InstanceFlags::from_build_config(),
            ..Default::default()
        });

        log::info!("Window info - width: {}, height: {}", size.width, size.height);
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| DemoError::graphics(format!("failed to create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| DemoError::graphics("no compatible adapter found"))?;

        let info = adapter.get_info();
        log::info!("Using adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Primary Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| DemoError::graphics(format!("failed to create device: {e}")))?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| DemoError::graphics("surface reports no formats"))?;
        log::info!("Selected surface format: {:?}", surface_format);

        let wanted = config.present_mode();
        let present_mode = if surface_caps.present_modes.contains(&wanted) {
            wanted
        } else {
            wgpu::PresentMode::Fifo
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let renderer = Renderer::new(device, queue, &surface_config, surface, config)?;

        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 3.0),
            surface_config.width as f32 / surface_config.height as f32,
        );
        let light = if config.orbit_light {
            PointLight::orbiting(config.light_position)
        } else {
            PointLight::fixed(config.light_position)
        };
        let scene = Scene::new(camera, light, config.quad_size);

        let state = Self {
            window,
            scene,
            renderer,
            frame_state: FrameState::Ready,
        };
        state.grab_cursor();
        Ok(state)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn frame_state(&self) -> FrameState {
        self.frame_state
    }

    fn grab_cursor(&self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Locked));
        if let Err(e) = grabbed {
            log::warn!("Could not grab cursor: {}", e);
        }
        self.window.set_cursor_visible(false);
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.scene.set_focused(focused);
        if focused {
            self.grab_cursor();
        }
    }

    pub fn update(&mut self) -> Result<FrameSignal> {
        self.frame_state = self.frame_state.begin_update()?;
        Ok(self.scene.tick())
    }

    pub fn render(&mut self) -> Result<()> {
        self.frame_state = self.frame_state.begin_render()?;
        self.renderer.render(&self.scene)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 && self.frame_state.is_live() {
            self.renderer.resize(width, height);
            self.scene.resize(width, height);
        }
    }

    pub fn dispose(&mut self) {
        if self.frame_state == FrameState::Disposed {
            log::warn!("State already disposed");
            return;
        }
        self.renderer.dispose();
        self.frame_state = FrameState::Disposed;
    }
}
