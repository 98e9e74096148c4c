pub mod camera;
pub mod input;
pub mod light;
pub mod transform;
#[cfg(test)]
mod tests;

pub use camera::Camera;
pub use input::{InputState, MouseLook, Movement};
pub use light::PointLight;
pub use transform::Transform;

use std::time::Instant;
use winit::keyboard::KeyCode;

/// Scale of the flat-colored quad drawn at the light position.
pub const LIGHT_MARKER_SCALE: f32 = 0.1;

/// What the host loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSignal {
    Continue,
    CloseRequested,
}

pub struct Scene {
    pub camera: Camera,
    pub light: PointLight,
    pub input: InputState,
    mouse_look: MouseLook,
    ground: Transform,
    last_update: Instant,
}

impl Scene {
    pub fn new(camera: Camera, light: PointLight, quad_size: f32) -> Self {
        Self {
            camera,
            light,
            input: InputState::new(),
            mouse_look: MouseLook::new(),
            ground: Transform::at(glam::Vec3::ZERO, quad_size),
            last_update: Instant::now(),
        }
    }

    /// Updates with the wall-clock time since the previous tick.
    pub fn tick(&mut self) -> FrameSignal {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        self.update(dt)
    }

    pub fn update(&mut self, dt: f32) -> FrameSignal {
        self.light.advance(dt);

        // A tap that went down and up between two frames still counts.
        let escape = self.input.was_pressed(KeyCode::Escape) || self.input.is_held(KeyCode::Escape);
        self.input.clear_pressed();

        if !self.input.is_focused() {
            return FrameSignal::Continue;
        }

        if escape {
            return FrameSignal::CloseRequested;
        }

        for movement in self.input.held_movements() {
            self.camera.translate(movement, dt);
        }

        if let Some(cursor) = self.input.cursor() {
            let delta = self.mouse_look.sample(cursor);
            self.camera.process_mouse(delta.x, delta.y);
        }

        let wheel = self.input.take_wheel();
        if wheel != 0.0 {
            self.camera.zoom(wheel);
        }

        FrameSignal::Continue
    }

    /// Regaining focus re-primes mouse look so the cursor travel made
    /// elsewhere is not applied to the camera.
    pub fn set_focused(&mut self, focused: bool) {
        self.input.set_focused(focused);
        if focused {
            self.mouse_look = MouseLook::new();
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    pub fn ground_transform(&self) -> Transform {
        self.ground
    }

    pub fn light_marker_transform(&self) -> Transform {
        Transform::at(self.light.position, LIGHT_MARKER_SCALE)
    }
}
