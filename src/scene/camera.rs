use glam::{Mat4, Vec3};

use super::input::Movement;

/// Movement speed in world units per second.
pub const SPEED: f32 = 15.0;
/// Degrees of rotation per unit of mouse travel.
pub const MOUSE_SENSITIVITY: f32 = 0.2;
pub const PITCH_LIMIT: f32 = 89.0;
pub const FOV_MIN: f32 = 1.0;
pub const FOV_MAX: f32 = 45.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,   // Rotation around Y axis, degrees
    pub pitch: f32, // Rotation around X axis, degrees
    pub fov: f32,   // Vertical field of view, degrees
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `position` looking down -Z.
    pub fn new(position: Vec3, aspect: f32) -> Self {
        Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            fov: FOV_MAX,
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn front(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    /// Perspective with a 0..1 depth range, as wgpu expects.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(FOV_MIN, FOV_MAX);
    }

    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * MOUSE_SENSITIVITY;
        self.set_pitch(self.pitch - dy * MOUSE_SENSITIVITY);
    }

    /// Scrolling up narrows the view.
    pub fn zoom(&mut self, wheel_offset: f32) {
        self.set_fov(self.fov - wheel_offset);
    }

    pub fn translate(&mut self, movement: Movement, dt: f32) {
        let velocity = SPEED * dt;
        match movement {
            Movement::Forward => self.position += self.front() * velocity,
            Movement::Backward => self.position -= self.front() * velocity,
            Movement::Right => self.position += self.right() * velocity,
            Movement::Left => self.position -= self.right() * velocity,
            Movement::Up => self.position += self.up() * velocity,
            Movement::Down => self.position -= self.up() * velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_eq(actual: Vec3, expected: Vec3) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 0.001);
        assert_relative_eq!(actual.y, expected.y, epsilon = 0.001);
        assert_relative_eq!(actual.z, expected.z, epsilon = 0.001);
    }

    #[test]
    fn test_camera_initialization() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 16.0 / 9.0);
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.yaw, -90.0);
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.fov, 45.0);
        assert_eq!(camera.aspect, 16.0 / 9.0);
    }

    #[test]
    fn test_front_direction() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);

        // Looking along -Z (default)
        assert_vec_eq(camera.front(), Vec3::new(0.0, 0.0, -1.0));

        // Look right (+X)
        camera.yaw = 0.0;
        assert_vec_eq(camera.front(), Vec3::X);

        // Pitch tilts the front vector, unlike a ground-locked walk direction
        camera.yaw = -90.0;
        camera.set_pitch(45.0);
        let front = camera.front();
        assert_relative_eq!(front.y, 45.0_f32.to_radians().sin(), epsilon = 0.001);
        assert_relative_eq!(front.length(), 1.0, epsilon = 0.001);
    }

    #[test]
    fn test_basis_vectors() {
        let camera = Camera::new(Vec3::ZERO, 1.0);
        assert_vec_eq(camera.right(), Vec3::X);
        assert_vec_eq(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_mouse_movement() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);

        camera.process_mouse(10.0, 0.0);
        assert_relative_eq!(camera.yaw, -90.0 + 2.0, epsilon = 0.001); // 0.2 sensitivity

        camera.process_mouse(0.0, -10.0); // Move mouse up
        assert_relative_eq!(camera.pitch, 2.0, epsilon = 0.001);

        camera.process_mouse(0.0, 10.0); // Move mouse down
        assert_relative_eq!(camera.pitch, 0.0, epsilon = 0.001);

        camera.process_mouse(0.0, -1000.0);
        assert_relative_eq!(camera.pitch, 89.0, epsilon = 0.001);

        camera.process_mouse(0.0, 1000.0);
        assert_relative_eq!(camera.pitch, -89.0, epsilon = 0.001);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);

        camera.zoom(10.0);
        assert_relative_eq!(camera.fov, 35.0, epsilon = 0.001);

        camera.zoom(100.0);
        assert_eq!(camera.fov, FOV_MIN);

        camera.zoom(-100.0);
        assert_eq!(camera.fov, FOV_MAX);
    }

    #[test]
    fn test_translate_each_direction() {
        let cases = [
            (Movement::Forward, Vec3::new(0.0, 0.0, -15.0)),
            (Movement::Backward, Vec3::new(0.0, 0.0, 15.0)),
            (Movement::Left, Vec3::new(-15.0, 0.0, 0.0)),
            (Movement::Right, Vec3::new(15.0, 0.0, 0.0)),
            (Movement::Up, Vec3::new(0.0, 15.0, 0.0)),
            (Movement::Down, Vec3::new(0.0, -15.0, 0.0)),
        ];

        for (movement, expected) in cases {
            let mut camera = Camera::new(Vec3::ZERO, 1.0);
            camera.translate(movement, 1.0);
            assert_vec_eq(camera.position, expected);
        }
    }

    #[test]
    fn test_set_aspect_ignores_zero_size() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        camera.set_aspect(1600, 900);
        assert_relative_eq!(camera.aspect, 1600.0 / 900.0);

        camera.set_aspect(0, 900);
        assert_relative_eq!(camera.aspect, 1600.0 / 900.0);
    }

    #[test]
    fn test_view_matrix_changes() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let initial = camera.projection_matrix() * camera.view_matrix();

        camera.position = Vec3::new(1.0, 1.0, 5.0);
        let moved = camera.projection_matrix() * camera.view_matrix();
        assert_ne!(initial, moved);

        camera.yaw = 0.0;
        let rotated = camera.projection_matrix() * camera.view_matrix();
        assert_ne!(moved, rotated);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), 1.0);
        let view_proj = camera.projection_matrix() * camera.view_matrix();

        let origin = view_proj.project_point3(Vec3::ZERO);
        assert!(origin.z > 0.0 && origin.z < 1.0, "got {}", origin.z);
        assert_relative_eq!(origin.x, 0.0, epsilon = 0.001);
        assert_relative_eq!(origin.y, 0.0, epsilon = 0.001);
    }
}
