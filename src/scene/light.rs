use glam::{Vec2, Vec3};

/// Angular speed of an orbiting light, radians per second.
pub const ORBIT_SPEED: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    orbit: Option<Orbit>,
}

#[derive(Debug, Clone, PartialEq)]
struct Orbit {
    radius: f32,
    angle: f32,
}

impl PointLight {
    pub fn fixed(position: Vec3) -> Self {
        Self { position, orbit: None }
    }

    /// Circles the Z axis through `position`, keeping its distance from the plane.
    pub fn orbiting(position: Vec3) -> Self {
        let xy = Vec2::new(position.x, position.y);
        Self {
            position,
            orbit: Some(Orbit {
                radius: xy.length(),
                angle: xy.y.atan2(xy.x),
            }),
        }
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbit.is_some()
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(orbit) = &mut self.orbit {
            orbit.angle = (orbit.angle + ORBIT_SPEED * dt) % std::f32::consts::TAU;
            let (sin, cos) = orbit.angle.sin_cos();
            self.position.x = orbit.radius * cos;
            self.position.y = orbit.radius * sin;
        }
    }
}
