use cgmath::{InnerSpace, Matrix4, Point3, Vector3, Zero};

use crate::input::KeyState;

pub const PITCH_LIMIT: f32 = 89.9;

const GRAVITY: f32 = -18.0;
const VELOCITY_EPSILON: f32 = 1e-3;
const UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// First-person camera with yaw/pitch mouse look and a naive
/// vertical-velocity jump model. The floor is the y=0 plane.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    yaw: f32,
    pitch: f32,
    front: Vector3<f32>,
    vertical_velocity: f32,
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        let mut camera = Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            front: Vector3::new(0.0, 0.0, -1.0),
            vertical_velocity: 0.0,
        };
        camera.rebuild_front();

        camera
    }

    /// Accumulates a cursor delta into yaw/pitch. Pitch is clamped so the
    /// view never flips over the vertical axis.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw += dx * sensitivity;
        self.pitch = (self.pitch + dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.rebuild_front();
    }

    /// WASD movement on the xz plane. The vertical axis is owned by the
    /// jump model, so looking up does not make W fly.
    pub fn walk(&mut self, keys: &KeyState, speed: f32, dt: f32) {
        let mut flat = self.front;
        flat.y = 0.0;

        if flat.magnitude2() == 0.0 {
            return;
        }

        let forward = flat.normalize();
        let right = forward.cross(UP);

        let mut direction = Vector3::zero();
        if keys.w {
            direction += forward;
        }
        if keys.s {
            direction -= forward;
        }
        if keys.d {
            direction += right;
        }
        if keys.a {
            direction -= right;
        }

        if direction.magnitude2() > 0.0 {
            self.position += direction.normalize() * speed * dt;
        }
    }

    /// Upward impulse, only when the camera is not already moving
    /// vertically.
    pub fn jump(&mut self, impulse: f32) {
        if self.vertical_velocity.abs() < VELOCITY_EPSILON {
            self.vertical_velocity = impulse;
        }
    }

    /// Integrates gravity and clamps to the floor. Hitting the floor
    /// zeroes the vertical velocity in the same step.
    pub fn fall(&mut self, dt: f32) {
        self.vertical_velocity += GRAVITY * dt;
        self.position.y += self.vertical_velocity * dt;

        if self.position.y <= 0.0 {
            self.position.y = 0.0;
            self.vertical_velocity = 0.0;
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.front, UP)
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    fn rebuild_front(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Point3<f32> {
        Point3::new(0.0, 0.0, 0.0)
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut camera = Camera::new(origin());

        camera.look(0.0, 100_000.0, 0.1);
        assert!(camera.pitch() <= PITCH_LIMIT);

        camera.look(0.0, -1_000_000.0, 0.1);
        assert!(camera.pitch() >= -PITCH_LIMIT);

        for dy in [-5000.0, 13.7, -0.4, 90.0, 2.0e6] {
            camera.look(3.0, dy, 0.1);
            assert!(camera.pitch() <= PITCH_LIMIT && camera.pitch() >= -PITCH_LIMIT);
        }
    }

    #[test]
    fn front_is_unit_length() {
        for dx in (-720..=720).step_by(45) {
            for dy in (-720..=720).step_by(45) {
                let mut camera = Camera::new(origin());
                camera.look(dx as f32, dy as f32, 1.0);

                let len = camera.front().magnitude();
                assert!((len - 1.0).abs() < 1e-5, "|front| = {len} after ({dx}, {dy})");
            }
        }
    }

    #[test]
    fn floor_clamp_resets_velocity_in_same_step() {
        let mut camera = Camera::new(Point3::new(0.0, 5.0, 0.0));

        for _ in 0..10_000 {
            camera.fall(0.016);
            assert!(camera.position.y >= 0.0);

            if camera.position.y == 0.0 {
                assert_eq!(camera.vertical_velocity(), 0.0);
                return;
            }
        }

        panic!("camera never reached the floor");
    }

    #[test]
    fn jump_is_gated_while_airborne() {
        let mut camera = Camera::new(origin());

        camera.jump(8.0);
        assert_eq!(camera.vertical_velocity(), 8.0);

        camera.jump(8.0);
        assert_eq!(camera.vertical_velocity(), 8.0);

        camera.fall(0.1);
        camera.jump(8.0);
        assert!(camera.vertical_velocity() < 8.0);
    }

    #[test]
    fn walking_is_planar() {
        let mut camera = Camera::new(origin());
        camera.look(0.0, 600.0, 0.1);

        let keys = KeyState {
            w: true,
            ..Default::default()
        };
        camera.walk(&keys, 1.0, 1.0);

        assert_eq!(camera.position.y, 0.0);
        assert!(camera.position.z < 0.0);
    }

    #[test]
    fn zero_elapsed_frame_is_a_noop() {
        let mut camera = Camera::new(Point3::new(1.0, 2.0, 3.0));
        camera.look(37.0, -12.0, 0.1);

        let before = camera.clone();

        camera.look(0.0, 0.0, 0.1);
        camera.walk(
            &KeyState {
                w: true,
                d: true,
                ..Default::default()
            },
            5.0,
            0.0,
        );
        camera.fall(0.0);

        assert_eq!(camera.position, before.position);
        assert_eq!(camera.front(), before.front());
        assert_eq!(camera.yaw(), before.yaw());
        assert_eq!(camera.pitch(), before.pitch());
        assert_eq!(camera.vertical_velocity(), before.vertical_velocity());
    }
}
