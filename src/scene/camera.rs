use crate::core::math::transform::{TransformFactory, transform_vector};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Which pointer buttons are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub left: bool,
    pub right: bool,
}

/// Input consumed by one camera update.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    /// Relative pointer motion since the previous frame, in pixels.
    pub pointer_delta: Vector2<f32>,
    pub buttons: PointerButtons,
}

/// Free-flying yaw/pitch camera with a left-handed view and projection.
///
/// The matrices are rebuilt at the end of every `update`, so they always
/// reflect the current origin and orientation.
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,
    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Accumulated yaw in radians.
    pub yaw: f32,
    /// Accumulated pitch in radians, clamped short of straight up/down.
    pub pitch: f32,

    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    pub movement_speed: f32,
    /// Added to `movement_speed` while boosting.
    pub boost_speed: f32,
    /// Radians per pixel of pointer motion.
    pub rotation_speed: f32,
    pub vertical_speed: f32,
    /// Optional cap on the vertical pan distance per update.
    pub max_vertical_step: Option<f32>,

    view_matrix: Matrix4<f32>,
    inverse_view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(origin: Point3<f32>, fov_y_rad: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            origin,
            forward: Vector3::z(),
            right: Vector3::x(),
            up: Vector3::y(),
            yaw: 0.0,
            pitch: 0.0,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            movement_speed: 15.0,
            boost_speed: 40.0,
            rotation_speed: 0.005,
            vertical_speed: 10.0,
            max_vertical_step: None,
            view_matrix: Matrix4::identity(),
            inverse_view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Current translation speed in units per second.
    pub fn speed(&self, boosting: bool) -> f32 {
        if boosting {
            self.movement_speed + self.boost_speed
        } else {
            self.movement_speed
        }
    }

    /// Advances origin and orientation by one frame of input.
    pub fn update(&mut self, delta_time: f32, input: &CameraInput) {
        let step = self.speed(input.boost) * delta_time;

        // 1. Keyboard translation along the current basis
        if input.forward {
            self.origin += self.forward * step;
        }
        if input.backward {
            self.origin -= self.forward * step;
        }
        if input.right {
            self.origin += self.right * step;
        }
        if input.left {
            self.origin -= self.right * step;
        }

        // 2. Pointer modes
        let delta = input.pointer_delta;
        match (input.buttons.left, input.buttons.right) {
            (true, false) => {
                self.origin -= self.forward * delta.y * self.movement_speed * delta_time;
                self.yaw += delta.x * self.rotation_speed;
            }
            (false, true) => {
                self.yaw += delta.x * self.rotation_speed;
                self.pitch -= delta.y * self.rotation_speed;
            }
            (true, true) => {
                let mut rise = -delta.y * delta_time * self.vertical_speed;
                if let Some(limit) = self.max_vertical_step {
                    rise = rise.clamp(-limit, limit);
                }
                self.origin.y += rise;
            }
            (false, false) => {}
        }
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // 3. Rebuild the basis from the accumulated angles
        let rotation = TransformFactory::rotation_pitch_yaw(self.pitch, self.yaw);
        self.forward = transform_vector(&rotation, &Vector3::z()).normalize();
        self.right = transform_vector(&rotation, &Vector3::x()).normalize();

        self.update_matrices();
    }

    /// Recalculates view, inverse view and projection from the current state.
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view_lh(&self.origin, &self.forward, &Vector3::y());
        self.inverse_view_matrix = self
            .view_matrix
            .try_inverse()
            .unwrap_or_else(Matrix4::identity);
        self.up = self.forward.cross(&self.right).normalize();
        self.projection_matrix =
            TransformFactory::perspective_lh(self.aspect_ratio, self.fov_y_rad, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    /// Camera-to-world matrix, the algebraic inverse of `view_matrix`.
    pub fn inverse_view_matrix(&self) -> Matrix4<f32> {
        self.inverse_view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn camera() -> Camera {
        Camera::new(Point3::origin(), 45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0)
    }

    #[test]
    fn test_view_inverse_round_trip_for_random_orientations() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let mut cam = camera();
            cam.origin = Point3::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
            );
            cam.yaw = rng.random_range(-10.0..10.0);
            cam.pitch = rng.random_range(-1.5..1.5);
            cam.update(0.0, &CameraInput::default());

            let product = cam.view_matrix() * cam.inverse_view_matrix();
            assert!(
                (product - Matrix4::identity()).abs().max() < 1e-4,
                "view * inverse_view = {product}"
            );
        }
    }

    #[test]
    fn test_inverse_view_maps_origin_to_eye() {
        let mut cam = camera();
        cam.origin = Point3::new(3.0, -2.0, 7.0);
        cam.yaw = 0.7;
        cam.update(0.0, &CameraInput::default());
        let eye = cam.inverse_view_matrix() * Point3::origin().to_homogeneous();
        assert!((eye.xyz() - cam.origin.coords).norm() < 1e-4);
    }

    #[test]
    fn test_keyboard_movement_and_boost() {
        let mut cam = camera();
        let input = CameraInput {
            forward: true,
            ..Default::default()
        };
        cam.update(0.5, &input);
        assert!((cam.origin.z - 7.5).abs() < 1e-5);

        let mut cam = camera();
        let input = CameraInput {
            right: true,
            boost: true,
            ..Default::default()
        };
        cam.update(0.1, &input);
        assert!((cam.origin.x - 5.5).abs() < 1e-5);
        assert!(cam.origin.z.abs() < 1e-6);
    }

    #[test]
    fn test_left_drag_moves_and_yaws() {
        let mut cam = camera();
        let input = CameraInput {
            pointer_delta: Vector2::new(100.0, -2.0),
            buttons: PointerButtons {
                left: true,
                right: false,
            },
            ..Default::default()
        };
        cam.update(0.1, &input);
        // Dragging up moves forward along the pre-update forward (+Z).
        assert!((cam.origin.z - 3.0).abs() < 1e-5);
        assert!((cam.yaw - 0.5).abs() < 1e-6);
        assert_eq!(cam.pitch, 0.0);
        assert!(cam.forward.x > 0.0);
    }

    #[test]
    fn test_left_drag_ignores_boost() {
        let mut cam = camera();
        let input = CameraInput {
            boost: true,
            pointer_delta: Vector2::new(0.0, -2.0),
            buttons: PointerButtons {
                left: true,
                right: false,
            },
            ..Default::default()
        };
        cam.update(0.1, &input);
        assert!((cam.origin.z - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_right_drag_rotates_and_clamps_pitch() {
        let mut cam = camera();
        let input = CameraInput {
            pointer_delta: Vector2::new(0.0, -1000.0),
            buttons: PointerButtons {
                left: false,
                right: true,
            },
            ..Default::default()
        };
        cam.update(0.016, &input);
        assert!((cam.pitch - PITCH_LIMIT).abs() < 1e-6);
        assert!(cam.forward.y > 0.99);
        assert_eq!(cam.origin, Point3::origin());
        assert!((cam.forward.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_both_buttons_pan_vertically_with_limit() {
        let mut cam = camera();
        let input = CameraInput {
            pointer_delta: Vector2::new(0.0, -10.0),
            buttons: PointerButtons {
                left: true,
                right: true,
            },
            ..Default::default()
        };
        cam.update(0.5, &input);
        assert!((cam.origin.y - 50.0).abs() < 1e-4);

        let mut cam = camera();
        cam.max_vertical_step = Some(2.0);
        cam.update(0.5, &input);
        assert!((cam.origin.y - 2.0).abs() < 1e-6);
    }
}
