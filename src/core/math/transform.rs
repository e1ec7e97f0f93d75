use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating various transformation matrices.
/// Column-vector convention (`M * v`), left-handed world: +X right, +Y up, +Z into the screen.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Orientation built from accumulated pitch and yaw (no roll).
    /// Positive pitch tilts +Z upwards, positive yaw turns +Z towards +X.
    pub fn rotation_pitch_yaw(pitch: f32, yaw: f32) -> Matrix4<f32> {
        Self::rotation_y(yaw) * Self::rotation_x(-pitch)
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Creates a View matrix (Look-At, Left-Handed).
    /// The camera looks down +Z in view space.
    pub fn view_lh(eye: &Point3<f32>, forward: &Vector3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = forward.normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(&eye.coords),
            y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(&eye.coords),
            z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(&eye.coords),
            0.0,      0.0,      0.0,      1.0,
        )
    }

    /// Creates a Perspective Projection matrix (Left-Handed).
    /// Maps view depth `near -> 0` and `far -> 1` after the perspective divide;
    /// clip `w` equals view-space depth.
    pub fn perspective_lh(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let y_scale = 1.0 / (fov_y_rad / 2.0).tan();
        let x_scale = y_scale / aspect_ratio;
        let range = far / (far - near);

        Matrix4::new(
            x_scale, 0.0,     0.0,   0.0,
            0.0,     y_scale, 0.0,   0.0,
            0.0,     0.0,     range, -near * range,
            0.0,     0.0,     1.0,   0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Transforms a direction (no translation applied).
#[inline]
pub fn transform_vector(matrix: &Matrix4<f32>, v: &Vector3<f32>) -> Vector3<f32> {
    matrix.fixed_view::<3, 3>(0, 0) * v
}

/// Transforms a position, ignoring any projective component.
#[inline]
pub fn transform_point(matrix: &Matrix4<f32>, p: &Point3<f32>) -> Point3<f32> {
    Point3::from((matrix * p.to_homogeneous()).xyz())
}

/// Performs perspective division: Clip Space -> NDC.
/// Returns `None` when `w` is too close to zero to divide by.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Option<Point3<f32>> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Some(Point3::new(clip.x / w, clip.y / w, clip.z / w))
    } else {
        None
    }
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}
