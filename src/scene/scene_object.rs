use crate::core::math::transform::TransformFactory;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Vector3};

/// A mesh instance in the scene with its own material and transformation.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: Mesh,
    pub material: Material,
    pub translation: Vector3<f32>,
    pub scale: Vector3<f32>,
    /// Rotation about +Y in radians.
    pub yaw: f32,
    /// Object-to-world matrix, `T * Ry(yaw) * S`.
    pub transform: Matrix4<f32>,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(
        name: impl Into<String>,
        mesh: Mesh,
        material: Material,
        translation: Vector3<f32>,
        scale: Vector3<f32>,
    ) -> Self {
        let mut object = Self {
            name: name.into(),
            mesh,
            material,
            translation,
            scale,
            yaw: 0.0,
            transform: Matrix4::identity(),
            visible: true,
        };
        object.set_yaw(0.0);
        object
    }

    /// Rebuilds the world matrix for a new rotation angle.
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.transform = TransformFactory::translation(&self.translation)
            * TransformFactory::rotation_y(yaw)
            * TransformFactory::scaling_nonuniform(&self.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::transform_point;
    use nalgebra::Point3;

    #[test]
    fn test_transform_scales_rotates_then_translates() {
        let mut object = SceneObject::new(
            "cube",
            Mesh::create_cube(1.0),
            Material::default(),
            Vector3::new(0.0, 0.0, 50.0),
            Vector3::new(2.0, 2.0, 2.0),
        );
        object.set_yaw(std::f32::consts::FRAC_PI_2);

        let p = transform_point(&object.transform, &Point3::new(1.0, 0.0, 0.0));
        // +X scaled to 2, turned onto -Z, then moved to z = 50.
        assert!((p - Point3::new(0.0, 0.0, 48.0)).norm() < 1e-4, "{p}");
    }
}
