use crate::core::geometry::{TransformedVertex, Varyings, Vertex};
use crate::core::math::transform::{
    apply_perspective_division, ndc_to_screen, transform_point, transform_vector,
};
use nalgebra::{Matrix4, Point3, Vector4};
use rayon::prelude::*;

const MIN_W: f32 = 1e-5;

/// Fixed-function vertex stage: object space to screen space.
pub struct VertexStage {
    pub world: Matrix4<f32>,
    /// `projection * view * world`, built once per mesh.
    world_view_projection: Matrix4<f32>,
    pub camera_origin: Point3<f32>,
    pub width: f32,
    pub height: f32,
}

impl VertexStage {
    pub fn new(
        world: Matrix4<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        camera_origin: Point3<f32>,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            world,
            world_view_projection: projection * view * world,
            camera_origin,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Transforms one vertex. Returns `None` when the vertex sits at or behind
    /// the camera plane (`w <= 0`) and cannot be projected.
    pub fn transform(&self, vertex: &Vertex) -> Option<TransformedVertex> {
        let clip = self.world_view_projection * vertex.position.to_homogeneous();
        if clip.w <= MIN_W {
            return None;
        }
        let ndc = apply_perspective_division(&clip)?;
        let screen = ndc_to_screen(ndc.x, ndc.y, self.width, self.height);

        let world_position = transform_point(&self.world, &vertex.position);

        Some(TransformedVertex {
            position: Vector4::new(screen.x, screen.y, ndc.z, clip.w),
            varyings: Varyings {
                color: vertex.color,
                uv: vertex.texcoord,
                normal: transform_vector(&self.world, &vertex.normal),
                tangent: transform_vector(&self.world, &vertex.tangent),
                view_direction: world_position - self.camera_origin,
            },
        })
    }

    /// Transforms a whole vertex buffer in parallel, preserving order.
    pub fn transform_all(&self, vertices: &[Vertex]) -> Vec<Option<TransformedVertex>> {
        vertices.par_iter().map(|v| self.transform(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use nalgebra::{Vector2, Vector3};

    fn stage(world: Matrix4<f32>) -> VertexStage {
        let view = TransformFactory::view_lh(&Point3::origin(), &Vector3::z(), &Vector3::y());
        let projection = TransformFactory::perspective_lh(1.0, 90f32.to_radians(), 0.1, 100.0);
        VertexStage::new(world, view, projection, Point3::origin(), 200, 100)
    }

    #[test]
    fn test_center_of_view_maps_to_screen_center() {
        let stage = stage(Matrix4::identity());
        let v = Vertex::new(Point3::new(0.0, 0.0, 10.0), -Vector3::z(), Vector2::zeros());
        let out = stage.transform(&v).unwrap();
        assert!((out.position.x - 100.0).abs() < 1e-4);
        assert!((out.position.y - 50.0).abs() < 1e-4);
        assert!((out.w() - 10.0).abs() < 1e-5);
        assert!(out.depth() > 0.0 && out.depth() < 1.0);
    }

    #[test]
    fn test_up_is_screen_top() {
        let stage = stage(Matrix4::identity());
        // 90 degree fov: y == z lands on the top edge.
        let v = Vertex::new(Point3::new(0.0, 10.0, 10.0), -Vector3::z(), Vector2::zeros());
        let out = stage.transform(&v).unwrap();
        assert!(out.position.y.abs() < 1e-3);
    }

    #[test]
    fn test_attributes_ignore_translation() {
        let world = TransformFactory::translation(&Vector3::new(5.0, 0.0, 20.0))
            * TransformFactory::scaling_nonuniform(&Vector3::new(2.0, 2.0, 2.0));
        let stage = stage(world);
        let v = Vertex::new(Point3::new(0.0, 0.0, 0.0), -Vector3::z(), Vector2::new(0.3, 0.7))
            .with_tangent(Vector3::x());
        let out = stage.transform(&v).unwrap();

        // Not renormalized.
        assert!((out.varyings.normal - Vector3::new(0.0, 0.0, -2.0)).norm() < 1e-6);
        assert!((out.varyings.tangent - Vector3::new(2.0, 0.0, 0.0)).norm() < 1e-6);
        assert!((out.varyings.view_direction - Vector3::new(5.0, 0.0, 20.0)).norm() < 1e-5);
        assert_eq!(out.varyings.uv, Vector2::new(0.3, 0.7));
    }

    #[test]
    fn test_behind_camera_is_rejected() {
        let stage = stage(Matrix4::identity());
        let behind = Vertex::new(Point3::new(0.0, 0.0, -5.0), Vector3::z(), Vector2::zeros());
        let on_plane = Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z(), Vector2::zeros());
        assert!(stage.transform(&behind).is_none());
        assert!(stage.transform(&on_plane).is_none());

        let all = stage.transform_all(&[behind, on_plane]);
        assert!(all.iter().all(Option::is_none));
    }
}
