use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use crate::pipeline::passes::{post_process_to_buffer, render_main_pass};
use crate::pipeline::vertex_stage::VertexStage;
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;

/// Path-agnostic renderer contract: draw the scene, then hand the frame
/// over as 0RGB pixels.
pub trait SceneRenderer {
    fn render(&mut self, context: &RenderContext);
    fn present(&self, buffer: &mut [u32]);
}

/// The software renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Draws a mesh: transform every vertex once, then rasterize the
    /// triangles strictly in index order.
    pub fn draw_mesh<S: Shader>(&mut self, mesh: &Mesh, stage: &VertexStage, shader: &S) {
        let transformed = stage.transform_all(&mesh.vertices);
        let fetch = |i: u32| transformed.get(i as usize).copied().flatten();

        for chunk in mesh.indices.chunks_exact(3) {
            // Vertices that could not be projected drop the whole triangle.
            let (Some(v0), Some(v1), Some(v2)) = (fetch(chunk[0]), fetch(chunk[1]), fetch(chunk[2]))
            else {
                continue;
            };
            self.rasterizer
                .rasterize_triangle(&mut self.framebuffer, shader, &[v0, v1, v2]);
        }
    }
}

impl SceneRenderer for Renderer {
    fn render(&mut self, context: &RenderContext) {
        render_main_pass(context, self);
    }

    fn present(&self, buffer: &mut [u32]) {
        post_process_to_buffer(&self.framebuffer, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Fragment;
    use crate::core::math::transform::TransformFactory;
    use crate::core::rasterizer::CullMode;
    use nalgebra::{Matrix4, Point3, Vector3};

    struct White;

    impl Shader for White {
        fn fragment(&self, _: &Fragment) -> Vector3<f32> {
            Vector3::new(1.0, 1.0, 1.0)
        }
    }

    fn stage(world: Matrix4<f32>) -> VertexStage {
        let view = TransformFactory::view_lh(&Point3::origin(), &Vector3::z(), &Vector3::y());
        let projection = TransformFactory::perspective_lh(1.0, 60f32.to_radians(), 0.1, 100.0);
        VertexStage::new(world, view, projection, Point3::origin(), 64, 64)
    }

    fn covered(fb: &FrameBuffer) -> usize {
        fb.depth_buffer.iter().filter(|d| d.is_finite()).count()
    }

    #[test]
    fn test_cube_draws_front_faces_only() {
        let mut renderer = Renderer::new(64, 64);
        renderer.framebuffer.clear(Vector3::zeros());
        let world = TransformFactory::translation(&Vector3::new(0.0, 0.0, 10.0));
        renderer.draw_mesh(&Mesh::create_cube(1.0), &stage(world), &White);

        let front = covered(&renderer.framebuffer);
        assert!(front > 0);
        // Off the face diagonal, so exactly one of its two triangles covers it.
        let near_depth = renderer.framebuffer.get_depth(30, 33).unwrap();
        assert!(near_depth.is_finite());

        let mut culled_front = Renderer::new(64, 64);
        culled_front.rasterizer.set_cull_mode(CullMode::Front);
        culled_front.framebuffer.clear(Vector3::zeros());
        culled_front.draw_mesh(&Mesh::create_cube(1.0), &stage(world), &White);
        // Back faces are wound the other way on screen and never covered.
        assert_eq!(covered(&culled_front.framebuffer), 0);

        let mut no_cull = Renderer::new(64, 64);
        no_cull.rasterizer.set_cull_mode(CullMode::None);
        no_cull.framebuffer.clear(Vector3::zeros());
        no_cull.draw_mesh(&Mesh::create_cube(1.0), &stage(world), &White);
        assert_eq!(no_cull.framebuffer.get_depth(30, 33), Some(near_depth));
    }

    #[test]
    fn test_mesh_behind_camera_is_skipped() {
        let mut renderer = Renderer::new(64, 64);
        renderer.framebuffer.clear(Vector3::zeros());
        let world = TransformFactory::translation(&Vector3::new(0.0, 0.0, -10.0));
        renderer.draw_mesh(&Mesh::create_cube(1.0), &stage(world), &White);
        assert_eq!(covered(&renderer.framebuffer), 0);
    }
}
