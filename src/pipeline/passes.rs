use crate::core::color::to_pixel;
use crate::core::framebuffer::FrameBuffer;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::phong::PhongShader;
use crate::pipeline::shaders::unlit::UnlitShader;
use crate::pipeline::vertex_stage::VertexStage;
use crate::scene::context::RenderContext;
use crate::scene::material::Material;
use rayon::prelude::*;

/// Executes the Main Rendering Pass: clear, then draw every visible object in
/// order with its material's technique.
pub fn render_main_pass(context: &RenderContext, renderer: &mut Renderer) {
    let settings = &context.settings;
    let camera = &context.camera;

    renderer.rasterizer.cull_mode = settings.cull_mode;
    renderer.rasterizer.debug_view = settings.debug_view();
    renderer.rasterizer.depth_range = (camera.near, camera.far);

    renderer.framebuffer.clear(context.clear_color());

    let view = camera.view_matrix();
    let projection = camera.projection_matrix();
    let (width, height) = (renderer.framebuffer.width, renderer.framebuffer.height);

    for object in context.visible_objects() {
        let stage = VertexStage::new(
            object.transform,
            view,
            projection,
            camera.origin,
            width,
            height,
        );

        match &object.material {
            Material::Phong(material) => {
                let mut shader = PhongShader::new(material, context.light);
                shader.mode = settings.shading_mode;
                shader.use_normal_map = settings.normal_map;
                shader.filter = settings.filter;
                renderer.draw_mesh(&object.mesh, &stage, &shader);
            }
            Material::Flat(material) => {
                let shader = UnlitShader::new(material, settings.filter);
                renderer.draw_mesh(&object.mesh, &stage, &shader);
            }
        }
    }
}

/// Presentation: clamp and quantize every pixel into a 0RGB `u32` buffer.
pub fn post_process_to_buffer(framebuffer: &FrameBuffer, buffer: &mut [u32]) {
    if framebuffer.width == 0 {
        return;
    }
    buffer
        .par_chunks_mut(framebuffer.width)
        .zip(framebuffer.color_buffer.par_chunks(framebuffer.width))
        .for_each(|(out, row)| {
            for (pixel, color) in out.iter_mut().zip(row) {
                *pixel = to_pixel(*color);
            }
        });
}
