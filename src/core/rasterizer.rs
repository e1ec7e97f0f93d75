use crate::core::color::{BOUNDING_BOX_COLOR, remap_depth};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{Fragment, TransformedVertex};
use crate::core::math::interpolation::{
    barycentric_weights, interpolate_reciprocal, is_covered, perspective_correct_barycentric,
    signed_area_x2,
};
use crate::core::pipeline::Shader;
use nalgebra::{Point2, Vector3};
use serde::Deserialize;

const EPSILON: f32 = 1e-5;

#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullMode {
    #[default]
    Back,
    Front,
    None,
}

impl CullMode {
    pub fn next(self) -> Self {
        match self {
            CullMode::None => CullMode::Front,
            CullMode::Front => CullMode::Back,
            CullMode::Back => CullMode::None,
        }
    }
}

/// What the rasterizer writes for a covered pixel.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum DebugView {
    /// Regular shading.
    #[default]
    Shaded,
    /// Fill the whole screen-space bounding box with a flat color.
    BoundingBox,
    /// Grayscale of the remapped depth instead of the shaded color.
    Depth,
}

/// The Rasterizer is responsible for drawing triangles onto the FrameBuffer.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
    pub debug_view: DebugView,
    /// Camera near/far planes, used by the depth view.
    pub depth_range: (f32, f32),
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::Back,
            debug_view: DebugView::Shaded,
            depth_range: (0.1, 100.0),
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Rasterize a single screen-space triangle.
    ///
    /// Triangles whose bounding box leaves the screen are skipped entirely;
    /// there is no clipping. Degenerate triangles, triangles wound the wrong
    /// way and triangles with a vertex at or behind the camera (`w <= 0`) are
    /// skipped as well.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        triangle: &[TransformedVertex; 3],
    ) {
        if triangle
            .iter()
            .any(|v| v.w() <= EPSILON || !v.position.iter().all(|c| c.is_finite()))
        {
            return;
        }

        let screen = [triangle[0].screen(), triangle[1].screen(), triangle[2].screen()];

        // 1. Bounding box + screen bounds test
        let Some((start_x, start_y, end_x, end_y)) =
            compute_bounding_box(&screen, framebuffer.width, framebuffer.height)
        else {
            return;
        };

        if self.debug_view == DebugView::BoundingBox {
            let fill = Vector3::from(BOUNDING_BOX_COLOR);
            framebuffer.for_each_scanline(start_y..=end_y, |line| {
                line.color[start_x..=end_x].fill(fill);
            });
            return;
        }

        // 2. Degenerate / winding rejection
        if signed_area_x2(screen[0], screen[1], screen[2]) < EPSILON {
            return;
        }

        // 3. Face culling on the first vertex
        let facing = triangle[0]
            .varyings
            .normal
            .dot(&triangle[0].varyings.view_direction);
        match self.cull_mode {
            CullMode::Back if facing > 0.0 => return,
            CullMode::Front if facing < 0.0 => return,
            _ => {}
        }

        let depths = [triangle[0].depth(), triangle[1].depth(), triangle[2].depth()];
        let w_values = [triangle[0].w(), triangle[1].w(), triangle[2].w()];
        let varyings = [
            triangle[0].varyings,
            triangle[1].varyings,
            triangle[2].varyings,
        ];
        let debug_view = self.debug_view;
        let (near, far) = self.depth_range;

        // 4. Pixel Loop, one scanline per task
        framebuffer.for_each_scanline(start_y..=end_y, |mut line| {
            let y = line.y;
            for x in start_x..=end_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                let Some(bary) = barycentric_weights(pixel_center, screen[0], screen[1], screen[2])
                else {
                    return;
                };
                if !is_covered(bary) {
                    continue;
                }

                let Some(depth) = interpolate_reciprocal(bary, depths) else {
                    continue;
                };
                let Some(corrected) = perspective_correct_barycentric(bary, w_values) else {
                    continue;
                };

                if !line.depth_test_and_update(x, depth) {
                    continue;
                }

                let color = match debug_view {
                    DebugView::Depth => {
                        let d = remap_depth(depth, near, far);
                        Vector3::new(d, d, d)
                    }
                    _ => {
                        let fragment = Fragment {
                            x,
                            y,
                            depth,
                            varyings: varyings[0] * corrected.x
                                + varyings[1] * corrected.y
                                + varyings[2] * corrected.z,
                        };
                        shader.fragment(&fragment)
                    }
                };
                line.color[x] = color;
            }
        });
    }
}

/// Pixel-space bounding box `(start_x, start_y, end_x, end_y)`, inclusive.
/// Returns `None` if any part of the box lies outside
/// `[0, width - 1] x [0, height - 1]`.
fn compute_bounding_box(
    points: &[Point2<f32>; 3],
    width: usize,
    height: usize,
) -> Option<(usize, usize, usize, usize)> {
    let min_x = points[0].x.min(points[1].x).min(points[2].x);
    let min_y = points[0].y.min(points[1].y).min(points[2].y);
    let max_x = points[0].x.max(points[1].x).max(points[2].x);
    let max_y = points[0].y.max(points[1].y).max(points[2].y);

    if width == 0
        || height == 0
        || min_x < 0.0
        || min_y < 0.0
        || max_x > (width - 1) as f32
        || max_y > (height - 1) as f32
    {
        return None;
    }

    Some((
        min_x.floor() as usize,
        min_y.floor() as usize,
        max_x.ceil() as usize,
        max_y.ceil() as usize,
    ))
}
