use crate::core::geometry::Fragment;
use nalgebra::Vector3;

/// Shader represents the programmable stage of the pipeline.
///
/// The vertex stage is fixed (see `pipeline::vertex_stage`); a shader only
/// maps an interpolated fragment to a color.
///
/// Implementations must be thread-safe (Send + Sync) because shading is invoked
/// concurrently across the scanlines of a triangle.
pub trait Shader: Send + Sync {
    /// Fragment shader stage.
    ///
    /// Computes the linear RGB color for the current fragment. The result is
    /// unclamped; clamping happens once at presentation.
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32>;
}
