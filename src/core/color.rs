use nalgebra::Vector3;

/// Flat color written over the whole bounding box in bounding-box view.
pub const BOUNDING_BOX_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Background preset used while the uniform background is off.
pub const DEFAULT_BACKGROUND: [f32; 3] = [0.39, 0.39, 0.39];

/// Background preset used while the uniform background is on.
pub const UNIFORM_BACKGROUND: [f32; 3] = [0.1, 0.1, 0.1];

/// Clamps each channel to [0, 1] and quantizes it to 8 bits.
#[inline]
pub fn quantize(color: Vector3<f32>) -> [u8; 3] {
    // NaN clamps to NaN and `as u8` maps it to 0.
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(color.x), q(color.y), q(color.z)]
}

/// Packs a linear color into a 0RGB `u32` display pixel.
#[inline]
pub fn to_pixel(color: Vector3<f32>) -> u32 {
    let [r, g, b] = quantize(color);
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Grayscale value for the depth view: the buffer depth remapped into the
/// camera's near/far range, `2n / (f + n - d (f - n))`.
#[inline]
pub fn remap_depth(depth: f32, near: f32, far: f32) -> f32 {
    // f + n - d (f - n) cancels badly near d = 1 in single precision.
    let (d, n, f) = (depth as f64, near as f64, far as f64);
    ((2.0 * n) / (f + n - d * (f - n))) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixel_clamps() {
        assert_eq!(to_pixel(Vector3::new(2.0, -1.0, 0.5)), 0x00FF_0080);
        assert_eq!(to_pixel(Vector3::new(1.0, 1.0, 1.0)), 0x00FF_FFFF);
        assert_eq!(to_pixel(Vector3::new(f32::NAN, 0.0, 0.0)), 0);
    }

    #[test]
    fn test_quantize_rounds_near_white() {
        assert_eq!(quantize(Vector3::new(0.99999, 0.998, 0.001)), [255, 254, 0]);
    }

    #[test]
    fn test_remap_depth_bounds() {
        let near = 0.1;
        let far = 100.0;
        assert!((remap_depth(1.0, near, far) - 1.0).abs() < 1e-6);
        assert!((remap_depth(0.0, near, far) - 2.0 * near / (far + near)).abs() < 1e-6);
    }
}
