use crate::io::error::LoadError;
use image::RgbImage;
use log::info;
use nalgebra::{Vector2, Vector3};
use serde::Deserialize;
use std::path::Path;

/// Texel filtering used by the software sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFilter {
    /// Nearest texel.
    #[default]
    Point,
    /// Bilinear blend of the four surrounding texels.
    Linear,
}

impl SampleFilter {
    pub fn next(self) -> Self {
        match self {
            SampleFilter::Point => SampleFilter::Linear,
            SampleFilter::Linear => SampleFilter::Point,
        }
    }
}

/// Represents a 2D texture map, stored as 8-bit RGB.
///
/// UV (0, 0) is the top-left texel. Coordinates outside [0, 1] clamp to the
/// edge.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(LoadError::NotFound(path_ref.to_path_buf()));
        }
        let img = image::open(path_ref)
            .map_err(|e| LoadError::Image(path_ref.to_path_buf(), e))?
            .to_rgb8();

        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref,
            img.width(),
            img.height()
        );
        Ok(Self::from_image(img))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// A 1x1 texture of a single color (channels in [0, 1]).
    pub fn solid(color: Vector3<f32>) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_image(RgbImage::from_pixel(
            1,
            1,
            image::Rgb([q(color.x), q(color.y), q(color.z)]),
        ))
    }

    /// Samples the texture with clamp addressing. Returns RGB in [0, 1].
    pub fn sample(&self, uv: Vector2<f32>, filter: SampleFilter) -> Vector3<f32> {
        if self.width == 0 || self.height == 0 {
            return Vector3::zeros();
        }
        // NaN would otherwise survive the clamp.
        let u = if uv.x.is_nan() { 0.0 } else { uv.x.clamp(0.0, 1.0) };
        let v = if uv.y.is_nan() { 0.0 } else { uv.y.clamp(0.0, 1.0) };

        match filter {
            SampleFilter::Point => {
                let x = ((u * self.width as f32) as u32).min(self.width - 1);
                let y = ((v * self.height as f32) as u32).min(self.height - 1);
                self.texel(x as i64, y as i64)
            }
            SampleFilter::Linear => {
                // -0.5 because texel centers are at 0.5
                let x = u * self.width as f32 - 0.5;
                let y = v * self.height as f32 - 0.5;

                let x0 = x.floor() as i64;
                let y0 = y.floor() as i64;
                let wx = x - x.floor();
                let wy = y - y.floor();

                let c00 = self.texel(x0, y0);
                let c10 = self.texel(x0 + 1, y0);
                let c01 = self.texel(x0, y0 + 1);
                let c11 = self.texel(x0 + 1, y0 + 1);

                let top = c00 * (1.0 - wx) + c10 * wx;
                let bottom = c01 * (1.0 - wx) + c11 * wx;
                top * (1.0 - wy) + bottom * wy
            }
        }
    }

    /// Texel fetch with CLAMP addressing.
    fn texel(&self, x: i64, y: i64) -> Vector3<f32> {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        let pixel = self.image.get_pixel(x, y);
        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}
