use crate::io::error::LoadError;
use image::{ImageBuffer, Rgb};
use log::info;
use std::path::Path;

/// Saves a 0RGB `u32` buffer to an image file; the format follows the
/// extension.
pub fn save_buffer_to_image<P: AsRef<Path>>(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: P,
) -> Result<(), LoadError> {
    let path = path.as_ref();
    let img_buf = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let color_u32 = buffer
            .get(y as usize * width + x as usize)
            .copied()
            .unwrap_or(0);
        Rgb([
            ((color_u32 >> 16) & 0xFF) as u8,
            ((color_u32 >> 8) & 0xFF) as u8,
            (color_u32 & 0xFF) as u8,
        ])
    });

    img_buf
        .save(path)
        .map_err(|e| LoadError::Save(path.to_path_buf(), e))?;
    info!("Saved {}x{} image to {:?}", width, height, path);
    Ok(())
}
