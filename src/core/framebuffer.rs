use nalgebra::Vector3;
use rayon::prelude::*;
use std::ops::RangeInclusive;

/// A mutable view over one scanline of the color and depth buffers.
pub struct Scanline<'a> {
    pub y: usize,
    pub color: &'a mut [Vector3<f32>],
    pub depth: &'a mut [f32],
}

impl Scanline<'_> {
    /// Depth test and update. Accepts only strictly closer values; ties keep
    /// the existing value. Returns true if the new depth was written.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, new_depth: f32) -> bool {
        let current = &mut self.depth[x];
        if new_depth < *current {
            *current = new_depth;
            true
        } else {
            false
        }
    }
}

/// Represents a 2D buffer containing color and depth information.
///
/// Rasterization splits the buffers into disjoint scanlines, so pixel writes
/// inside one triangle can run in parallel without shared cells.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub color_buffer: Vec<Vector3<f32>>,
    pub depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![Vector3::zeros(); size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Resets color to the background and depth to +infinity.
    pub fn clear(&mut self, background: Vector3<f32>) {
        self.color_buffer.fill(background);
        self.depth_buffer.fill(f32::INFINITY);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        self.in_bounds(x, y)
            .then(|| self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        self.in_bounds(x, y)
            .then(|| self.depth_buffer[self.index(x, y)])
    }

    /// Runs `f` on each scanline in `rows` in parallel.
    /// `rows` must lie inside the buffer.
    pub fn for_each_scanline<F>(&mut self, rows: RangeInclusive<usize>, f: F)
    where
        F: Fn(Scanline<'_>) + Send + Sync,
    {
        let (start, end) = (*rows.start(), *rows.end());
        if start > end || end >= self.height {
            return;
        }
        let width = self.width;
        let span = start * width..(end + 1) * width;

        self.color_buffer[span.clone()]
            .par_chunks_mut(width)
            .zip(self.depth_buffer[span].par_chunks_mut(width))
            .enumerate()
            .for_each(|(i, (color, depth))| {
                f(Scanline {
                    y: start + i,
                    color,
                    depth,
                })
            });
    }
}
