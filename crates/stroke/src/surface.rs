//! CPU reference surface for headless painting and tests

use tracing::debug;

use crate::brush::{Dab, DabRenderer};
use crate::math::{clamp01, smoothstep};

/// A CPU surface storing pixels as `[r, g, b, a]` f32 (Rgba16Float
/// compatible)
pub struct CpuSurface {
    width: u32,
    height: u32,
    /// Row-major pixel data
    pixels: Vec<[f32; 4]>,
}

impl CpuSurface {
    /// Create a surface initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 0.0]; pixel_count],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    /// Pixel at the given coordinates, or None when out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Blend a color onto an existing pixel using source-over
    /// compositing: `out = src * alpha + dst * (1 - alpha)`
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];

        let src_alpha = color[3] * opacity;
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Raw pixel data as bytes, suitable for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

impl DabRenderer for CpuSurface {
    /// Stamp a round dab with a smoothstep edge falloff
    fn draw_dab(&mut self, dab: &Dab) {
        let radius = dab.size / 2.0;
        if radius <= 0.0 || dab.flow <= 0.0 {
            return;
        }

        let x_min = ((dab.x - radius).floor().max(0.0) as u32).min(self.width);
        let y_min = ((dab.y - radius).floor().max(0.0) as u32).min(self.height);
        let x_max = ((dab.x + radius).ceil().max(0.0) as u32).min(self.width);
        let y_max = ((dab.y + radius).ceil().max(0.0) as u32).min(self.height);

        if x_min >= x_max || y_min >= y_max {
            debug!("draw_dab: dab at ({:.1}, {:.1}) outside surface", dab.x, dab.y);
            return;
        }

        for py in y_min..y_max {
            for px in x_min..x_max {
                let dx = (px as f32 + 0.5) - dab.x;
                let dy = (py as f32 + 0.5) - dab.y;
                let dist = (dx * dx + dy * dy).sqrt() / radius;
                if dist > 1.0 {
                    continue;
                }
                let cover = smoothstep(clamp01(1.0 - dist));
                if cover > 0.0 {
                    self.blend_pixel(px, py, dab.color, dab.flow * cover);
                }
            }
        }
    }
}
