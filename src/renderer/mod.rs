//! Rendering abstraction layer.
//!
//! The frame driver owns a [`PixelBuffer`] and hands it, together with the
//! level, camera and texture bank, to a type that implements [`Renderer`].
//!
//! * The buffer is RGBA bytes, row-major.  Alpha is seeded to opaque once
//!   and never written by a back-end.
//! * A helper blanket-impl [`RendererExt`] adds `render_frame` so call-sites
//!   stay short.

use crate::world::{camera::Camera, geometry::Level, texture::Rgb, texture::TextureBank};

/// Packed presentation pixel (0x00RRGGBB), the format `minifb` expects.
pub type Argb = u32;

/*──────────────────────────── pixel buffer ───────────────────────────*/

/// Flat `width * height * 4` RGBA byte array.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Black, fully opaque buffer.
    pub fn new(width: usize, height: usize) -> Self {
        let mut data = vec![0u8; width * height * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 0xFF;
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite the colour channels of every pixel.
    pub fn clear(&mut self, rgb: Rgb) {
        let [_, r, g, b] = rgb.to_be_bytes();
        for px in self.data.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }

    /// Write the colour channels of one pixel; alpha is left alone.
    #[inline(always)]
    pub fn put_rgb(&mut self, x: usize, y: usize, rgb: Rgb) {
        let i = (y * self.width + x) * 4;
        let [_, r, g, b] = rgb.to_be_bytes();
        self.data[i] = r;
        self.data[i + 1] = g;
        self.data[i + 2] = b;
    }

    #[inline]
    pub fn rgb_at(&self, x: usize, y: usize) -> Rgb {
        let i = (y * self.width + x) * 4;
        (self.data[i] as u32) << 16 | (self.data[i + 1] as u32) << 8 | self.data[i + 2] as u32
    }

    /// Repack into `0x00RRGGBB` words for presentation.
    pub fn to_argb(&self, out: &mut Vec<Argb>) {
        out.clear();
        out.extend(
            self.data
                .chunks_exact(4)
                .map(|px| (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32),
        );
    }
}

/*──────────────────────────── configuration ──────────────────────────*/

/// Knobs the frame driver may change between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Hard cap on portal recursion.  Not a cycle detector: portal loops are
    /// simply cut off once this depth is reached.
    pub max_depth: u32,
    /// Distance fog factor, `0` disables fog.
    pub fog: f32,
    /// Stop after this many sector draws (step-through debugging).
    pub sector_budget: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            fog: 0.75,
            sector_budget: None,
        }
    }
}

/// What one frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub sectors_drawn: usize,
    pub max_depth_reached: u32,
    pub truncated_by_depth: bool,
    pub truncated_by_budget: bool,
}

/*──────────────────────────── back-end trait ─────────────────────────*/

/// A renderer that paints one frame into a caller-owned buffer.
///
/// `end_frame` hands the finished picture to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// Prepare per-frame scratch and clear the colour channels.
    fn begin_frame(&mut self, target: &mut PixelBuffer);

    /// Draw the view from `camera.sector` outwards.
    fn draw_level(
        &mut self,
        level: &Level,
        camera: &Camera,
        bank: &TextureBank,
        target: &mut PixelBuffer,
    ) -> FrameStats;

    /// Run `submit(&[Argb], w, h)` exactly once with the packed frame.
    fn end_frame<F>(&mut self, target: &PixelBuffer, submit: F)
    where
        F: FnOnce(&[Argb], usize, usize);
}

/// Convenience blanket-impl with a one-liner `render_frame` adaptor.
pub trait RendererExt: Renderer {
    fn render_frame(
        &mut self,
        level: &Level,
        camera: &Camera,
        bank: &TextureBank,
        target: &mut PixelBuffer,
    ) -> FrameStats {
        self.begin_frame(target);
        self.draw_level(level, camera, bank, target)
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_opaque() {
        let fb = PixelBuffer::new(3, 2);
        assert_eq!(fb.data().len(), 3 * 2 * 4);
        assert!(fb.data().chunks_exact(4).all(|px| px[3] == 0xFF));
    }

    #[test]
    fn put_and_clear_leave_alpha() {
        let mut fb = PixelBuffer::new(2, 2);
        fb.clear(0x00_10_20_30);
        fb.put_rgb(1, 1, 0x00_AA_BB_CC);
        assert_eq!(fb.rgb_at(0, 0), 0x10_20_30);
        assert_eq!(fb.rgb_at(1, 1), 0xAA_BB_CC);
        assert!(fb.data().chunks_exact(4).all(|px| px[3] == 0xFF));

        let mut packed = Vec::new();
        fb.to_argb(&mut packed);
        assert_eq!(packed, vec![0x10_20_30, 0x10_20_30, 0x10_20_30, 0xAA_BB_CC]);
    }
}
