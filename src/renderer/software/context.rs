use crate::{
    renderer::{FrameStats, PixelBuffer, RenderConfig},
    world::{camera::Camera, geometry::Level, texture::TextureBank},
};

/// Everything one frame's recursive draw needs, threaded through every call
/// instead of living in globals.
///
/// The level, camera and bank are read-only for the whole frame; the pixel
/// buffer and the statistics are the only things written.
pub struct RenderContext<'a> {
    pub level: &'a Level,
    pub camera: &'a Camera,
    pub bank: &'a TextureBank,
    pub target: &'a mut PixelBuffer,
    pub config: RenderConfig,
    pub stats: FrameStats,

    /* screen constants */
    pub width: i32,
    pub height: i32,
    pub width_f: f32,
    pub height_f: f32,
    pub tan_half_fov: f32,
    pub eye_z: f32,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        level: &'a Level,
        camera: &'a Camera,
        bank: &'a TextureBank,
        target: &'a mut PixelBuffer,
        config: RenderConfig,
    ) -> Self {
        let (w, h) = (target.width(), target.height());
        Self {
            level,
            camera,
            bank,
            target,
            config,
            stats: FrameStats::default(),
            width: w as i32,
            height: h as i32,
            width_f: w as f32,
            height_f: h as f32,
            tan_half_fov: camera.tan_half_fov(),
            eye_z: camera.z,
        }
    }

    /// Account for one sector draw at `depth`.  Returns `false` when the
    /// depth cap or the step budget says the draw must not happen.
    pub fn enter_sector(&mut self, depth: u32) -> bool {
        if depth >= self.config.max_depth {
            self.stats.truncated_by_depth = true;
            return false;
        }
        if let Some(budget) = self.config.sector_budget {
            if self.stats.sectors_drawn >= budget {
                self.stats.truncated_by_budget = true;
                return false;
            }
        }
        self.stats.sectors_drawn += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
        true
    }

    /// Paint one pixel after fog; `(x, y)` must be on screen.
    #[inline(always)]
    pub fn plot(&mut self, x: i32, y: i32, texel: u8, depth: f32) {
        let rgb = super::shade::fog(self.bank.get_color(texel), depth, self.config.fog);
        self.target.put_rgb(x as usize, y as usize, rgb);
    }
}
