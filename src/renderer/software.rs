//! ---------------------------------------------------------------------------
//! Software (CPU) portal renderer
//!
//! * Paints straight into the caller's RGBA [`PixelBuffer`], column by
//!   column, never touching alpha.
//! * Visibility comes from recursive sector traversal through portals with
//!   per-column occlusion bands, so no Z-buffer is needed.
//! * All per-frame state lives in a [`RenderContext`] built on the stack for
//!   the duration of [`Renderer::draw_level`].
//! ---------------------------------------------------------------------------

pub mod clip;
pub mod context;
pub mod planes;
pub mod projection;
pub mod sector;
pub mod shade;
pub mod walls;

use crate::{
    renderer::{Argb, FrameStats, PixelBuffer, RenderConfig, Renderer},
    world::{
        camera::Camera,
        geometry::Level,
        texture::{Rgb, TextureBank},
    },
};

pub use clip::ClipWindow;
pub use context::RenderContext;

/// Colour left in pixels nothing painted.
const CLEAR_RGB: Rgb = 0x20_20_20;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    pub config: RenderConfig,
    /* full-screen root window, rebuilt on resize */
    root: ClipWindow,
    present: Vec<Argb>,
    width: usize,
    height: usize,
}

impl Software {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    fn fit(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height || self.root.top.len() != w {
            self.width = w;
            self.height = h;
            self.root = ClipWindow::full(w, h);
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, target: &mut PixelBuffer) {
        self.fit(target.width(), target.height());
        target.clear(CLEAR_RGB);
    }

    fn draw_level(
        &mut self,
        level: &Level,
        camera: &Camera,
        bank: &TextureBank,
        target: &mut PixelBuffer,
    ) -> FrameStats {
        self.fit(target.width(), target.height());

        let mut ctx = RenderContext::new(level, camera, bank, target, self.config);
        ctx.draw_sector(camera.sector, 0, &self.root);

        let stats = ctx.stats;
        log::trace!(
            "frame: {} sectors, depth {}, cut by depth {}, cut by budget {}",
            stats.sectors_drawn,
            stats.max_depth_reached,
            stats.truncated_by_depth,
            stats.truncated_by_budget
        );
        stats
    }

    fn end_frame<F>(&mut self, target: &PixelBuffer, submit: F)
    where
        F: FnOnce(&[Argb], usize, usize),
    {
        target.to_argb(&mut self.present);
        submit(&self.present, target.width(), target.height());
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
