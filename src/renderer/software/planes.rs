use glam::{Vec2, vec2};

use crate::{
    renderer::software::{clip::ClipWindow, context::RenderContext},
    world::geometry::Sector,
};

/// Rows still owed to the ceiling and to the floor of the sector being
/// drawn.  Both start as a copy of the incoming window; walls and portals
/// push the ceiling's bottom up and the floor's top down, and one deferred
/// pass per sector fills what is left.
pub struct PlaneRegions {
    pub ceil: ClipWindow,
    pub floor: ClipWindow,
}

impl PlaneRegions {
    pub fn new(window: &ClipWindow) -> Self {
        Self {
            ceil: window.clone(),
            floor: window.clone(),
        }
    }
}

impl RenderContext<'_> {
    /// Depth at which the view ray through screen row `y` meets the
    /// horizontal plane at height `h`.  Not finite or not positive when the
    /// row looks away from the plane.
    #[inline(always)]
    pub fn plane_depth(&self, y: f32, h: f32) -> f32 {
        let yc = (y / self.height_f - 0.5) * 2.0;
        -(h - self.eye_z) / (yc * self.tan_half_fov)
    }

    /// World point seen at screen `(x, y)` on the plane at `depth`.
    #[inline]
    pub fn plane_point(&self, x: f32, depth: f32) -> Vec2 {
        let lateral = (x / self.width_f - 0.5) * 2.0 * depth * self.tan_half_fov;
        self.camera.to_world(vec2(depth, lateral))
    }

    /// Fill the ceiling (`is_ceil`) or the floor of `sector` over `region`.
    ///
    /// Depth is constant along a row, so the texture coordinate is linear in
    /// `x` and is interpolated between the two ends of the window.
    pub fn fill_plane(&mut self, sector: &Sector, region: &ClipWindow, is_ceil: bool) {
        if region.is_empty() {
            return;
        }
        let (h, tex_id) = if is_ceil {
            (sector.ceil_h, sector.ceil_tex)
        } else {
            (sector.floor_h, sector.floor_tex)
        };
        let bank = self.bank;
        let tex = bank.texture_or_missing(tex_id);

        let (x_l, x_r) = (region.x0 as f32, region.x1 as f32);
        let span = x_r - x_l;
        let (y0, y1) = region.row_extent(self.height);

        for y in y0..y1 {
            let z = self.plane_depth(y as f32, h);
            if !z.is_finite() || z <= 0.0 {
                continue;
            }
            let p0 = self.plane_point(x_l, z) * sector.tex_scale;
            let p1 = self.plane_point(x_r, z) * sector.tex_scale;

            for x in region.x0..region.x1 {
                let (top, bottom) = region.band(x);
                if y < top || y >= bottom {
                    continue;
                }
                let p = p0.lerp(p1, (x as f32 - x_l) / span);
                let texel = tex.texel(p.x.floor() as i32, p.y.floor() as i32);
                self.plot(x, y, texel, z);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{PixelBuffer, RenderConfig};
    use crate::world::{camera::Camera, geometry::Level, texture::TextureBank};

    #[test]
    fn plane_projection_inverts_wall_projection() {
        let level = Level::default();
        let bank = TextureBank::default_with_checker();
        let mut fb = PixelBuffer::new(320, 240);
        let cam = Camera::new(vec2(2.0, -1.0), 0.8, 90.0, 0);
        let ctx = RenderContext::new(&level, &cam, &bank, &mut fb, RenderConfig::default());

        let floor_h = 0.0;
        let world = cam.pos + cam.forward() * 6.0 + cam.right() * 1.5;

        let c = cam.to_cam(world);
        let col = ctx.column(c);
        let row = ctx.row(floor_h, c.x);

        let z = ctx.plane_depth(row, floor_h);
        assert!((z - c.x).abs() < 1e-3, "depth {z} vs {}", c.x);
        let back = ctx.plane_point(col, z);
        assert!((back - world).length() < 1e-3, "{back} vs {world}");
    }

    #[test]
    fn rows_above_horizon_miss_the_floor() {
        let level = Level::default();
        let bank = TextureBank::default_with_checker();
        let mut fb = PixelBuffer::new(64, 64);
        let cam = Camera::new(Vec2::ZERO, 0.0, 90.0, 0);
        let ctx = RenderContext::new(&level, &cam, &bank, &mut fb, RenderConfig::default());
        assert!(ctx.plane_depth(10.0, 0.0) < 0.0);
        assert!(ctx.plane_depth(50.0, 0.0) > 0.0);
        assert!(!ctx.plane_depth(32.0, 0.0).is_finite());
    }
}
