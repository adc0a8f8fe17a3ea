use glam::{Vec2, vec2};

use crate::renderer::software::context::RenderContext;
use crate::world::math::{clamp, lerp, line_intersection};

/// Nudge applied to a near-plane intersection so the projection never
/// divides by zero.
const NEAR_NUDGE: f32 = 0.01;

/// World units covered by one horizontal texture repeat at scale 1.
pub const TEX_WORLD_SIZE: f32 = 8.0;

/// An edge after near-plane clipping and screen projection.
///
/// `left` is the projection of `v_a`, `right` of `v_b`; for a front-facing
/// edge of a counter-clockwise sector that is also screen left-to-right.
#[derive(Clone, Copy, Debug)]
pub struct ProjectedEdge {
    /* exact and floored screen columns */
    pub left_x: f32,
    pub right_x: f32,
    pub left_xs: i32,
    pub right_xs: i32,

    /* was an endpoint moved onto the near plane? */
    pub cut_left: bool,
    pub cut_right: bool,

    /* camera-space depth of the (clipped) endpoints */
    pub depth_l: f32,
    pub depth_r: f32,

    /* perspective-correct interpolants */
    pub invz_l: f32,
    pub invz_r: f32,
    pub uoz_l: f32,
    pub uoz_r: f32,
}

/// A world height projected at both ends of an edge (exact rows).
#[derive(Clone, Copy, Debug)]
pub struct RowSpan {
    pub l: f32,
    pub r: f32,
}

impl RowSpan {
    #[inline(always)]
    pub fn at(&self, t: f32) -> f32 {
        lerp(self.l, self.r, t)
    }
}

impl ProjectedEdge {
    /// Fraction of the projected span covered at column `x`, clamped to
    /// `0 ..= 1`.
    #[inline(always)]
    pub fn complete(&self, x: i32) -> f32 {
        let span = self.right_x - self.left_x;
        if span.abs() <= f32::EPSILON {
            return 0.0;
        }
        clamp((x as f32 - self.left_x) / span, 0.0, 1.0)
    }

    /// Camera-space depth at fraction `t`.
    #[inline(always)]
    pub fn depth_at(&self, t: f32) -> f32 {
        1.0 / lerp(self.invz_l, self.invz_r, t)
    }

    /// Perspective-correct horizontal texture coordinate (in repeats) at
    /// fraction `t`.
    #[inline(always)]
    pub fn u_at(&self, t: f32) -> f32 {
        lerp(self.uoz_l, self.uoz_r, t) * self.depth_at(t)
    }

    #[cfg(test)]
    fn u_at_column(&self, x: i32) -> f32 {
        self.u_at(self.complete(x))
    }
}

impl RenderContext<'_> {
    /// Screen column of a camera-space point (`x` = depth, `y` = lateral).
    #[inline(always)]
    pub fn column(&self, p: Vec2) -> f32 {
        (p.y / (p.x * self.tan_half_fov) + 1.0) / 2.0 * self.width_f
    }

    /// Screen row of world height `h` seen at camera-space `depth`.
    #[inline(always)]
    pub fn row(&self, h: f32, depth: f32) -> f32 {
        (1.0 - (h - self.eye_z) / (depth * self.tan_half_fov)) / 2.0 * self.height_f
    }

    pub fn rows(&self, pe: &ProjectedEdge, h: f32) -> RowSpan {
        RowSpan {
            l: self.row(h, pe.depth_l),
            r: self.row(h, pe.depth_r),
        }
    }

    /// Transform, near-clip and project the edge `a → b`.
    ///
    /// Returns `None` for zero-length edges and for edges entirely at or
    /// behind the camera.  `tex_scale_x` is the edge's horizontal repeat.
    pub fn project_edge(&self, a: Vec2, b: Vec2, tex_scale_x: f32) -> Option<ProjectedEdge> {
        let len = (b - a).length();
        if len <= f32::EPSILON {
            return None;
        }

        // ──────────────────────────────────────────────────────────────
        // 1. camera-space endpoints
        // ──────────────────────────────────────────────────────────────
        let left = self.camera.to_cam(a);
        let right = self.camera.to_cam(b);

        // ──────────────────────────────────────────────────────────────
        // 2. near-plane cull / clip
        // ──────────────────────────────────────────────────────────────
        if left.x <= 0.0 && right.x <= 0.0 {
            return None;
        }

        let near_a = vec2(0.0, -1.0);
        let near_b = vec2(0.0, 1.0);

        let mut lc = left;
        let mut rc = right;
        let mut cut_l = 0.0;
        let mut cut_r = 1.0;

        let cut_left = left.x <= 0.0;
        if cut_left {
            lc = line_intersection(left, right, near_a, near_b);
            lc.x += NEAR_NUDGE;
            cut_l = 1.0 - (lc.x - rc.x) / (left.x - right.x);
        }
        let cut_right = right.x <= 0.0;
        if cut_right {
            rc = line_intersection(left, right, near_a, near_b);
            rc.x += NEAR_NUDGE;
            cut_r = (rc.x - lc.x) / (right.x - left.x);
        }

        // ──────────────────────────────────────────────────────────────
        // 3. screen columns
        // ──────────────────────────────────────────────────────────────
        let left_x = self.column(lc);
        let right_x = self.column(rc);

        // ──────────────────────────────────────────────────────────────
        // 4. perspective coefficients
        // ──────────────────────────────────────────────────────────────
        let hor_scale = len / TEX_WORLD_SIZE * tex_scale_x;

        Some(ProjectedEdge {
            left_x,
            right_x,
            left_xs: left_x.floor() as i32,
            right_xs: right_x.floor() as i32,
            cut_left,
            cut_right,
            depth_l: lc.x,
            depth_r: rc.x,
            invz_l: 1.0 / lc.x,
            invz_r: 1.0 / rc.x,
            uoz_l: hor_scale * cut_l / lc.x,
            uoz_r: hor_scale * cut_r / rc.x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{PixelBuffer, RenderConfig};
    use crate::world::{camera::Camera, demo, geometry::Level, texture::TextureBank};

    fn with_ctx<R>(camera: &Camera, f: impl FnOnce(&RenderContext) -> R) -> R {
        let level = Level::default();
        let bank = TextureBank::default_with_checker();
        let mut fb = PixelBuffer::new(320, 200);
        let ctx = RenderContext::new(&level, camera, &bank, &mut fb, RenderConfig::default());
        f(&ctx)
    }

    /// True U along `a → b` for the ray through screen column `x`, found by
    /// intersecting the ray with the edge in camera space.
    fn direct_u(ctx: &RenderContext, a: Vec2, b: Vec2, x: i32, scale: f32) -> f32 {
        let l = ctx.camera.to_cam(a);
        let r = ctx.camera.to_cam(b);
        let s = (x as f32 / ctx.width_f * 2.0 - 1.0) * ctx.tan_half_fov;
        // l + (r - l) t lies on lateral = s * depth
        let t = (s * l.x - l.y) / ((r.y - l.y) - s * (r.x - l.x));
        t * (b - a).length() / TEX_WORLD_SIZE * scale
    }

    #[test]
    fn midpoint_u_matches_direct_projection() {
        let cam = Camera::new(vec2(0.0, 0.0), 0.0, 90.0, 0);
        // slanted wall, fully in front of the camera
        let a = vec2(3.0, -4.0);
        let b = vec2(9.0, 5.0);
        with_ctx(&cam, |ctx| {
            let pe = ctx.project_edge(a, b, 1.0).unwrap();
            assert!(!pe.cut_left && !pe.cut_right);
            assert!(pe.left_x < pe.right_x);

            let mid = ((pe.left_x + pe.right_x) / 2.0) as i32;
            let got = pe.u_at_column(mid);
            let want = direct_u(ctx, a, b, mid, 1.0);
            assert!((got - want).abs() < 1e-3, "u {got} vs {want}");

            // and the ends are exact
            assert!(pe.u_at(0.0).abs() < 1e-5);
            let full = (b - a).length() / TEX_WORLD_SIZE;
            assert!((pe.u_at(1.0) - full).abs() < 1e-4);
        });
    }

    #[test]
    fn clipped_edge_starts_at_cut_fraction() {
        let cam = Camera::new(vec2(0.0, 0.0), 0.0, 90.0, 0);
        // half of the edge lies behind the camera
        let a = vec2(-2.0, -3.0);
        let b = vec2(2.0, -3.0);
        with_ctx(&cam, |ctx| {
            let pe = ctx.project_edge(a, b, 2.0).unwrap();
            assert!(pe.cut_left && !pe.cut_right);
            assert!((pe.depth_l - NEAR_NUDGE).abs() < 1e-6);

            let full = 4.0 / TEX_WORLD_SIZE * 2.0;
            // cut point is ~half way along the edge
            assert!((pe.u_at(0.0) - full * 0.5).abs() < 0.01);
            assert!((pe.u_at(1.0) - full).abs() < 1e-4);
        });
    }

    #[test]
    fn edges_behind_or_degenerate_are_dropped() {
        let cam = Camera::new(vec2(0.0, 0.0), 0.0, 90.0, 0);
        with_ctx(&cam, |ctx| {
            assert!(ctx.project_edge(vec2(-1.0, 1.0), vec2(-3.0, -1.0), 1.0).is_none());
            assert!(ctx.project_edge(vec2(0.0, 2.0), vec2(0.0, -2.0), 1.0).is_none());
            assert!(ctx.project_edge(vec2(4.0, 1.0), vec2(4.0, 1.0), 1.0).is_none());
        });
    }

    #[test]
    fn eye_level_projects_to_screen_centre() {
        let cam = Camera::new(demo::CAMERA_START, 0.0, 90.0, 0);
        with_ctx(&cam, |ctx| {
            assert!((ctx.row(cam.z, 5.0) - 100.0).abs() < 1e-4);
            assert!((ctx.column(vec2(5.0, 0.0)) - 160.0).abs() < 1e-4);
            // higher things are further up the screen
            assert!(ctx.row(cam.z + 1.0, 5.0) < ctx.row(cam.z, 5.0));
        });
    }
}
