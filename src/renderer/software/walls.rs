//! Column rasterisation of solid walls and of the upper / lower "kicker"
//! walls around a portal opening.

use crate::{
    renderer::software::{
        clip::ClipWindow,
        context::RenderContext,
        planes::PlaneRegions,
        projection::{ProjectedEdge, RowSpan, TEX_WORLD_SIZE},
    },
    world::geometry::{Edge, Sector},
};

impl RenderContext<'_> {
    /// Paint a solid wall over columns `x0 .. x1` and close them.
    ///
    /// The ceiling region of each column ends where the wall starts and the
    /// floor region begins where the wall ends.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_wall(
        &mut self,
        sector: &Sector,
        edge: &Edge,
        pe: &ProjectedEdge,
        x0: i32,
        x1: i32,
        clip: &mut ClipWindow,
        planes: &mut PlaneRegions,
    ) {
        let bank = self.bank;
        let tex = bank.texture_or_missing(edge.tex);
        let tex_w = tex.w as f32;
        let tex_h = tex.h as f32;

        let ceil = self.rows(pe, sector.ceil_h);
        let floor = self.rows(pe, sector.floor_h);
        let ver_scale = (sector.ceil_h - sector.floor_h) / TEX_WORLD_SIZE * edge.tex_scale.y;

        for x in x0..x1 {
            let t = pe.complete(x);
            let wall_start = ceil.at(t).floor() as i32;
            let floor_start = floor.at(t).floor() as i32;

            planes.ceil.clip_bottom(x, wall_start);
            planes.floor.clip_top(x, floor_start);

            let z = pe.depth_at(t);
            let tex_x = (pe.u_at(t) * tex_w).floor() as i32;
            let wall_h = (floor_start - wall_start) as f32;

            let (top, bottom) = clip.band(x);
            for y in top.max(wall_start)..bottom.min(floor_start) {
                let v = (y - wall_start) as f32 / wall_h * tex_h * ver_scale;
                self.plot(x, y, tex.texel(tex_x, v.round() as i32), z);
            }
            clip.close(x);
        }
    }

    /// Paint the kickers of a portal into `next` and narrow each column of
    /// `clip` to the opening left between them.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_portal(
        &mut self,
        sector: &Sector,
        next: &Sector,
        edge: &Edge,
        pe: &ProjectedEdge,
        x0: i32,
        x1: i32,
        clip: &mut ClipWindow,
        planes: &mut PlaneRegions,
    ) {
        let bank = self.bank;
        let tex = bank.texture_or_missing(edge.tex);
        let tex_w = tex.w as f32;
        let tex_h = tex.h as f32;

        let delta_floor = next.floor_h - sector.floor_h;
        let delta_ceil = next.ceil_h - sector.ceil_h;
        let upper = delta_ceil < 0.0;
        let lower = delta_floor > 0.0;

        let top_scale = -delta_ceil / TEX_WORLD_SIZE * edge.tex_scale.y;
        let bottom_scale = delta_floor / TEX_WORLD_SIZE * edge.tex_scale.y;

        let ceil = self.rows(pe, sector.ceil_h);
        let floor = self.rows(pe, sector.floor_h);
        let floored = |s: RowSpan| RowSpan {
            l: s.l.floor(),
            r: s.r.floor(),
        };
        let opening_top = floored(self.rows(pe, next.ceil_h));
        let opening_bottom = floored(self.rows(pe, next.floor_h));

        for x in x0..x1 {
            let t = pe.complete(x);
            let top_wall_start = ceil.at(t).floor() as i32;
            let floor_start = floor.at(t).floor() as i32;

            let mut portal_start = if upper {
                opening_top.at(t).floor() as i32
            } else {
                top_wall_start
            };
            let bottom_wall_start = if lower {
                opening_bottom.at(t).ceil() as i32
            } else {
                floor_start
            };
            if portal_start > floor_start {
                portal_start = floor_start + 1;
            }

            planes.ceil.clip_bottom(x, top_wall_start);
            planes.floor.clip_top(x, floor_start);

            let z = pe.depth_at(t);
            let tex_x = (pe.u_at(t) * tex_w).floor() as i32;

            let (top, bottom) = clip.band(x);

            /* upper kicker */
            let upper_h = (portal_start - top_wall_start) as f32;
            for y in top.max(top_wall_start)..bottom.min(portal_start) {
                let v = (y - portal_start) as f32 / upper_h * tex_h * top_scale;
                self.plot(x, y, tex.texel(tex_x, v.floor() as i32), z);
            }

            /* lower kicker */
            if lower {
                let lower_h = (floor_start - bottom_wall_start) as f32;
                for y in top.max(bottom_wall_start)..bottom.min(floor_start) {
                    let v = (y - bottom_wall_start) as f32 / lower_h * tex_h * bottom_scale;
                    self.plot(x, y, tex.texel(tex_x, v.floor() as i32), z);
                }
            }

            clip.narrow(
                x,
                portal_start.clamp(0, self.height),
                bottom_wall_start.clamp(0, self.height),
            );
        }
    }
}
