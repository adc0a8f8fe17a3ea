//! Recursive sector traversal.
//!
//! One call draws one sector into the window it was handed:
//!
//! 1. every edge is projected; solid walls paint and close their columns,
//!    portals paint their kickers and narrow their columns to the opening;
//! 2. the sector's ceiling and floor fill whatever rows the edges left;
//! 3. each visible portal recurses with its own snapshot of the narrowed
//!    bands, one level deeper.
//!
//! There is no depth buffer: traversal order alone gives correct occlusion
//! because a child only ever paints inside the opening its parent left.

use smallvec::SmallVec;

use crate::{
    renderer::software::{clip::ClipWindow, context::RenderContext, planes::PlaneRegions},
    world::geometry::{Edge, Sector, SectorId},
};

/// A portal waiting to be drawn after its parent's planes, over columns
/// `x0 .. x1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingPortal {
    pub sector: SectorId,
    pub x0: i32,
    pub x1: i32,
}

impl RenderContext<'_> {
    /// Draw sector `id` at recursion `depth` inside `window`.
    pub fn draw_sector(&mut self, id: SectorId, depth: u32, window: &ClipWindow) {
        let level = self.level;
        let Some(sector) = level.sector(id) else {
            log::warn!("portal to missing sector {id}");
            return;
        };
        if window.is_empty() || !self.enter_sector(depth) {
            return;
        }

        let mut clip = window.clone();
        let mut planes = PlaneRegions::new(window);
        let mut pending: SmallVec<[PendingPortal; 4]> = SmallVec::new();

        for edge in &sector.edges {
            if let Some(p) = self.draw_edge(sector, edge, depth, window, &mut clip, &mut planes) {
                pending.push(p);
            }
        }

        self.fill_plane(sector, &planes.ceil, true);
        self.fill_plane(sector, &planes.floor, false);

        // bands are cut out only now, so a child never reaches into columns
        // a later wall of this sector closed
        for p in pending {
            let child = clip.child(p.x0, p.x1);
            self.draw_sector(p.sector, depth + 1, &child);
        }
    }

    /// Project and paint one edge.  Returns the child draw a visible portal
    /// asks for.
    pub fn draw_edge(
        &mut self,
        sector: &Sector,
        edge: &Edge,
        depth: u32,
        window: &ClipWindow,
        clip: &mut ClipWindow,
        planes: &mut PlaneRegions,
    ) -> Option<PendingPortal> {
        let level = self.level;
        let (a, b) = level.edge_points(edge);
        let pe = self.project_edge(a, b, edge.tex_scale.x)?;

        // back-facing spans are only kept for the camera's own sector, where
        // an edge the camera stands on may project inverted
        if pe.left_xs >= pe.right_xs && depth != 0 {
            return None;
        }
        if pe.left_xs >= window.x1 || pe.right_xs < window.x0 {
            return None;
        }
        let x0 = pe.left_xs.max(window.x0);
        let x1 = pe.right_xs.min(window.x1);

        let Some(next_id) = edge.neighbor else {
            self.draw_wall(sector, edge, &pe, x0, x1, clip, planes);
            return None;
        };
        let Some(next) = level.sector(next_id) else {
            log::warn!("edge points to missing sector {next_id}, drawn as wall");
            self.draw_wall(sector, edge, &pe, x0, x1, clip, planes);
            return None;
        };
        self.draw_portal(sector, next, edge, &pe, x0, x1, clip, planes);

        // standing on the portal: the camera's sector is already being drawn
        if next_id == self.camera.sector {
            return None;
        }

        let cx0 = (if pe.cut_left { 0 } else { pe.left_xs }).max(window.x0);
        let cx1 = (if pe.cut_right { self.width } else { pe.right_xs }).min(window.x1);
        (cx0 < cx1).then_some(PendingPortal {
            sector: next_id,
            x0: cx0,
            x1: cx1,
        })
    }
}
