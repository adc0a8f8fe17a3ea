use glam::Vec2;

use super::geometry::{
    DEFAULT_CEILING_H, DEFAULT_PLANE_SCALE, Edge, Level, LevelError, Sector, SectorId, Vertex,
    VertexId,
};
use super::math::signed_area;
use super::texture::TextureId;

/// Heights and textures for a sector created from vertex picks.
#[derive(Clone, Copy, Debug)]
pub struct SectorSpec {
    pub floor_h: f32,
    pub ceil_h: f32,
    pub floor_tex: TextureId,
    pub ceil_tex: TextureId,
    pub wall_tex: TextureId,
    pub tex_scale: f32,
}

impl Default for SectorSpec {
    fn default() -> Self {
        Self {
            floor_h: 0.0,
            ceil_h: DEFAULT_CEILING_H,
            floor_tex: 1,
            ceil_tex: 1,
            wall_tex: 0,
            tex_scale: DEFAULT_PLANE_SCALE,
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────
//                       Level – authoring helpers
// ──────────────────────────────────────────────────────────────────────────
impl Level {
    /// Append a vertex and return its id.
    pub fn add_vertex(&mut self, pos: Vec2) -> VertexId {
        self.vertices.push(Vertex { pos });
        (self.vertices.len() - 1) as VertexId
    }

    /// First vertex closer than `radius` to `pos`.
    pub fn pick_vertex(&self, pos: Vec2, radius: f32) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| (v.pos - pos).length() < radius)
            .map(|i| i as VertexId)
    }

    /// Locate an existing edge joining `a` and `b` in either direction.
    /// Returns `(sector, edge index)`.
    fn find_edge(&self, a: VertexId, b: VertexId) -> Option<(usize, usize)> {
        self.sectors.iter().enumerate().find_map(|(si, s)| {
            s.edges
                .iter()
                .position(|e| (e.v_a == a && e.v_b == b) || (e.v_a == b && e.v_b == a))
                .map(|ei| (si, ei))
        })
    }

    /// Build a sector from vertex picks in any winding.
    ///
    /// * Clockwise picks are reversed so the stored loop is counter-clockwise.
    /// * Every new edge that coincides with an edge of an existing sector
    ///   becomes a portal, and the existing edge is relinked to the new sector.
    pub fn create_sector(
        &mut self,
        picks: &[VertexId],
        spec: SectorSpec,
    ) -> Result<SectorId, LevelError> {
        let new_id = self.sectors.len();
        if picks.len() < 3 {
            return Err(LevelError::TooFewEdges {
                sector: new_id,
                count: picks.len(),
            });
        }
        for (i, &v) in picks.iter().enumerate() {
            if v as usize >= self.vertices.len() {
                return Err(LevelError::BadVertex {
                    sector: new_id,
                    vertex: v,
                });
            }
            if picks[..i].contains(&v) {
                return Err(LevelError::DuplicateVertex(v));
            }
        }

        let mut loop_ids = picks.to_vec();
        let pts: Vec<Vec2> = loop_ids.iter().map(|&v| self.vertex(v)).collect();
        if signed_area(&pts) < 0.0 {
            loop_ids.reverse();
        }

        let n = loop_ids.len();
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            let a = loop_ids[i];
            let b = loop_ids[(i + 1) % n];
            let neighbor = match self.find_edge(a, b) {
                Some((si, ei)) => {
                    self.sectors[si].edges[ei].set_neighbor(Some(new_id as SectorId));
                    Some(si as SectorId)
                }
                None => None,
            };
            edges.push(Edge::new(a, b, neighbor, spec.wall_tex));
        }

        let mut sector = Sector::new(edges, spec.floor_h, spec.ceil_h)
            .with_textures(spec.floor_tex, spec.ceil_tex);
        sector.tex_scale = spec.tex_scale;
        self.sectors.push(sector);

        log::debug!("created sector {new_id} with {n} edges");
        Ok(new_id as SectorId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn two_squares_cw() -> (Level, SectorId, SectorId) {
        let mut lvl = Level::default();
        let v: Vec<VertexId> = [
            vec2(0.0, 0.0),
            vec2(4.0, 0.0),
            vec2(4.0, 4.0),
            vec2(0.0, 4.0),
            vec2(8.0, 0.0),
            vec2(8.0, 4.0),
        ]
        .into_iter()
        .map(|p| lvl.add_vertex(p))
        .collect();

        // picks deliberately clockwise
        let a = lvl
            .create_sector(&[v[0], v[3], v[2], v[1]], SectorSpec::default())
            .unwrap();
        let b = lvl
            .create_sector(&[v[1], v[2], v[5], v[4]], SectorSpec::default())
            .unwrap();
        (lvl, a, b)
    }

    #[test]
    fn winding_is_fixed_to_counter_clockwise() {
        let (lvl, a, b) = two_squares_cw();
        for id in [a, b] {
            let s = lvl.sector(id).unwrap();
            let pts: Vec<Vec2> = s.edges.iter().map(|e| lvl.vertex(e.v_a)).collect();
            assert!(signed_area(&pts) > 0.0);
        }
        let inside_a = vec2(2.0, 2.0);
        for e in &lvl.sector(a).unwrap().edges {
            assert!(lvl.side(e, inside_a) < 0.0);
        }
    }

    #[test]
    fn shared_edge_becomes_portal_pair() {
        let (lvl, a, b) = two_squares_cw();
        assert_eq!(lvl.validate(), Ok(()));

        let pa = lvl.sectors[a as usize]
            .edges
            .iter()
            .find(|e| e.neighbor == Some(b))
            .expect("portal from a to b");
        let pb = lvl.sectors[b as usize]
            .edges
            .iter()
            .find(|e| e.neighbor == Some(a))
            .expect("portal from b to a");
        assert_eq!((pa.v_a, pa.v_b), (pb.v_b, pb.v_a));
        assert!(!pa.is_solid() && !pb.is_solid());
    }

    #[test]
    fn too_few_and_duplicate_picks_rejected() {
        let mut lvl = Level::default();
        let a = lvl.add_vertex(vec2(0.0, 0.0));
        let b = lvl.add_vertex(vec2(1.0, 0.0));
        let c = lvl.add_vertex(vec2(0.0, 1.0));
        assert!(matches!(
            lvl.create_sector(&[a, b], SectorSpec::default()),
            Err(LevelError::TooFewEdges { count: 2, .. })
        ));
        assert_eq!(
            lvl.create_sector(&[a, b, a], SectorSpec::default()),
            Err(LevelError::DuplicateVertex(a))
        );
        assert!(lvl.create_sector(&[a, b, c], SectorSpec::default()).is_ok());
    }

    #[test]
    fn pick_vertex_within_radius() {
        let mut lvl = Level::default();
        lvl.add_vertex(vec2(0.0, 0.0));
        let b = lvl.add_vertex(vec2(5.0, 5.0));
        assert_eq!(lvl.pick_vertex(vec2(5.2, 4.9), 0.75), Some(b));
        assert_eq!(lvl.pick_vertex(vec2(2.5, 2.5), 0.75), None);
    }
}
