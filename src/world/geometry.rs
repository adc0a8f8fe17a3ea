use glam::{Vec2, vec2};
use thiserror::Error;

use crate::world::math::cross;
use crate::world::texture::TextureId;

pub type VertexId = u16;
pub type SectorId = u16;

/// Default wall height used when a sector is created by the authoring tool.
pub const DEFAULT_CEILING_H: f32 = 6.0;

/// Default planar texture-scale (texels per world unit on floors/ceilings).
pub const DEFAULT_PLANE_SCALE: f32 = 4.0;

/// Level loaded once at start-up.  Vertex and sector indices stay stable for
/// the whole session; only sector heights change per frame.
#[derive(Clone, Debug, Default)]
pub struct Level {
    pub vertices: Vec<Vertex>,
    pub sectors: Vec<Sector>,
}

/*----------------------- simple primitives --------------------------*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
}

/// Directed boundary segment `v_a → v_b` of its owning sector.
///
/// Sectors wind counter-clockwise, so the owning sector lies to the *left*
/// of the edge and [`Level::side`] is negative for interior points.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub v_a: VertexId,
    pub v_b: VertexId,
    /// `None` = solid wall, `Some(s)` = portal into sector `s`.
    pub neighbor: Option<SectorId>,
    pub tex: TextureId,
    /// x = horizontal repeat, y = vertical repeat.
    pub tex_scale: Vec2,
    solid: bool,
}

impl Edge {
    pub fn new(v_a: VertexId, v_b: VertexId, neighbor: Option<SectorId>, tex: TextureId) -> Self {
        Self::with_scale(v_a, v_b, neighbor, tex, vec2(1.0, 1.0))
    }

    pub fn with_scale(
        v_a: VertexId,
        v_b: VertexId,
        neighbor: Option<SectorId>,
        tex: TextureId,
        tex_scale: Vec2,
    ) -> Self {
        Self {
            v_a,
            v_b,
            neighbor,
            tex,
            tex_scale,
            solid: neighbor.is_none(),
        }
    }

    #[inline(always)]
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Turn this edge into a portal (or back into a wall).
    pub fn set_neighbor(&mut self, neighbor: Option<SectorId>) {
        self.neighbor = neighbor;
        self.solid = neighbor.is_none();
    }
}

/// Convex polygon with flat floor and ceiling.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    pub edges: Vec<Edge>,
    pub floor_h: f32,
    pub ceil_h: f32,
    pub floor_tex: TextureId,
    pub ceil_tex: TextureId,
    /// Texels per world unit on the floor / ceiling planes.
    pub tex_scale: f32,
}

impl Sector {
    pub fn new(edges: Vec<Edge>, floor_h: f32, ceil_h: f32) -> Self {
        Self {
            edges,
            floor_h,
            ceil_h,
            floor_tex: 0,
            ceil_tex: 0,
            tex_scale: DEFAULT_PLANE_SCALE,
        }
    }

    pub fn with_textures(mut self, floor_tex: TextureId, ceil_tex: TextureId) -> Self {
        self.floor_tex = floor_tex;
        self.ceil_tex = ceil_tex;
        self
    }

    /// Iterate the sectors this one shares a portal with.
    pub fn neighbors(&self) -> impl Iterator<Item = SectorId> + '_ {
        self.edges.iter().filter_map(|e| e.neighbor)
    }
}

/*--------------------------- errors ---------------------------------*/

#[derive(Error, Debug, PartialEq)]
pub enum LevelError {
    #[error("sector {sector}: needs at least 3 edges, got {count}")]
    TooFewEdges { sector: usize, count: usize },

    #[error("sector {sector}: edge {edge} does not connect to the next edge")]
    OpenLoop { sector: usize, edge: usize },

    #[error("sector {sector}: vertex {vertex} out of range")]
    BadVertex { sector: usize, vertex: VertexId },

    #[error("sector {sector}: edge {edge} points to missing sector {neighbor}")]
    BadNeighbor {
        sector: usize,
        edge: usize,
        neighbor: SectorId,
    },

    #[error("sector {sector}: edge {edge} has no matching reverse edge in sector {neighbor}")]
    UnpairedPortal {
        sector: usize,
        edge: usize,
        neighbor: SectorId,
    },

    #[error("sector {sector}: ceiling {ceil} below floor {floor}")]
    InvertedHeights { sector: usize, floor: f32, ceil: f32 },

    #[error("sector {sector}: winding is not counter-clockwise")]
    Clockwise { sector: usize },

    #[error("vertex {0} listed twice in one sector")]
    DuplicateVertex(VertexId),
}

/*------------------------- queries ----------------------------------*/

impl Level {
    pub fn new(vertices: Vec<Vec2>, sectors: Vec<Sector>) -> Self {
        Self {
            vertices: vertices.into_iter().map(|pos| Vertex { pos }).collect(),
            sectors,
        }
    }

    #[inline(always)]
    pub fn vertex(&self, id: VertexId) -> Vec2 {
        self.vertices[id as usize].pos
    }

    #[inline]
    pub fn sector(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get(id as usize)
    }

    /// World endpoints of `edge`.
    #[inline(always)]
    pub fn edge_points(&self, edge: &Edge) -> (Vec2, Vec2) {
        (self.vertex(edge.v_a), self.vertex(edge.v_b))
    }

    /// Side test: < 0 inside (left of `v_a → v_b`), > 0 outside.
    #[inline]
    pub fn side(&self, edge: &Edge, p: Vec2) -> f32 {
        let (a, b) = self.edge_points(edge);
        -cross(b - a, p - a)
    }

    /// Convex containment: inside every edge's half-plane.
    pub fn sector_contains(&self, id: SectorId, p: Vec2) -> bool {
        self.sector(id)
            .map(|s| s.edges.iter().all(|e| self.side(e, p) <= 0.0))
            .unwrap_or(false)
    }

    /// Linear scan for the sector containing `p`.  Only used to seed the
    /// camera's sector; frame-to-frame tracking goes through edge crossing.
    pub fn find_sector(&self, p: Vec2) -> Option<SectorId> {
        (0..self.sectors.len() as SectorId).find(|&id| self.sector_contains(id, p))
    }

    /// Structural checks an authoring tool should run before handing the
    /// level to the renderer.  The renderer itself never validates.
    pub fn validate(&self) -> Result<(), LevelError> {
        for (si, sector) in self.sectors.iter().enumerate() {
            let n = sector.edges.len();
            if n < 3 {
                return Err(LevelError::TooFewEdges {
                    sector: si,
                    count: n,
                });
            }
            if sector.ceil_h < sector.floor_h {
                return Err(LevelError::InvertedHeights {
                    sector: si,
                    floor: sector.floor_h,
                    ceil: sector.ceil_h,
                });
            }

            for (ei, edge) in sector.edges.iter().enumerate() {
                for v in [edge.v_a, edge.v_b] {
                    if v as usize >= self.vertices.len() {
                        return Err(LevelError::BadVertex {
                            sector: si,
                            vertex: v,
                        });
                    }
                }
                if edge.v_b != sector.edges[(ei + 1) % n].v_a {
                    return Err(LevelError::OpenLoop {
                        sector: si,
                        edge: ei,
                    });
                }
                if let Some(nb) = edge.neighbor {
                    let Some(other) = self.sector(nb) else {
                        return Err(LevelError::BadNeighbor {
                            sector: si,
                            edge: ei,
                            neighbor: nb,
                        });
                    };
                    let pairs = other
                        .edges
                        .iter()
                        .filter(|o| {
                            o.v_a == edge.v_b
                                && o.v_b == edge.v_a
                                && o.neighbor == Some(si as SectorId)
                        })
                        .count();
                    if pairs != 1 {
                        return Err(LevelError::UnpairedPortal {
                            sector: si,
                            edge: ei,
                            neighbor: nb,
                        });
                    }
                }
            }

            let loop_pts: Vec<Vec2> = sector.edges.iter().map(|e| self.vertex(e.v_a)).collect();
            if crate::world::math::signed_area(&loop_pts) <= 0.0 {
                return Err(LevelError::Clockwise { sector: si });
            }
        }
        Ok(())
    }
}
