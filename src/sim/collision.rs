//! Camera-vs-edge collision and sector-crossing detection.
//!
//! The camera is a circle of `camera.radius`.  Each frame the home sector's
//! edges push it back inside and detect when it walked through a portal,
//! then every directly connected neighbour's edges get one push-only pass
//! so walls just across a portal still block.

use glam::Vec2;

use crate::world::camera::Camera;
use crate::world::geometry::{Edge, Level, Sector, SectorId};

/// Largest floor rise the camera walks up.
pub const MAX_STEP_HEIGHT: f32 = 0.75;
/// Space needed above the eye.
pub const HEAD_ROOM: f32 = 0.2;

const EPS: f32 = 1e-6;

/* ─────────────────────────  SOLID-EDGE TEST  ───────────────────────────── */

/// Return `true` if `edge` of `from` blocks the camera.
///
/// A portal is passable when the opening shared by both sectors fits the
/// camera's body (eye offset plus head room) and the neighbour's floor is no
/// more than [`MAX_STEP_HEIGHT`] above the camera's feet.
#[inline]
fn edge_is_solid(level: &Level, from: &Sector, edge: &Edge, camera: &Camera) -> bool {
    /* ----- 1. walls are always solid -------------------------------------- */
    let Some(next_id) = edge.neighbor else {
        return true;
    };
    let Some(next) = level.sector(next_id) else {
        return true;
    };

    /* ----- 2. vertical opening ------------------------------------------- */
    let open_top = from.ceil_h.min(next.ceil_h);
    let open_bottom = from.floor_h.max(next.floor_h);
    if open_top - open_bottom < camera.eye_height + HEAD_ROOM {
        return true;
    }

    /* ----- 3. step-up limit ---------------------------------------------- */
    let feet = camera.z - camera.eye_height;
    next.floor_h - feet > MAX_STEP_HEIGHT
}

/* ─────────────────────────  ONE SECTOR PASS  ───────────────────────────── */

/// Push the camera out of every solid edge of `sector_id` it overlaps.
///
/// With `detect_crossing`, returns the neighbour whose passable portal the
/// camera centre is now beyond.
pub fn collide_sector(
    level: &Level,
    sector_id: SectorId,
    camera: &mut Camera,
    detect_crossing: bool,
) -> Option<SectorId> {
    let sector = level.sector(sector_id)?;
    let r = camera.radius;
    let mut push = Vec2::ZERO;
    let mut crossed = None;

    for edge in &sector.edges {
        let (a, b) = level.edge_points(edge);
        let along = b - a;
        let len = along.length();
        if len <= EPS {
            continue;
        }
        let dir = along / len;
        let local = camera.pos - a;
        let proj = local.dot(dir);
        if proj < -r / 2.0 || proj > len + r / 2.0 {
            continue;
        }

        if edge_is_solid(level, sector, edge, camera) {
            let reject = local - dir * proj;
            let dist = reject.length();
            if dist < r && dist > EPS {
                push += reject / dist * (r - dist);
            }
        } else if detect_crossing && level.side(edge, camera.pos) > 0.0 {
            crossed = edge.neighbor;
        }
    }

    camera.pos += push;
    crossed
}

/* ─────────────────────────  FRAME ENTRY POINT  ─────────────────────────── */

/// Home sector with crossing detection, then each neighbour without.
pub fn resolve(level: &Level, camera: &mut Camera) {
    if let Some(next) = collide_sector(level, camera.sector, camera, true) {
        log::debug!("camera crossed sector {} -> {next}", camera.sector);
        camera.sector = next;
    }

    let Some(home) = level.sector(camera.sector) else {
        return;
    };
    for nb in home.neighbors() {
        collide_sector(level, nb, camera, false);
    }
}
