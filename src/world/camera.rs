use glam::Vec2;

use crate::world::geometry::SectorId;
use crate::world::math::{TO_RAD, rotate_sc};

/// Player view-point in world space.
///
/// * Only **yaw** is simulated; the view never tilts up/down.
/// * `z` is the absolute eye height, `eye_height` the offset above the floor
///   of the current sector that the frame driver re-applies every frame.
/// * `sector` is a cache maintained by edge-crossing detection, not a
///   containment test.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec2,
    pub z: f32,
    pub eye_height: f32,
    pub radius: f32,
    pub sector: SectorId,
    yaw: f32,
    fov: f32,
    /* derived */
    n_sin: f32,
    n_cos: f32,
    tan_half_fov: f32,
}

impl Camera {
    /// Create a camera at `pos`, facing `yaw` (radians), with horizontal FoV
    /// `fov_deg` in degrees.
    pub fn new(pos: Vec2, yaw: f32, fov_deg: f32, sector: SectorId) -> Self {
        let mut cam = Self {
            pos,
            z: 1.75,
            eye_height: 1.75,
            radius: 0.5,
            sector,
            yaw,
            fov: fov_deg * TO_RAD,
            n_sin: 0.0,
            n_cos: 1.0,
            tan_half_fov: 1.0,
        };
        cam.refresh();
        cam
    }

    fn refresh(&mut self) {
        let (s, c) = (-self.yaw).sin_cos();
        self.n_sin = s;
        self.n_cos = c;
        self.tan_half_fov = (self.fov * 0.5).tan();
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw.rem_euclid(std::f32::consts::TAU);
        self.refresh();
    }

    /// Positive turns towards the right-hand side of the screen.
    pub fn turn(&mut self, delta_yaw: f32) {
        self.set_yaw(self.yaw + delta_yaw);
    }

    /// `tan(fov / 2)`; the renderer uses the same value vertically.
    #[inline(always)]
    pub fn tan_half_fov(&self) -> f32 {
        self.tan_half_fov
    }

    /// Transform a world point into camera space:
    ///  .x = depth along the view direction
    ///  .y = lateral offset (+ towards screen right)
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        rotate_sc(p - self.pos, self.n_sin, self.n_cos)
    }

    /// Inverse of [`to_cam`](Self::to_cam).
    #[inline]
    pub fn to_world(&self, c: Vec2) -> Vec2 {
        rotate_sc(c, -self.n_sin, self.n_cos) + self.pos
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.n_cos, -self.n_sin)
    }

    /// Unit vector towards the right-hand side of the screen.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        self.forward().perp()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` units and `side` (strafe), preserving eye-height.
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
