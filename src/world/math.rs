//! 2-D helpers the rest of the engine shares.
//!
//! `glam::Vec2` already supplies add / sub / scale / div / dot / length /
//! normalize; this module adds the few scalar routines the renderer and the
//! collision code need on top of it.
//!
//! `Vec2::normalize` on a zero-length vector yields NaN components.  Callers
//! that can hit that case (zero-length edges) reject it before normalising.

use glam::Vec2;

/// Degrees → radians factor.
pub const TO_RAD: f32 = std::f32::consts::PI * 2.0 / 360.0;

/// Linear interpolation, `t = 0` → `a`, `t = 1` → `b`.
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp that never panics on `lo > hi` (returns `lo` in that case).
#[inline(always)]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// 2-D scalar cross product (`a.x * b.y - a.y * b.x`).
#[inline(always)]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Rotate `v` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Rotate with a pre-computed `(sin, cos)` pair.
#[inline(always)]
pub fn rotate_sc(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Intersection of the infinite lines through `start → end` and
/// `o_start → o_end`.
///
/// The lines must not be parallel: the division by their cross product is
/// unguarded and produces inf/NaN for parallel input.  The renderer only calls
/// this when the two endpoints of an edge straddle the near plane, which rules
/// that case out.
#[inline]
pub fn line_intersection(start: Vec2, end: Vec2, o_start: Vec2, o_end: Vec2) -> Vec2 {
    let r = end - start;
    let s = o_end - o_start;
    let t = cross(o_start - start, s) / cross(r, s);
    start + r * t
}

/// Shoelace signed area: positive for counter-clockwise loops.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += cross(a, b);
    }
    sum * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotate_quarter_turn() {
        let r = rotate(vec2(1.0, 0.0), FRAC_PI_2);
        assert!((r - vec2(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn intersection_with_near_plane() {
        // segment from behind (-1, -1) to in front (3, 3) hits x = 0 at y = 0
        let p = line_intersection(
            vec2(-1.0, -1.0),
            vec2(3.0, 3.0),
            vec2(0.0, -1.0),
            vec2(0.0, 1.0),
        );
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn signed_area_sign_follows_winding() {
        let ccw = [vec2(0.0, 0.0), vec2(2.0, 0.0), vec2(2.0, 2.0), vec2(0.0, 2.0)];
        let mut cw = ccw;
        cw.reverse();
        assert!((signed_area(&ccw) - 4.0).abs() < 1e-6);
        assert!((signed_area(&cw) + 4.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_is_nan() {
        // documented edge case, not guarded
        assert!(Vec2::ZERO.normalize().x.is_nan());
    }

    #[test]
    fn lerp_and_clamp() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
    }
}
