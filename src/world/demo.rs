//! Built-in level and procedural textures, so the viewer runs without any
//! asset files.
//!
//! Four sectors ring a square pillar; sector 2 is the moving platform.

use glam::{Vec2, vec2};

use super::geometry::{Edge, Level, Sector, SectorId};
use crate::sim::Platform;
use super::texture::{Palette, Texture, TextureBank, TextureError, TextureId};

pub const CAMERA_START: Vec2 = vec2(7.75, 1.0);
pub const CAMERA_YAW: f32 = 0.5;
pub const CAMERA_SECTOR: SectorId = 0;

/// Sector animated by the frame driver.
pub const PLATFORM_SECTOR: SectorId = 2;

pub const TEX_BRICK: TextureId = 1;
pub const TEX_TILE: TextureId = 2;

pub fn level() -> Level {
    let verts = vec![
        vec2(1.0, 1.0),
        vec2(20.0, -5.0),
        vec2(20.0, 15.0),
        vec2(1.0, 10.0),
        vec2(4.0, 4.0),
        vec2(6.0, 4.0),
        vec2(6.0, 6.0),
        vec2(4.0, 6.0),
    ];

    let s2 = vec2(2.0, 2.0);
    let sectors = vec![
        Sector::new(
            vec![
                Edge::with_scale(0, 1, None, TEX_BRICK, s2),
                Edge::with_scale(1, 5, Some(1), TEX_BRICK, s2),
                Edge::with_scale(5, 4, None, TEX_BRICK, s2),
                Edge::with_scale(4, 0, Some(3), TEX_BRICK, s2),
            ],
            0.5,
            6.0,
        )
        .with_textures(TEX_TILE, TEX_TILE),
        Sector::new(
            vec![
                Edge::new(6, 5, None, TEX_BRICK),
                Edge::new(5, 1, Some(0), TEX_BRICK),
                Edge::new(1, 2, None, TEX_BRICK),
                Edge::new(2, 6, Some(2), TEX_BRICK),
            ],
            0.5,
            6.0,
        )
        .with_textures(TEX_TILE, TEX_TILE),
        Sector::new(
            vec![
                Edge::new(7, 6, None, TEX_BRICK),
                Edge::new(6, 2, Some(1), TEX_BRICK),
                Edge::new(2, 3, None, TEX_BRICK),
                Edge::new(3, 7, Some(3), TEX_BRICK),
            ],
            0.1,
            10.0,
        )
        .with_textures(TEX_BRICK, TEX_BRICK),
        Sector::new(
            vec![
                Edge::new(4, 7, None, TEX_BRICK),
                Edge::new(7, 3, Some(2), TEX_BRICK),
                Edge::new(3, 0, None, TEX_BRICK),
                Edge::new(0, 4, Some(0), TEX_BRICK),
            ],
            -0.4,
            5.0,
        )
        .with_textures(TEX_TILE, TEX_BRICK),
    ];

    Level::new(verts, sectors)
}

/// The lift in [`PLATFORM_SECTOR`].
pub fn platform() -> Platform {
    Platform {
        sector: PLATFORM_SECTOR,
        base: 0.7,
        amplitude: 2.5,
        speed: 1.0,
        gap: 2.4,
    }
}

/*──────────────────────── procedural textures ─────────────────────*/

/// Four 64-entry ramps: brown, grey, blue, green.
pub fn palette() -> Palette {
    let mut p = Palette::default();
    let ramps: [(u32, u32, u32); 4] = [(200, 110, 60), (220, 220, 220), (90, 120, 220), (90, 200, 100)];
    for (r_idx, &(r, g, b)) in ramps.iter().enumerate() {
        for i in 0..64u32 {
            let k = i + 8;
            let c = ((r * k / 71) << 16) | ((g * k / 71) << 8) | (b * k / 71);
            p[r_idx * 64 + i as usize] = c;
        }
    }
    p
}

/// xorshift32, enough to break up flat colour areas.
fn noise(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

fn brick(size: usize) -> Texture {
    let mut seed = 0x9E37_79B9;
    let mut pixels = vec![0u8; size * size];
    let row_h = size / 4;
    for y in 0..size {
        let row = y / row_h;
        let offset = if row % 2 == 0 { 0 } else { size / 4 };
        for x in 0..size {
            let mortar = y % row_h == 0 || (x + offset) % (size / 2) == 0;
            let jitter = (noise(&mut seed) % 12) as u8;
            pixels[y * size + x] = if mortar { 64 + 40 + jitter } else { 30 + jitter };
        }
    }
    Texture {
        name: "BRICK".into(),
        w: size,
        h: size,
        pixels,
    }
}

fn tile(size: usize) -> Texture {
    let mut seed = 0x1234_5678;
    let mut pixels = vec![0u8; size * size];
    let cell = size / 2;
    for y in 0..size {
        for x in 0..size {
            let dark = ((x / cell) ^ (y / cell)) & 1 == 1;
            let edge = x % cell == 0 || y % cell == 0;
            let jitter = (noise(&mut seed) % 6) as u8;
            pixels[y * size + x] = match (edge, dark) {
                (true, _) => 64 + 10,
                (false, true) => 128 + 30 + jitter,
                (false, false) => 128 + 50 + jitter,
            };
        }
    }
    Texture {
        name: "TILE".into(),
        w: size,
        h: size,
        pixels,
    }
}

/// Bank with the demo palette, [`TEX_BRICK`] and [`TEX_TILE`].
pub fn texture_bank() -> Result<TextureBank, TextureError> {
    let mut bank = TextureBank::default_with_checker();
    bank.set_palette(palette());
    let b = bank.insert("BRICK", brick(32))?;
    let t = bank.insert("TILE", tile(16))?;
    debug_assert_eq!((b, t), (TEX_BRICK, TEX_TILE));
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_ids_match_constants() {
        let bank = texture_bank().unwrap();
        assert_eq!(bank.id("BRICK"), Some(TEX_BRICK));
        assert_eq!(bank.id("TILE"), Some(TEX_TILE));
    }

    #[test]
    fn platform_drives_its_sector() {
        let p = platform();
        assert_eq!(p.sector, PLATFORM_SECTOR);
        assert!(usize::from(p.sector) < level().sectors.len());
    }

    #[test]
    fn camera_start_inside_its_sector() {
        let lvl = level();
        assert!(lvl.sector_contains(CAMERA_SECTOR, CAMERA_START));
    }
}
