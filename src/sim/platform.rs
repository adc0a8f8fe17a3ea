use crate::world::geometry::{Level, SectorId};

/// A sector whose floor bobs on a sine wave, ceiling riding along at a
/// fixed distance above it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub sector: SectorId,
    /// Floor height at phase 0.
    pub base: f32,
    pub amplitude: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
    /// Ceiling minus floor, kept constant.
    pub gap: f32,
}

impl Platform {
    /// Floor height at time `t` seconds.
    #[inline]
    pub fn floor_at(&self, t: f32) -> f32 {
        self.base + (t * self.speed).sin() * self.amplitude
    }

    /// Write this frame's heights into the level.  Unknown sectors are
    /// ignored.
    pub fn apply(&self, level: &mut Level, t: f32) {
        if let Some(s) = level.sectors.get_mut(self.sector as usize) {
            s.floor_h = self.floor_at(t);
            s.ceil_h = s.floor_h + self.gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::demo;

    fn lift() -> Platform {
        Platform {
            sector: 1,
            base: 1.0,
            amplitude: 0.5,
            speed: 2.0,
            gap: 3.0,
        }
    }

    #[test]
    fn gap_is_preserved() {
        let mut level = demo::level();
        let p = lift();
        for i in 0..50 {
            let t = i as f32 * 0.37;
            p.apply(&mut level, t);
            let s = &level.sectors[p.sector as usize];
            assert!((s.ceil_h - s.floor_h - p.gap).abs() < 1e-5);
            assert!((s.floor_h - p.floor_at(t)).abs() < 1e-6);
        }
    }

    #[test]
    fn stays_within_amplitude() {
        let p = lift();
        for i in 0..100 {
            let f = p.floor_at(i as f32 * 0.1);
            assert!(f >= p.base - p.amplitude - 1e-5 && f <= p.base + p.amplitude + 1e-5);
        }
    }

    #[test]
    fn missing_sector_is_ignored() {
        let mut level = demo::level();
        let before = level.clone();
        let p = Platform {
            sector: 99,
            ..lift()
        };
        p.apply(&mut level, 1.0);
        assert_eq!(level.sectors, before.sectors);
    }
}
