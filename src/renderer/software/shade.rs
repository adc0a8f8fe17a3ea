use crate::world::texture::Rgb;

/// Distance fog: every channel is divided by `max(1, depth * factor)`.
/// A factor of zero (or less) leaves the colour untouched.
#[inline(always)]
pub fn fog(rgb: Rgb, depth: f32, factor: f32) -> Rgb {
    if factor <= 0.0 {
        return rgb;
    }
    // NaN depth falls back to 1 through f32::max
    let d = (depth * factor).max(1.0);
    let [_, r, g, b] = rgb.to_be_bytes();
    let r = (r as f32 / d) as u32;
    let g = (g as f32 / d) as u32;
    let b = (b as f32 / d) as u32;
    r << 16 | g << 8 | b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_pixels_keep_full_colour() {
        assert_eq!(fog(0xC0_80_40, 1.0, 0.75), 0xC0_80_40);
        assert_eq!(fog(0xC0_80_40, 0.1, 0.75), 0xC0_80_40);
    }

    #[test]
    fn far_pixels_darken() {
        // depth 4 × 0.5 → divide by 2
        assert_eq!(fog(0xC0_80_40, 4.0, 0.5), 0x60_40_20);
    }

    #[test]
    fn zero_factor_disables() {
        assert_eq!(fog(0xFF_FF_FF, 1000.0, 0.0), 0xFF_FF_FF);
    }
}
