//! Palette-indexed textures and the bank the renderer samples from.
//!
//! Walls, floors and ceilings refer to textures by [`TextureId`]; colours
//! are resolved through the bank's 256-entry [`Palette`] at plot time.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use thiserror::Error;

/// Index into a [`TextureBank`], stable once assigned.
pub type TextureId = u16;

/// Id of the checkerboard every bank starts with.
pub const NO_TEXTURE: TextureId = 0;

/// Packed colour, `0x00RRGGBB`.
pub type Rgb = u32;

const CHECKER_SIZE: usize = 8;
const CHECKER_LIGHT: u8 = 8;
const CHECKER_DARK: u8 = 16;

/// Palette indices in row-major order.
///
/// `w` and `h` are powers of two (checked by [`TextureBank::insert`]), so
/// [`texel`](Self::texel) wraps with a bitmask.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u8>,
}

impl Default for Texture {
    /// 8×8 one-texel checkerboard, used for missing ids.
    fn default() -> Self {
        let pixels = (0..CHECKER_SIZE * CHECKER_SIZE)
            .map(|i| {
                let (x, y) = (i % CHECKER_SIZE, i / CHECKER_SIZE);
                if (x ^ y) & 1 == 0 {
                    CHECKER_LIGHT
                } else {
                    CHECKER_DARK
                }
            })
            .collect();
        Self {
            name: "CHECKER".into(),
            w: CHECKER_SIZE,
            h: CHECKER_SIZE,
            pixels,
        }
    }
}

impl Texture {
    /// Palette index at `(u, v)`.  Any `i32`, negative included, wraps into
    /// range.
    #[inline(always)]
    pub fn texel(&self, u: i32, v: i32) -> u8 {
        let x = (u & (self.w as i32 - 1)) as usize;
        let y = (v & (self.h as i32 - 1)) as usize;
        self.pixels[y * self.w + x]
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    #[error("texture id {0} out of range")]
    BadId(TextureId),

    #[error("texture `{name}` is {w}x{h}, dimensions must be powers of two")]
    NotPowerOfTwo { name: String, w: usize, h: usize },

    #[error("texture `{name}` has {len} pixels, expected {expected}")]
    SizeMismatch {
        name: String,
        len: usize,
        expected: usize,
    },
}

/// 256 packed colours indexed by texel value.
#[derive(Clone, Debug)]
pub struct Palette(pub [Rgb; 256]);

impl Default for Palette {
    /// Grey ramp, so a bank without a loaded palette still renders.
    fn default() -> Self {
        Palette(std::array::from_fn(|i| {
            let g = i as Rgb;
            (g << 16) | (g << 8) | g
        }))
    }
}

impl Index<usize> for Palette {
    type Output = Rgb;
    fn index(&self, idx: usize) -> &Rgb {
        &self.0[idx]
    }
}

impl IndexMut<usize> for Palette {
    fn index_mut(&mut self, idx: usize) -> &mut Rgb {
        &mut self.0[idx]
    }
}

/// Textures plus the palette that colours them.
///
/// Id [`NO_TEXTURE`] is always the checkerboard, registered as `"MISSING"`.
/// Names are unique.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
    palette: Palette,
}

impl TextureBank {
    /// Bank holding only the checkerboard, with a grey palette.
    pub fn default_with_checker() -> Self {
        Self {
            by_name: HashMap::from([("MISSING".to_string(), NO_TEXTURE)]),
            data: vec![Texture::default()],
            palette: Palette::default(),
        }
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    #[inline(always)]
    pub fn get_color(&self, texel: u8) -> Rgb {
        self.palette[texel as usize]
    }

    /// Texture count, checkerboard included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` while only the checkerboard is present.
    pub fn is_empty(&self) -> bool {
        self.data.len() <= 1
    }

    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// [`texture`](Self::texture), falling back to the checkerboard.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data.get(id as usize).unwrap_or_else(|| {
            log::warn!("texture id {id} not in bank, using checkerboard");
            &self.data[NO_TEXTURE as usize]
        })
    }

    /// Register `tex` under `name` and return its id.  Ids are handed out
    /// in insertion order, starting right after the checkerboard.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        if !tex.w.is_power_of_two() || !tex.h.is_power_of_two() {
            return Err(TextureError::NotPowerOfTwo {
                name,
                w: tex.w,
                h: tex.h,
            });
        }
        let expected = tex.w * tex.h;
        if tex.pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                name,
                len: tex.pixels.len(),
                expected,
            });
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `w`×`h` texture whose texel at `(x, y)` is `x + y * w`.
    fn ramp(w: usize, h: usize) -> Texture {
        Texture {
            name: format!("RAMP{w}x{h}"),
            w,
            h,
            pixels: (0..w * h).map(|i| i as u8).collect(),
        }
    }

    #[test]
    fn texel_resolves_through_palette() {
        let mut bank = TextureBank::default_with_checker();
        let mut pal = Palette::default();
        pal[5] = 0x12_34_56;
        bank.set_palette(pal);

        let id = bank.insert("RAMP", ramp(4, 2)).unwrap();
        let tex = bank.texture(id).unwrap();
        // (1, 1) in a 4-wide ramp is index 5
        assert_eq!(tex.texel(1, 1), 5);
        assert_eq!(bank.get_color(tex.texel(1, 1)), 0x12_34_56);
        // untouched entries keep the grey ramp
        assert_eq!(bank.get_color(7), 0x07_07_07);
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut bank = TextureBank::default_with_checker();
        assert!(bank.is_empty());
        let a = bank.insert("A", ramp(2, 2)).unwrap();
        let b = bank.insert("B", ramp(4, 4)).unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(bank.id("B"), Some(b));
        assert_eq!(bank.id("MISSING"), Some(NO_TEXTURE));

        assert_eq!(
            bank.insert("A", ramp(8, 8)),
            Err(TextureError::Duplicate("A".into()))
        );
        assert_eq!(bank.len(), 3);
    }

    #[test]
    fn only_power_of_two_sizes_are_accepted() {
        let mut bank = TextureBank::default_with_checker();
        for (w, h) in [(3, 4), (4, 6), (0, 4)] {
            assert!(matches!(
                bank.insert(format!("T{w}x{h}"), ramp(w, h)),
                Err(TextureError::NotPowerOfTwo { .. })
            ));
        }
        let mut short = ramp(4, 4);
        short.pixels.pop();
        assert_eq!(
            bank.insert("SHORT", short),
            Err(TextureError::SizeMismatch {
                name: "SHORT".into(),
                len: 15,
                expected: 16
            })
        );
        assert!(bank.insert("OK", ramp(1, 16)).is_ok());
    }

    #[test]
    fn unknown_id_falls_back_to_checker() {
        let bank = TextureBank::default_with_checker();
        let bad = TextureId::MAX;
        assert_eq!(bank.texture(bad), Err(TextureError::BadId(bad)));
        let tex = bank.texture_or_missing(bad);
        assert_eq!(tex.name, "CHECKER");
        assert_ne!(tex.texel(0, 0), tex.texel(1, 0));
    }

    #[test]
    fn texel_wraps_by_mask() {
        let tex = ramp(4, 2);
        assert_eq!(tex.texel(-1, 0), tex.texel(3, 0));
        assert_eq!(tex.texel(4, 3), tex.texel(0, 1));
        assert_eq!(tex.texel(i32::MIN, -2), tex.texel(0, 0));
    }
}
