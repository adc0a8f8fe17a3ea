//! Palette-indexed texture pack loader.
//!
//! ### Layout (little-endian)
//! ```text
//! magic     "PTEX"
//! count     u16
//! palette   256 × (r, g, b) bytes
//! count × {
//!     name    [u8; 8], NUL-padded ASCII
//!     width   u16
//!     height  u16
//!     pixels  width × height palette indices, row-major
//! }
//! ```

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use byteorder::{LittleEndian as LE, ReadBytesExt};
use thiserror::Error;

use crate::world::texture::{Palette, Texture, TextureBank, TextureError};

const MAGIC: &[u8; 4] = b"PTEX";
const NAME_LEN: usize = 8;

/// Errors that can be encountered while opening/parsing a pack.
#[derive(Error, Debug)]
pub enum PackError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("not a texture pack (magic {0:?})")]
    BadMagic([u8; 4]),

    /// File ended before the header or a texture was complete.
    #[error("pack truncated while reading {0}")]
    Truncated(&'static str),

    /// Entry decoded fine but the bank refused it.
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Decoded pack: one palette plus the textures in file order.
#[derive(Debug)]
pub struct TexturePack {
    pub palette: Palette,
    pub textures: Vec<Texture>,
}

impl TexturePack {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PackError> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PackError> {
        Self::read(bytes)
    }

    /// Decode from any byte stream.
    pub fn read<R: Read>(mut r: R) -> Result<Self, PackError> {
        /*----------- 1. header -------------------------------------------*/
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic).map_err(eof_as("header"))?;
        if &magic != MAGIC {
            return Err(PackError::BadMagic(magic));
        }
        let count = r.read_u16::<LE>().map_err(eof_as("header"))?;

        /*----------- 2. palette ------------------------------------------*/
        let mut palette = Palette::default();
        for i in 0..256 {
            let mut rgb = [0u8; 3];
            r.read_exact(&mut rgb).map_err(eof_as("palette"))?;
            palette[i] = (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32;
        }

        /*----------- 3. textures -----------------------------------------*/
        let mut textures = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut raw_name = [0u8; NAME_LEN];
            r.read_exact(&mut raw_name).map_err(eof_as("texture header"))?;
            let w = r.read_u16::<LE>().map_err(eof_as("texture header"))? as usize;
            let h = r.read_u16::<LE>().map_err(eof_as("texture header"))? as usize;

            let mut pixels = vec![0u8; w * h];
            r.read_exact(&mut pixels).map_err(eof_as("texture pixels"))?;

            textures.push(Texture {
                name: entry_name(&raw_name).to_owned(),
                w,
                h,
                pixels,
            });
        }

        log::info!("texture pack: {} textures", textures.len());
        Ok(Self { palette, textures })
    }

    /// Move everything into a fresh bank.  Ids are assigned in file order
    /// starting at 1; id 0 stays the checkerboard.
    pub fn into_bank(self) -> Result<TextureBank, PackError> {
        let mut bank = TextureBank::default_with_checker();
        bank.set_palette(self.palette);
        for tex in self.textures {
            let name = tex.name.clone();
            bank.insert(name, tex)?;
        }
        Ok(bank)
    }
}

/// Eight-byte, NUL-padded name → printable string.
fn entry_name(raw: &[u8; NAME_LEN]) -> &str {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    std::str::from_utf8(&raw[..end]).unwrap_or("?")
}

fn eof_as(what: &'static str) -> impl Fn(io::Error) -> PackError {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            PackError::Truncated(what)
        } else {
            PackError::Io(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    /// Hand-craft a pack with a red ramp palette and the given textures.
    fn build_pack(textures: &[(&str, u16, u16)]) -> Vec<u8> {
        let mut out = Vec::<u8>::new();
        out.extend_from_slice(MAGIC);
        out.write_u16::<LE>(textures.len() as u16).unwrap();
        for i in 0..256u32 {
            out.extend_from_slice(&[i as u8, 0, 0]);
        }
        for &(name, w, h) in textures {
            let mut raw = [0u8; NAME_LEN];
            raw[..name.len()].copy_from_slice(name.as_bytes());
            out.extend_from_slice(&raw);
            out.write_u16::<LE>(w).unwrap();
            out.write_u16::<LE>(h).unwrap();
            out.extend((0..w as usize * h as usize).map(|i| i as u8));
        }
        out
    }

    #[test]
    fn decodes_palette_and_texture() {
        let bytes = build_pack(&[("STONE", 4, 2)]);
        let pack = TexturePack::from_bytes(&bytes).unwrap();

        assert_eq!(pack.palette[200], 200 << 16);
        assert_eq!(pack.textures.len(), 1);
        let t = &pack.textures[0];
        assert_eq!((t.name.as_str(), t.w, t.h), ("STONE", 4, 2));
        assert_eq!(t.texel(1, 1), 5);
    }

    #[test]
    fn bank_ids_follow_file_order() {
        let bytes = build_pack(&[("A", 2, 2), ("B", 8, 4)]);
        let bank = TexturePack::from_bytes(&bytes).unwrap().into_bank().unwrap();
        assert_eq!(bank.id("A"), Some(1));
        assert_eq!(bank.id("B"), Some(2));
        assert_eq!(bank.get_color(3), 3 << 16);
    }

    #[test]
    fn rejects_garbage() {
        let err = TexturePack::from_bytes(b"NOTAPACK").unwrap_err();
        assert!(matches!(err, PackError::BadMagic(m) if &m == b"NOTA"));
    }

    #[test]
    fn short_pixel_block_is_truncation() {
        let mut bytes = build_pack(&[("A", 4, 4)]);
        bytes.truncate(bytes.len() - 3);
        let err = TexturePack::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, PackError::Truncated("texture pixels")));
    }

    #[test]
    fn odd_sizes_refused_by_bank() {
        let bytes = build_pack(&[("ODD", 3, 4)]);
        let pack = TexturePack::from_bytes(&bytes).unwrap();
        assert!(matches!(
            pack.into_bank(),
            Err(PackError::Texture(TextureError::NotPowerOfTwo { w: 3, .. }))
        ));
    }
}
