pub mod builder;
pub mod camera;
pub mod demo;
pub mod geometry;
pub mod math;
pub mod texture;

pub use builder::SectorSpec;
pub use camera::Camera;
pub use geometry::{Edge, Level, LevelError, Sector, SectorId, Vertex, VertexId};
pub use texture::{NO_TEXTURE, Palette, Rgb, Texture, TextureBank, TextureError, TextureId};
