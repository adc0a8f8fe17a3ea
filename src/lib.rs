//! Software 2.5D portal renderer.
//!
//! * [`world`]    level model, camera, textures and the built-in demo map
//! * [`assets`]   texture-pack decoding
//! * [`renderer`] recursive sector/portal rasteriser
//! * [`sim`]      per-frame movement, collision and animated sectors

pub mod assets;
pub mod renderer;
pub mod sim;
pub mod world;
