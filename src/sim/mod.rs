pub mod collision;
mod input;
pub mod movement;
mod platform;
mod tic;

pub use input::{Buttons, InputCmd};
pub use platform::Platform;
pub use tic::FrameDriver;
