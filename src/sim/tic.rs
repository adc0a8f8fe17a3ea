use super::{InputCmd, Platform, collision, movement};
use crate::world::{camera::Camera, geometry::Level};

/// Owns the camera and the animated sectors and runs the per-frame
/// sequence: animate → move → collide → eye height.
///
/// Rendering and presentation stay with the caller, which keeps the level
/// read-only while it draws.
pub struct FrameDriver {
    pub camera: Camera,
    pub platforms: Vec<Platform>,
    time: f32,
}

impl FrameDriver {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            platforms: Vec::new(),
            time: 0.0,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    /// Simulated seconds since start.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance one frame of `dt` seconds (clamped to
    /// [`MAX_DT`](movement::MAX_DT)).
    pub fn step(&mut self, dt: f32, cmd: InputCmd, level: &mut Level) {
        let dt = movement::clamp_dt(dt);
        self.time += dt;

        for p in &self.platforms {
            p.apply(level, self.time);
        }

        movement::apply_input(&mut self.camera, cmd, dt);
        collision::resolve(level, &mut self.camera);

        if let Some(s) = level.sector(self.camera.sector) {
            self.camera.z = s.floor_h + self.camera.eye_height;
        }
    }
}
