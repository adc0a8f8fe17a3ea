use crate::sim::InputCmd;
use crate::world::camera::Camera;

/// World units per second.
pub const MOVE_SPEED: f32 = 6.0;
/// Radians per second.
pub const TURN_RATE: f32 = 4.0;
/// Longest frame the simulation accepts; slower frames run in slow motion.
pub const MAX_DT: f32 = 0.2;

#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    dt.clamp(0.0, MAX_DT)
}

/// Turn, then move along the new heading.  No collision here.
pub fn apply_input(camera: &mut Camera, cmd: InputCmd, dt: f32) {
    if cmd.turn != 0.0 {
        camera.turn(cmd.turn * TURN_RATE * dt);
    }
    if cmd.forward != 0.0 || cmd.strafe != 0.0 {
        let step = MOVE_SPEED * dt;
        camera.step(cmd.forward * step, cmd.strafe * step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn forward_moves_along_heading() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0, 90.0, 0);
        let cmd = InputCmd {
            forward: 1.0,
            ..InputCmd::default()
        };
        apply_input(&mut cam, cmd, 0.5);
        assert!((cam.pos - Vec2::new(3.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn long_frames_are_clamped() {
        assert_eq!(clamp_dt(1.0), MAX_DT);
        assert_eq!(clamp_dt(-0.1), 0.0);
        assert_eq!(clamp_dt(0.016), 0.016);
    }

    #[test]
    fn turning_changes_yaw_only() {
        let mut cam = Camera::new(Vec2::new(1.0, 2.0), 0.0, 90.0, 0);
        let cmd = InputCmd {
            turn: 1.0,
            ..InputCmd::default()
        };
        apply_input(&mut cam, cmd, 0.1);
        assert!((cam.yaw() - 0.4).abs() < 1e-5);
        assert_eq!(cam.pos, Vec2::new(1.0, 2.0));
    }
}
