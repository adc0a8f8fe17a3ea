use bitflags::bitflags;

bitflags! {
    /// Movement keys held during a frame.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const FORWARD      = 0x01;
        const BACK         = 0x02;
        const STRAFE_LEFT  = 0x04;
        const STRAFE_RIGHT = 0x08;
        const TURN_LEFT    = 0x10;
        const TURN_RIGHT   = 0x20;
    }
}

/// Per-frame movement request, each axis in –1 … +1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // + ahead
    pub strafe: f32,  // + towards screen right
    pub turn: f32,    // + towards screen right
}

fn axis(b: Buttons, plus: Buttons, minus: Buttons) -> f32 {
    b.contains(plus) as i32 as f32 - b.contains(minus) as i32 as f32
}

impl From<Buttons> for InputCmd {
    fn from(b: Buttons) -> Self {
        Self {
            forward: axis(b, Buttons::FORWARD, Buttons::BACK),
            strafe: axis(b, Buttons::STRAFE_RIGHT, Buttons::STRAFE_LEFT),
            turn: axis(b, Buttons::TURN_RIGHT, Buttons::TURN_LEFT),
        }
    }
}
