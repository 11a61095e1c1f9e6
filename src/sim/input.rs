use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Logical buttons, independent of the physical key layout.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Buttons: u16 {
        // Movement
        const FORWARD      = 0x0001;
        const BACK         = 0x0002;
        const STRAFE_LEFT  = 0x0004;
        const STRAFE_RIGHT = 0x0008;

        // View
        const TURN_LEFT    = 0x0010;
        const TURN_RIGHT   = 0x0020;
        const LOOK_UP      = 0x0040;
        const LOOK_DOWN    = 0x0080;
        const RISE         = 0x0100;
        const CROUCH       = 0x0200;
        const ZOOM_IN      = 0x0400;
        const ZOOM_OUT     = 0x0800;

        // Toggles (edge-triggered)
        const MINIMAP      = 0x1000;
    }
}

/// Input snapshot for one frame.
///
/// Lives for the whole session: [`InputState::reset`] at start-up, then one
/// [`InputState::update`] per poll. `pressed` and `pointer_delta` only
/// describe the latest poll.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    /// Buttons currently held down.
    pub held: Buttons,
    /// Buttons that went down during the latest poll.
    pub pressed: Buttons,
    /// Pointer motion since the previous poll, in pixels.
    pub pointer_delta: Vec2,
    /// Window closed or Escape hit.
    pub quit: bool,
    last_pointer: Option<Vec2>,
}

impl InputState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one poll: current buttons, pointer position (if inside the
    /// window) and whether a quit event arrived.
    pub fn update(&mut self, held: Buttons, pointer: Option<Vec2>, quit: bool) {
        self.pressed = held & !self.held;
        self.held = held;
        self.pointer_delta = match (self.last_pointer, pointer) {
            (Some(prev), Some(now)) => now - prev,
            _ => Vec2::ZERO,
        };
        self.last_pointer = pointer;
        self.quit |= quit;
    }

    #[inline]
    pub fn is_down(&self, b: Buttons) -> bool {
        self.held.contains(b)
    }

    /// `+1` when only `pos` is held, `-1` when only `neg`, else 0.
    #[inline]
    pub fn axis(&self, pos: Buttons, neg: Buttons) -> f32 {
        self.is_down(pos) as i32 as f32 - self.is_down(neg) as i32 as f32
    }
}
