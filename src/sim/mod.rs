mod collision;
mod controls;
mod input;

pub use collision::{MoveResult, slide_move};
pub use controls::{Steering, player_input};
pub use input::{Buttons, InputState};
