//! Axis-separated grid collision.
//!
//! The move is tried as a whole; if it would end inside a solid cell, the
//! blocked axis is reverted so the camera slides along the wall instead of
//! stopping dead.
//!
//! Precondition: the start position is inside an open cell and one frame's
//! displacement is shorter than one cell (the engine clamps frame time).

use glam::{IVec2, Vec2};

use crate::world::{Grid, Vec2Ext};

/// What the caller gets back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,      // final XY
    pub hit_wall: bool, // some part of the move was refused
}

/// Move from `pos` along `dir` (unit length or zero) at `rate` for `dt`.
pub fn slide_move(grid: &Grid, pos: Vec2, dir: Vec2, rate: f32, dt: f32) -> MoveResult {
    if dir == Vec2::ZERO {
        return MoveResult {
            pos,
            hit_wall: false,
        };
    }

    let target = pos + dir * rate * dt;
    let old = pos.cell();
    let new = target.cell();
    let solid = |x: i32, y: i32| grid.is_solid(IVec2::new(x, y));

    let keep_x = Vec2::new(target.x, pos.y);
    let keep_y = Vec2::new(pos.x, target.y);

    let resolved = match (old.x != new.x, old.y != new.y) {
        /* ----- same cell: always fine ----------------------------------- */
        (false, false) => target,

        /* ----- one boundary crossed: revert that axis if blocked -------- */
        (true, false) if solid(new.x, new.y) => keep_y,
        (false, true) if solid(new.x, new.y) => keep_x,
        (true, false) | (false, true) => target,

        /* ----- diagonal crossing ---------------------------------------- */
        (true, true) => {
            let y_corner_open = !solid(old.x, new.y); // reached by moving in Y only
            let x_corner_open = !solid(new.x, old.y); // reached by moving in X only
            if !y_corner_open && !x_corner_open {
                // two walls meeting at a corner: never squeeze between them
                pos
            } else if !solid(new.x, new.y) {
                target
            } else if y_corner_open {
                keep_y
            } else {
                keep_x
            }
        }
    };

    MoveResult {
        pos: resolved,
        hit_wall: resolved != target,
    }
}
