mod camera;
mod color;
mod grid;
mod palette;
mod vector;

pub use camera::{Camera, MAX_FOV, MAX_PITCH, MIN_FOV};
pub use color::{Color, blend};
pub use grid::Grid;
pub use palette::{EMPTY_CODE, EMPTY_TILE, Palette, PaletteError, TileId};
pub use vector::{Vec2Ext, unit, wrap_angle};

use glam::IVec2;

/// Everything a frame reads but never writes: the grid and its colours.
///
/// Owned by the running session and lent out by shared reference to the
/// resolver and to every caster worker.
#[derive(Clone, Debug)]
pub struct World {
    pub grid: Grid,
    pub palette: Palette,
}

impl World {
    pub fn new(grid: Grid, palette: Palette) -> Self {
        Self { grid, palette }
    }

    #[inline]
    pub fn is_solid(&self, cell: IVec2) -> bool {
        self.grid.is_solid(cell)
    }

    /// Colour of the tile at `cell`; outside the grid reads as empty.
    #[inline]
    pub fn tile_color(&self, cell: IVec2) -> Color {
        self.grid
            .tile(cell)
            .map_or(Color::TRANSPARENT, |t| self.palette.color(t))
    }
}
