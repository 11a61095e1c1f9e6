use glam::IVec2;

use super::palette::{EMPTY_TILE, TileId};

/// Dense tile grid (immutable after load), row-major: `tiles[y * width + x]`.
///
/// Loaders guarantee every border cell is solid, so a ray or a move that
/// starts inside the grid can never walk off it. Out-of-range reads still
/// answer "solid" rather than panic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileId>,
}

impl Grid {
    /// Build a grid from row-major tiles. `None` when the sizes disagree.
    pub fn new(width: usize, height: usize, tiles: Vec<TileId>) -> Option<Self> {
        (width > 0 && height > 0 && tiles.len() == width * height).then_some(Self {
            width,
            height,
            tiles,
        })
    }

    /// `width × height` grid with `wall` on the border and nothing inside.
    pub fn bordered(width: usize, height: usize, wall: TileId) -> Self {
        let mut tiles = vec![EMPTY_TILE; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    tiles[y * width + x] = wall;
                }
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Tile at `cell`, `None` outside the grid.
    #[inline]
    pub fn tile(&self, cell: IVec2) -> Option<TileId> {
        self.contains(cell)
            .then(|| self.tiles[cell.y as usize * self.width + cell.x as usize])
    }

    /// True for any non-empty tile and for every cell outside the grid.
    #[inline]
    pub fn is_solid(&self, cell: IVec2) -> bool {
        self.tile(cell).is_none_or(|t| t != EMPTY_TILE)
    }

    /// First border cell that is walkable, scanning row by row.
    pub fn open_border_cell(&self) -> Option<IVec2> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h)
            .flat_map(|y| (0..w).map(move |x| IVec2::new(x, y)))
            .filter(|c| c.x == 0 || c.y == 0 || c.x == w - 1 || c.y == h - 1)
            .find(|&c| !self.is_solid(c))
    }

    /// Row `y` as a tile slice.
    pub fn row(&self, y: usize) -> &[TileId] {
        &self.tiles[y * self.width..(y + 1) * self.width]
    }
}
