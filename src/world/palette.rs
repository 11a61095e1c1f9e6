// Tile-code → colour table shared by the caster and the map loader.
// The grid and renderer only ever see `TileId`s; the map file's single
// character codes are resolved here once, at load time.

use std::collections::HashMap;

use super::color::Color;

/// Runtime handle for a tile kind.
///
/// *Guaranteed* to remain stable for the lifetime of the palette.
pub type TileId = u8;

/// Walkable, never-occluding tile. Always slot 0.
pub const EMPTY_TILE: TileId = 0;

/// Map-file code reserved for [`EMPTY_TILE`].
pub const EMPTY_CODE: char = ' ';

/// Things that can go wrong when filling the palette.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaletteError {
    /// The same tile code was given a colour twice.
    #[error("tile code `{0}` already present in palette")]
    Duplicate(char),

    /// The blank code is the empty tile and cannot be coloured.
    #[error("tile code `{0}` is reserved")]
    Reserved(char),

    /// All 255 non-empty slots are taken.
    #[error("palette is full (255 tile kinds)")]
    Full,
}

/// Colour of every tile kind plus the two background colours.
///
/// * Slot 0 is the empty tile and is fully transparent.
/// * Ceiling and floor are what translucent walls are blended against.
#[derive(Clone, Debug)]
pub struct Palette {
    by_code: HashMap<char, TileId>,
    colors: Vec<Color>,
    pub ceiling: Color,
    pub floor: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Color::rgb(50, 50, 50), Color::BLACK)
    }
}

impl Palette {
    pub fn new(ceiling: Color, floor: Color) -> Self {
        let mut by_code = HashMap::new();
        by_code.insert(EMPTY_CODE, EMPTY_TILE);
        Self {
            by_code,
            colors: vec![Color::TRANSPARENT],
            ceiling,
            floor,
        }
    }

    /// Number of tile kinds (including the empty one).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True while only the empty tile is registered.
    pub fn is_empty(&self) -> bool {
        self.colors.len() == 1
    }

    /// Id registered for map code `code`, if any.
    pub fn id(&self, code: char) -> Option<TileId> {
        self.by_code.get(&code).copied()
    }

    /// Colour of tile `id`; unknown ids read as empty.
    #[inline]
    pub fn color(&self, id: TileId) -> Color {
        self.colors
            .get(id as usize)
            .copied()
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Register `code` with `color` and return its new id.
    pub fn insert(&mut self, code: char, color: Color) -> Result<TileId, PaletteError> {
        if code == EMPTY_CODE {
            return Err(PaletteError::Reserved(code));
        }
        if self.by_code.contains_key(&code) {
            return Err(PaletteError::Duplicate(code));
        }
        if self.colors.len() > TileId::MAX as usize {
            return Err(PaletteError::Full);
        }
        let id = self.colors.len() as TileId;
        self.colors.push(color);
        self.by_code.insert(code, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut pal = Palette::default();
        let red = pal.insert('#', Color::rgb(255, 0, 0)).unwrap();
        let glass = pal.insert('~', Color::rgba(0, 0, 255, 96)).unwrap();

        assert_ne!(red, EMPTY_TILE);
        assert_ne!(glass, red);
        assert_eq!(pal.id('#'), Some(red));
        assert_eq!(pal.id(' '), Some(EMPTY_TILE));
        assert_eq!(pal.id('?'), None);
        assert_eq!(pal.color(glass).a, 96);
        assert_eq!(pal.len(), 3);
    }

    #[test]
    fn empty_tile_is_transparent() {
        let pal = Palette::default();
        assert!(pal.color(EMPTY_TILE).is_transparent());
        assert!(pal.color(200).is_transparent());
        assert!(pal.is_empty());
    }

    #[test]
    fn duplicate_and_reserved_codes_rejected() {
        let mut pal = Palette::default();
        pal.insert('W', Color::WHITE).unwrap();
        assert_eq!(pal.insert('W', Color::BLACK), Err(PaletteError::Duplicate('W')));
        assert_eq!(pal.insert(' ', Color::BLACK), Err(PaletteError::Reserved(' ')));
        assert_eq!(pal.len(), 2);
    }

    #[test]
    fn palette_fills_up() {
        let mut pal = Palette::default();
        let codes = (0x100u32..).filter_map(char::from_u32);
        for code in codes.take(TileId::MAX as usize) {
            pal.insert(code, Color::WHITE).unwrap();
        }
        assert_eq!(pal.insert('x', Color::WHITE), Err(PaletteError::Full));
    }
}
