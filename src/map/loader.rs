// ──────────────────────────────────────────────────────────────────────────
// map/loader.rs
//
//  *   grid rows (one char per tile)  ──╮
//  *   spawn line                        │   --->  world::World
//  *   ceiling / floor lines             │          + spawn pose
//  *   palette lines                   ──╯
// ──────────────────────────────────────────────────────────────────────────

use std::{
    fs,
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

use glam::Vec2;
use thiserror::Error;

use crate::world::{
    Camera, Color, Grid, Palette, PaletteError, Vec2Ext, World, wrap_angle,
};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum MapError {
    #[error("cannot read map {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("map has no grid rows")]
    EmptyGrid,

    #[error("line {line}: row is {found} tiles wide, expected {expected}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("missing {0} line")]
    Missing(&'static str),

    #[error("line {line}: {reason}")]
    BadLine { line: usize, reason: String },

    #[error("line {line}: {source}")]
    Palette {
        line: usize,
        #[source]
        source: PaletteError,
    },

    #[error("reserved character {code:?} in tile data at ({x}, {y})")]
    ReservedChar { code: char, x: usize, y: usize },

    #[error("unknown tile code `{code}` at ({x}, {y})")]
    UnknownTile { code: char, x: usize, y: usize },

    #[error("border cell ({x}, {y}) is not solid")]
    OpenBorder { x: i32, y: i32 },

    #[error("spawn point ({x}, {y}) is not inside an open cell")]
    SpawnInWall { x: f32, y: f32 },
}

/// A parsed map: the world plus where the player starts.
#[derive(Clone, Debug)]
pub struct LoadedMap {
    pub world: World,
    pub spawn: Vec2,
    /// Initial facing, radians in `[0, 2π)`.
    pub direction: f32,
}

impl LoadedMap {
    /// Camera standing on the spawn point.
    pub fn camera(&self, fov: f32) -> Camera {
        Camera::new(self.spawn, self.direction, fov)
    }
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Read and parse the map file at `path`.
pub fn load_map(path: impl AsRef<Path>) -> Result<LoadedMap, MapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_map(&text)?;
    log::info!(
        "map {} loaded: {}×{} tiles, {} tile kinds",
        path.display(),
        map.world.grid.width(),
        map.world.grid.height(),
        map.world.palette.len() - 1
    );
    Ok(map)
}

/// Parse map text.
///
/// Layout, top to bottom:
/// 1. grid rows, one character per tile (blank = empty, control characters
///    reserved), ended by an empty line;
/// 2. `x y direction_degrees`;
/// 3. `ceiling r g b` and `floor r g b`;
/// 4. any number of `code r g b [a]` palette lines.
///
/// Blank lines after the grid are ignored.
pub fn parse_map(text: &str) -> Result<LoadedMap, MapError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    /*----- 1. Grid rows --------------------------------------------------*/
    let mut rows: Vec<(usize, &str)> = Vec::new();
    for (n, line) in lines.by_ref() {
        if line.is_empty() {
            break;
        }
        rows.push((n, line));
    }
    let width = match rows.first() {
        Some((_, row)) => row.chars().count(),
        None => return Err(MapError::EmptyGrid),
    };
    for &(line, row) in &rows {
        let found = row.chars().count();
        if found != width {
            return Err(MapError::RowWidth {
                line,
                expected: width,
                found,
            });
        }
    }

    /*----- 2. Spawn + background colours ---------------------------------*/
    let mut rest = lines.filter(|(_, l)| !l.trim().is_empty());

    let (n, line) = rest.next().ok_or(MapError::Missing("spawn"))?;
    let [x, y, degrees]: [f32; 3] = numbers(n, line.split_whitespace(), "`x y direction`")?;
    if !degrees.is_finite() {
        return Err(bad_line(n, format!("direction `{degrees}` is not a finite angle")));
    }

    let ceiling = keyword_color(rest.next(), "ceiling")?;
    let floor = keyword_color(rest.next(), "floor")?;

    /*----- 3. Palette ----------------------------------------------------*/
    let mut palette = Palette::new(ceiling, floor);
    for (n, line) in rest {
        let (code, color) = palette_line(n, line)?;
        palette
            .insert(code, color)
            .map_err(|source| MapError::Palette { line: n, source })?;
    }

    /*----- 4. Resolve tile codes -----------------------------------------*/
    let mut tiles = Vec::with_capacity(width * rows.len());
    for (y, &(_, row)) in rows.iter().enumerate() {
        for (x, code) in row.chars().enumerate() {
            if code.is_control() {
                return Err(MapError::ReservedChar { code, x, y });
            }
            tiles.push(palette.id(code).ok_or(MapError::UnknownTile { code, x, y })?);
        }
    }
    let grid = Grid::new(width, rows.len(), tiles).ok_or(MapError::EmptyGrid)?;

    /*----- 5. Validate ---------------------------------------------------*/
    if let Some(cell) = grid.open_border_cell() {
        return Err(MapError::OpenBorder {
            x: cell.x,
            y: cell.y,
        });
    }
    let spawn = Vec2::new(x, y);
    if !spawn.is_finite() || grid.is_solid(spawn.cell()) {
        return Err(MapError::SpawnInWall { x, y });
    }

    Ok(LoadedMap {
        world: World::new(grid, palette),
        spawn,
        direction: wrap_angle(degrees.to_radians()),
    })
}

/*====================================================================*/
/*                  Line helpers (local)                              */
/*====================================================================*/

fn bad_line(line: usize, reason: impl Into<String>) -> MapError {
    MapError::BadLine {
        line,
        reason: reason.into(),
    }
}

/// Exactly `N` numbers, nothing more.
fn numbers<'a, T: FromStr + Copy + Default, const N: usize>(
    line: usize,
    mut tokens: impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<[T; N], MapError> {
    let mut out = [T::default(); N];
    for slot in out.iter_mut() {
        let tok = tokens
            .next()
            .ok_or_else(|| bad_line(line, format!("expected {what}")))?;
        *slot = tok
            .parse()
            .map_err(|_| bad_line(line, format!("`{tok}` is not a valid number")))?;
    }
    if tokens.next().is_some() {
        return Err(bad_line(line, format!("trailing input after {what}")));
    }
    Ok(out)
}

/// `keyword r g b`
fn keyword_color(entry: Option<(usize, &str)>, keyword: &'static str) -> Result<Color, MapError> {
    let (n, line) = entry.ok_or(MapError::Missing(keyword))?;
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(keyword) {
        return Err(bad_line(n, format!("expected `{keyword} r g b`")));
    }
    let [r, g, b]: [u8; 3] = numbers(n, tokens, "three colour channels")?;
    Ok(Color::rgb(r, g, b))
}

/// `code r g b [a]`; the code is the first character of the line.
fn palette_line(n: usize, line: &str) -> Result<(char, Color), MapError> {
    let mut chars = line.chars();
    let code = chars.next().ok_or(MapError::Missing("palette"))?;
    let rest = chars.as_str();
    if !rest.starts_with(char::is_whitespace) {
        return Err(bad_line(n, "expected a single-character tile code"));
    }

    let channels = rest
        .split_whitespace()
        .map(|tok| {
            tok.parse::<u8>()
                .map_err(|_| bad_line(n, format!("`{tok}` is not a colour channel (0-255)")))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    match channels[..] {
        [r, g, b] => Ok((code, Color::rgb(r, g, b))),
        [r, g, b, a] => Ok((code, Color::rgba(r, g, b, a))),
        _ => Err(bad_line(n, "expected `code r g b [a]`")),
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::EMPTY_TILE;
    use glam::IVec2;

    const ROOM: &str = "\
#####
#  ~#
# X #
#####

1.5 1.5 90
ceiling 10 20 30
floor 1 2 3
# 200 200 200
X 255 0 0
~ 0 0 255 128
";

    #[test]
    fn parses_a_small_room() {
        let map = parse_map(ROOM).unwrap();
        let world = &map.world;
        assert_eq!((world.grid.width(), world.grid.height()), (5, 4));
        assert_eq!(world.palette.ceiling, Color::rgb(10, 20, 30));
        assert_eq!(world.palette.floor, Color::rgb(1, 2, 3));
        assert_eq!(map.spawn, Vec2::new(1.5, 1.5));
        assert!((map.direction - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        assert_eq!(world.grid.tile(IVec2::new(1, 1)), Some(EMPTY_TILE));
        assert_eq!(world.tile_color(IVec2::new(2, 2)), Color::rgb(255, 0, 0));
        assert_eq!(world.tile_color(IVec2::new(3, 1)).a, 128);
        assert!(world.is_solid(IVec2::new(0, 0)));
    }

    #[test]
    fn camera_starts_on_spawn() {
        let map = parse_map(ROOM).unwrap();
        let cam = map.camera(1.0);
        assert_eq!(cam.pos, map.spawn);
        assert_eq!(cam.direction(), map.direction);
        assert_eq!(cam.fov(), 1.0);
    }

    fn err(text: &str) -> MapError {
        parse_map(text).unwrap_err()
    }

    #[test]
    fn malformed_grids_are_rejected() {
        assert!(matches!(err(""), MapError::EmptyGrid));
        assert!(matches!(
            err("###\n# #\n####\n\n1 1 0\nceiling 0 0 0\nfloor 0 0 0\n# 1 1 1\n"),
            MapError::RowWidth { line: 3, expected: 3, found: 4 }
        ));
        assert!(matches!(
            err("###\n#?#\n###\n\n1 1 0\nceiling 0 0 0\nfloor 0 0 0\n# 1 1 1\n"),
            MapError::UnknownTile { code: '?', x: 1, y: 1 }
        ));
        assert!(matches!(
            err("###\n   \n###\n\n1 1 0\nceiling 0 0 0\nfloor 0 0 0\n# 1 1 1\n"),
            MapError::OpenBorder { x: 0, y: 1 }
        ));
    }

    #[test]
    fn control_characters_are_reserved() {
        assert!(matches!(
            err("###\n#\t#\n###\n\n1 1 0\nceiling 0 0 0\nfloor 0 0 0\n# 1 1 1\n"),
            MapError::ReservedChar { code: '\t', x: 1, y: 1 }
        ));
    }

    #[test]
    fn spawn_must_be_open() {
        let text = "###\n# #\n###\n\n0.5 0.5 0\nceiling 0 0 0\nfloor 0 0 0\n# 1 1 1\n";
        assert!(matches!(err(text), MapError::SpawnInWall { .. }));
        let text = "###\n# #\n###\n\n-4 1.5 0\nceiling 0 0 0\nfloor 0 0 0\n# 1 1 1\n";
        assert!(matches!(err(text), MapError::SpawnInWall { .. }));
    }

    #[test]
    fn header_lines_are_checked() {
        let grid = "###\n# #\n###\n\n";
        assert!(matches!(err(grid), MapError::Missing("spawn")));
        assert!(matches!(err(&format!("{grid}1.5 1.5\n")), MapError::BadLine { line: 5, .. }));
        assert!(matches!(err(&format!("{grid}1.5 1.5 0\n")), MapError::Missing("ceiling")));
        assert!(matches!(
            err(&format!("{grid}1.5 1.5 0\nfloor 0 0 0\nceiling 0 0 0\n")),
            MapError::BadLine { line: 6, .. }
        ));
        assert!(matches!(
            err(&format!("{grid}1.5 1.5 0\nceiling 0 0 300\nfloor 0 0 0\n")),
            MapError::BadLine { .. }
        ));
        for heading in ["NaN", "inf", "-inf"] {
            let text = format!("{grid}1.5 1.5 {heading}\nceiling 0 0 0\nfloor 0 0 0\n# 1 1 1\n");
            assert!(
                matches!(err(&text), MapError::BadLine { line: 5, .. }),
                "heading {heading} accepted"
            );
        }
    }

    #[test]
    fn palette_lines_are_checked() {
        let head = "###\n# #\n###\n\n1.5 1.5 0\nceiling 0 0 0\nfloor 0 0 0\n";
        assert!(matches!(
            err(&format!("{head}# 1 1 1\n# 2 2 2\n")),
            MapError::Palette { line: 9, source: PaletteError::Duplicate('#') }
        ));
        assert!(matches!(
            err(&format!("{head}# 1 1 1\n  1 1 1\n")),
            MapError::Palette { source: PaletteError::Reserved(' '), .. }
        ));
        assert!(matches!(err(&format!("{head}## 1 1 1\n")), MapError::BadLine { line: 8, .. }));
        assert!(matches!(err(&format!("{head}# 1 1\n")), MapError::BadLine { .. }));
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let map = parse_map(&ROOM.replace('\n', "\r\n")).unwrap();
        assert_eq!(map.world.grid.width(), 5);
    }

    #[test]
    fn loads_from_disk() {
        let tmp = tempfile::NamedTempFile::new().expect("tempfile");
        std::fs::write(tmp.path(), ROOM).unwrap();
        let map = load_map(tmp.path()).unwrap();
        assert_eq!(map.world.grid.height(), 4);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope.map");
        let err = load_map(&path).unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
        assert!(err.to_string().contains("nope.map"));
    }
}
