//! Text map files: parsing, validation and the built-in fallback room.

mod builtin;
mod loader;

pub use builtin::BUILTIN_ROOM;
pub use loader::{LoadedMap, MapError, load_map, parse_map};

/// The 20×20 room used when no map file is given.
pub fn builtin_room() -> Result<LoadedMap, MapError> {
    let map = parse_map(BUILTIN_ROOM)?;
    log::info!(
        "built-in map loaded: {}×{} tiles",
        map.world.grid.width(),
        map.world.grid.height()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Color;
    use glam::{IVec2, Vec2};

    #[test]
    fn builtin_room_is_valid() {
        let map = builtin_room().unwrap();
        let world = &map.world;
        assert_eq!((world.grid.width(), world.grid.height()), (20, 20));
        assert_eq!(map.spawn, Vec2::new(2.0, 2.0));
        assert!((map.direction - 45f32.to_radians()).abs() < 1e-6);
        assert_eq!(world.palette.ceiling, Color::rgb(50, 50, 50));
        assert_eq!(world.palette.floor, Color::BLACK);
        assert_eq!(world.tile_color(IVec2::new(0, 7)), Color::rgb(0, 255, 0));
        for y in 1..19 {
            for x in 1..19 {
                assert!(!world.is_solid(IVec2::new(x, y)));
            }
        }
    }
}
