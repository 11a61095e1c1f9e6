//! Top-down minimap drawn over the finished 3-D view.

use glam::Vec2;

use super::Renderer;
use crate::world::{Camera, Color, World};

/// Gap between the screen corner and the map, in pixels.
pub const MINIMAP_MARGIN: i32 = 8;

const FLOOR_CELL: Color = Color::rgb(24, 24, 24);
const PLAYER_DOT: Color = Color::WHITE;
const HEADING: Color = Color::rgb(255, 64, 64);

/// Pixels per grid cell: the map takes at most a third of the shorter screen
/// side, never less than one pixel per cell.
pub fn minimap_scale(world: &World, width: usize, height: usize) -> i32 {
    let longest = world.grid.width().max(world.grid.height()).max(1);
    (width.min(height) / 3 / longest).max(1) as i32
}

/// Screen position of world point `p`.
#[inline]
fn to_screen(p: Vec2, scale: i32) -> (i32, i32) {
    (
        MINIMAP_MARGIN + (p.x * scale as f32) as i32,
        MINIMAP_MARGIN + (p.y * scale as f32) as i32,
    )
}

/// Grid, camera dot and a facing line two cells long.
pub fn draw_minimap<R: Renderer + ?Sized>(
    renderer: &mut R,
    world: &World,
    camera: &Camera,
    width: usize,
    height: usize,
) {
    let scale = minimap_scale(world, width, height);

    for y in 0..world.grid.height() {
        for (x, &tile) in world.grid.row(y).iter().enumerate() {
            let color = world.palette.color(tile);
            let color = if color.is_transparent() {
                FLOOR_CELL
            } else {
                Color { a: 255, ..color }
            };
            renderer.fill_rectangle(
                MINIMAP_MARGIN + x as i32 * scale,
                MINIMAP_MARGIN + y as i32 * scale,
                scale,
                scale,
                color,
            );
        }
    }

    let (px, py) = to_screen(camera.pos, scale);
    let (hx, hy) = to_screen(camera.pos + camera.forward() * 2.0, scale);
    renderer.draw_line(px, py, hx, hy, HEADING);

    let dot = (scale / 2).max(1);
    renderer.fill_rectangle(px - dot / 2, py - dot / 2, dot, dot, PLAYER_DOT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Software;
    use crate::world::{Grid, Palette};

    fn room() -> World {
        let mut palette = Palette::default();
        palette.insert('#', Color::rgb(0, 255, 0)).unwrap();
        World::new(Grid::bordered(10, 10, 1), palette)
    }

    #[test]
    fn scale_fits_a_third_of_the_screen() {
        let world = room();
        assert_eq!(minimap_scale(&world, 300, 600), 10);
        assert_eq!(minimap_scale(&world, 20, 20), 1);
    }

    #[test]
    fn draws_walls_floor_and_player() {
        let world = room();
        // facing +X from the middle of cell (4, 4)
        let camera = Camera::new(Vec2::new(4.5, 4.5), 0.0, 1.0);
        let mut sw = Software::default();
        sw.begin_frame(300, 300);
        draw_minimap(&mut sw, &world, &camera, 300, 300);

        let s = minimap_scale(&world, 300, 300) as usize;
        let m = MINIMAP_MARGIN as usize;
        assert_eq!(sw.pixel(m + 1, m + 1), Some(Color::rgb(0, 255, 0).to_rgba()));
        assert_eq!(sw.pixel(m + 2 * s + 1, m + 2 * s + 1), Some(FLOOR_CELL.to_rgba()));

        let (px, py) = to_screen(camera.pos, s as i32);
        assert_eq!(sw.pixel(px as usize, py as usize), Some(PLAYER_DOT.to_rgba()));
        // heading ends two cells ahead
        assert_eq!(sw.pixel(px as usize + 2 * s, py as usize), Some(HEADING.to_rgba()));
    }
}
