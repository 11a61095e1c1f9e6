//! Grid-traversal (DDA) ray caster for one screen column.
//!
//! The ray starts at the camera, steps one cell boundary at a time and
//! records a layer every time the tile kind changes to something visible.
//! Walking stops at the first layer that makes the accumulated colour opaque
//! or when the ray leaves the grid. Layers are then projected and painted far
//! to near into the column.

use glam::{IVec2, Vec2};
use smallvec::SmallVec;

use super::{
    column::{ColumnPainter, Spans},
    projection::Projection,
};
use crate::{
    renderer::ColumnTarget,
    world::{Camera, Color, EMPTY_TILE, TileId, Vec2Ext, World, blend, unit},
};

/// Height of one wall cell in world units.
pub const WALL_UNIT: f32 = 1.0;
/// Corrected distances are clamped to this so projection never divides by 0.
pub const MIN_DISTANCE: f32 = 1e-3;
/// Brightness factor for walls reached across a Y boundary.
const Y_SIDE_SHADE: f32 = 0.5;

/// Which kind of grid line the ray crossed to enter a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// A vertical line (x = const).
    X,
    /// A horizontal line (y = const); drawn darker.
    Y,
}

/// One visible layer along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub cell: IVec2,
    pub side: Side,
    pub tile: TileId,
    /// Euclidean distance from the camera along the ray.
    pub raw_distance: f32,
    /// Distance projected onto the view direction (fish-eye corrected).
    pub distance: f32,
    /// Tile colour after side shading.
    pub color: Color,
}

pub type RayHits = SmallVec<[RayHit; 4]>;

/// Layers met by one ray, nearest first, and their front-to-back composite.
#[derive(Clone, Debug, Default)]
pub struct RayTrace {
    pub hits: RayHits,
    pub color: Color,
}

/// Result of casting one screen column.
#[derive(Clone, Debug)]
pub struct ColumnCast {
    pub column: usize,
    pub trace: RayTrace,
    /// Wall spans to draw, top to bottom. Background rows are not included.
    pub spans: Spans,
}

impl ColumnCast {
    /// Corrected distance to the layer that ended the walk.
    pub fn distance(&self) -> Option<f32> {
        self.trace.hits.last().map(|h| h.distance)
    }

    pub fn draw<T: ColumnTarget + ?Sized>(&self, target: &mut T) {
        for span in &self.spans {
            target.draw_vertical_span(self.column, span.y_start, span.y_end, span.color);
        }
    }
}

/*====================================================================*/
/*                         Grid traversal                              */
/*====================================================================*/

/// Distance along the ray to cross one whole cell on an axis.
#[inline]
fn axis_delta(d: f32) -> f32 {
    if d == 0.0 { f32::INFINITY } else { d.recip().abs() }
}

/// Distance along the ray to the first grid line on an axis.
#[inline]
fn first_crossing(origin: f32, cell: i32, d: f32, delta: f32) -> f32 {
    if d == 0.0 {
        f32::INFINITY
    } else if d < 0.0 {
        (origin - cell as f32) * delta
    } else {
        (cell as f32 + 1.0 - origin) * delta
    }
}

/// Walk the grid from `origin` along unit vector `dir`.
///
/// `view_cos` is the cosine between this ray and the view direction and
/// turns raw distances into corrected ones (pass 1.0 for none).
pub fn trace_ray(world: &World, origin: Vec2, dir: Vec2, view_cos: f32) -> RayTrace {
    let grid = &world.grid;
    let mut cell = origin.cell();
    let step = IVec2::new(
        if dir.x < 0.0 { -1 } else { 1 },
        if dir.y < 0.0 { -1 } else { 1 },
    );
    let delta = Vec2::new(axis_delta(dir.x), axis_delta(dir.y));
    let mut side_dist = Vec2::new(
        first_crossing(origin.x, cell.x, dir.x, delta.x),
        first_crossing(origin.y, cell.y, dir.y, delta.y),
    );

    let mut trace = RayTrace {
        hits: RayHits::new(),
        color: Color::TRANSPARENT,
    };
    // only a *change* of tile kind starts a new layer
    let mut current = grid.tile(cell).unwrap_or(EMPTY_TILE);
    // a straight walk can never visit more cells than this
    let max_steps = grid.width() + grid.height() + 2;

    for _ in 0..max_steps {
        let (raw_distance, side) = if side_dist.x < side_dist.y {
            let d = side_dist.x;
            side_dist.x += delta.x;
            cell.x += step.x;
            (d, Side::X)
        } else {
            let d = side_dist.y;
            side_dist.y += delta.y;
            cell.y += step.y;
            (d, Side::Y)
        };

        let Some(tile) = grid.tile(cell) else {
            break; // left the map
        };
        if tile == current {
            continue;
        }
        current = tile;
        if tile == EMPTY_TILE {
            continue;
        }

        let mut color = world.palette.color(tile);
        if color.is_transparent() {
            continue;
        }
        if side == Side::Y {
            color *= Y_SIDE_SHADE;
        }

        trace.hits.push(RayHit {
            cell,
            side,
            tile,
            raw_distance,
            distance: (raw_distance * view_cos).max(MIN_DISTANCE),
            color,
        });
        trace.color = blend(trace.color, color);
        if trace.color.is_opaque() {
            break;
        }
    }
    trace
}

/*====================================================================*/
/*                           Projection                                */
/*====================================================================*/

/// Vertical shift of the whole view caused by looking up or down.
#[inline]
pub fn pitch_offset(camera: &Camera, proj: &Projection) -> f32 {
    camera.pitch().tan() * proj.plane_width as f32
}

/// Screen row where ceiling meets floor.
#[inline]
pub fn horizon_row(camera: &Camera, proj: &Projection) -> i32 {
    to_row(proj.plane_height as f32 * 0.5 + pitch_offset(camera, proj), proj)
}

#[inline]
fn to_row(y: f32, proj: &Projection) -> i32 {
    // keep a row of slack on each side so clipping stays in the target
    y.round().clamp(-1.0, proj.plane_height as f32 + 1.0) as i32
}

/// Top and bottom row of a wall at corrected distance `distance`.
pub fn wall_rows(camera: &Camera, proj: &Projection, distance: f32) -> (i32, i32) {
    let distance = distance.max(MIN_DISTANCE);
    let scale = proj.plane_distance / distance;
    let length = WALL_UNIT * scale;
    let centre = proj.plane_height as f32 * 0.5
        + pitch_offset(camera, proj)
        + (camera.height() - 0.5) * scale;
    (
        to_row(centre - length * 0.5, proj),
        to_row(centre + length * 0.5, proj),
    )
}

/// Cast screen column `column` (`0 <= column < plane_width`).
pub fn cast_column(world: &World, camera: &Camera, proj: &Projection, column: usize) -> ColumnCast {
    let rel = proj.column_angle(column);
    let angle = camera.direction() + rel;
    let trace = trace_ray(world, camera.pos, unit(angle), rel.cos());

    let mut painter = ColumnPainter::new(
        proj.plane_height as i32,
        horizon_row(camera, proj),
        world.palette.ceiling,
        world.palette.floor,
    );
    for hit in trace.hits.iter().rev() {
        let (top, bottom) = wall_rows(camera, proj, hit.distance);
        painter.paint(top, bottom, hit.color);
    }

    ColumnCast {
        column,
        trace,
        spans: painter.into_spans(),
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
