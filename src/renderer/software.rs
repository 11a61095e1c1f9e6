//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Draws into a **column-major** scratch buffer: every screen column is one
//!   contiguous run of `height` pixels, so a range of columns is a plain
//!   sub-slice and can be handed to a worker thread with `split_at_mut`.
//! * `end_frame` converts to the row-major `0xAARRGGBB` layout windows expect.
//! ---------------------------------------------------------------------------

use std::ops::Range;

use crate::{
    renderer::{ColumnTarget, Renderer, Rgba},
    world::Color,
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Column-major software frame.
#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>, // column-major: x * height + y
    present: Vec<Rgba>, // row-major copy handed to `end_frame`
    width: usize,
    height: usize,
}

/// One worker's share of the frame: columns `first..first + len`.
pub struct ColumnSlice<'a> {
    first: usize,
    height: usize,
    pixels: &'a mut [Rgba],
}

impl Software {
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at screen `(x, y)` of the frame being built.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.scratch[x * self.height + y])
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[x as usize * self.height + y as usize] = color;
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    type Slice<'a> = ColumnSlice<'a>;

    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
            self.present.resize(w * h, 0);
        }

        /* black clear */
        self.scratch.fill(0xFF_00_00_00);
    }

    fn fill_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.clamp(0, self.width as i32) as usize;
        let x1 = x.saturating_add(w).clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as usize;
        let y1 = y.saturating_add(h).clamp(0, self.height as i32) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let px = color.to_rgba();
        for col in self.scratch.chunks_exact_mut(self.height).take(x1).skip(x0) {
            col[y0..y1].fill(px);
        }
    }

    /// Integer Bresenham line-drawing algorithm.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let px = color.to_rgba();
        let mut x0 = x0;
        let mut y0 = y0;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, px);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn column_slices(&mut self, ranges: &[Range<usize>]) -> Vec<ColumnSlice<'_>> {
        let h = self.height;
        let mut slices = Vec::with_capacity(ranges.len());
        let mut rest: &mut [Rgba] = &mut self.scratch;
        let mut next = 0;
        for r in ranges {
            assert!(
                next <= r.start && r.start <= r.end && r.end <= self.width,
                "column ranges must be ascending, disjoint and on screen"
            );
            // skip any gap, then carve off this range
            let (_, tail) = std::mem::take(&mut rest).split_at_mut((r.start - next) * h);
            let (pixels, tail) = tail.split_at_mut(r.len() * h);
            slices.push(ColumnSlice {
                first: r.start,
                height: h,
                pixels,
            });
            rest = tail;
            next = r.end;
        }
        slices
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        let (w, h) = (self.width, self.height);
        if h > 0 {
            for (x, col) in self.scratch.chunks_exact(h).enumerate() {
                for (y, &px) in col.iter().enumerate() {
                    self.present[y * w + x] = px;
                }
            }
        }
        submit(&self.present, w, h);
    }
}

/*──────────────────────── column slices ──────────────────────────────*/

impl ColumnTarget for ColumnSlice<'_> {
    fn columns(&self) -> Range<usize> {
        let len = if self.height == 0 {
            0
        } else {
            self.pixels.len() / self.height
        };
        self.first..self.first + len
    }

    fn height(&self) -> usize {
        self.height
    }

    fn draw_vertical_span(&mut self, column: usize, y_start: i32, y_end: i32, color: Color) {
        if !self.columns().contains(&column) {
            return;
        }
        let y0 = y_start.clamp(0, self.height as i32) as usize;
        let y1 = y_end.clamp(0, self.height as i32) as usize;
        if y0 >= y1 {
            return;
        }
        let base = (column - self.first) * self.height;
        self.pixels[base + y0..base + y1].fill(color.to_rgba());
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color = Color::rgb(0, 0, 255);

    fn row_major(sw: &mut Software) -> Vec<Rgba> {
        let mut out = Vec::new();
        sw.end_frame(|fb, _, _| out.extend_from_slice(fb));
        out
    }

    #[test]
    fn software_renders_span() {
        let mut sw = Software::default();
        sw.begin_frame(8, 8);
        {
            let mut slices = sw.column_slices(&[0..8]);
            slices[0].draw_vertical_span(2, 1, 4, BLUE);
        }
        let fb = row_major(&mut sw);
        for y in 0..8 {
            let expected = if (1..4).contains(&y) { BLUE.to_rgba() } else { 0xFF_00_00_00 };
            assert_eq!(fb[y * 8 + 2], expected, "row {y}");
        }
        assert_eq!(fb.iter().filter(|&&px| px == BLUE.to_rgba()).count(), 3);
    }

    #[test]
    fn slices_are_disjoint_and_clipped() {
        let mut sw = Software::default();
        sw.begin_frame(6, 4);
        {
            let mut slices = sw.column_slices(&[0..2, 2..3, 3..6]);
            assert_eq!(slices[0].columns(), 0..2);
            assert_eq!(slices[1].columns(), 2..3);
            assert_eq!(slices[2].columns(), 3..6);
            // column 4 is not ours: ignored
            slices[0].draw_vertical_span(4, 0, 4, BLUE);
            slices[2].draw_vertical_span(5, -10, 10, BLUE);
        }
        assert_eq!(sw.pixel(4, 0), Some(0xFF_00_00_00));
        for y in 0..4 {
            assert_eq!(sw.pixel(5, y), Some(BLUE.to_rgba()));
        }
    }

    #[test]
    fn rectangle_and_line_clip() {
        let mut sw = Software::default();
        sw.begin_frame(4, 4);
        sw.fill_rectangle(-2, 2, 10, 10, Color::WHITE);
        sw.draw_line(0, 0, 3, 0, BLUE);
        sw.draw_line(2, -5, 2, 9, BLUE);
        let fb = row_major(&mut sw);
        assert_eq!(fb[0], BLUE.to_rgba());
        assert_eq!(fb[3], BLUE.to_rgba());
        assert_eq!(fb[2 * 4], Color::WHITE.to_rgba());
        assert_eq!(fb[3 * 4 + 2], BLUE.to_rgba());
        assert_eq!(fb[4 + 1], 0xFF_00_00_00);
    }
}
