//! Rendering abstraction layer.
//!
//! *The engine never touches a pixel buffer directly.* The caster produces
//! vertical spans per screen column and hands them to a [`ColumnTarget`];
//! everything else (background, overlay) goes through [`Renderer`].
//!
//! * A renderer splits its frame into disjoint column slices so worker
//!   threads can draw without locks.
//! * Nothing ever reads pixels back: spans are final colours.

use std::ops::Range;

use crate::world::Color;

/// Pixel format of the software frame-buffer (0xAARRGGBB, alpha ignored by
/// the window).
pub type Rgba = u32;

/// Exclusive write access to a contiguous run of screen columns.
pub trait ColumnTarget {
    /// Screen columns this target may write.
    fn columns(&self) -> Range<usize>;

    /// Frame height in pixels.
    fn height(&self) -> usize;

    /// Fill rows `y_start..y_end` of `column` (half-open, clipped to the
    /// frame). Columns outside [`Self::columns`] are ignored.
    fn draw_vertical_span(&mut self, column: usize, y_start: i32, y_end: i32, color: Color);
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure, so the
/// window layer stays outside the engine.
pub trait Renderer {
    type Slice<'a>: ColumnTarget + Send
    where
        Self: 'a;

    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill an axis-aligned rectangle, clipped to the frame.
    fn fill_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);

    /// One-pixel line, clipped to the frame.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);

    /// Split the frame into disjoint column targets, one per range.
    ///
    /// Ranges must be ascending and non-overlapping.
    fn column_slices(&mut self, ranges: &[Range<usize>]) -> Vec<Self::Slice<'_>>;

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

pub mod overlay;
pub mod software;

pub use software::{ColumnSlice, Software};
