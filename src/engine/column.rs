//! Per-column compositing without frame-buffer read-back.
//!
//! A column starts as two background runs (ceiling above the horizon,
//! floor below). Wall layers are painted far to near; each one is blended
//! over whatever runs it covers, so a translucent pane shows the wall behind
//! it in the middle and the ceiling/floor above and below.

use smallvec::SmallVec;

use crate::world::{Color, blend};

/// Final colour for rows `y_start..y_end` of one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub y_start: i32,
    pub y_end: i32,
    pub color: Color,
}

impl Span {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y_end <= self.y_start
    }

    #[inline]
    pub fn contains(&self, y: i32) -> bool {
        (self.y_start..self.y_end).contains(&y)
    }
}

pub type Spans = SmallVec<[Span; 8]>;

#[derive(Clone, Copy, Debug)]
struct Run {
    span: Span,
    painted: bool, // background runs are drawn by the frame fill
}

/// Piecewise-constant model of one screen column.
pub(crate) struct ColumnPainter {
    runs: SmallVec<[Run; 8]>,
}

impl ColumnPainter {
    /// Column of `height` rows split at `horizon` (already clamped).
    pub fn new(height: i32, horizon: i32, ceiling: Color, floor: Color) -> Self {
        let horizon = horizon.clamp(0, height);
        let mut runs = SmallVec::new();
        for span in [
            Span {
                y_start: 0,
                y_end: horizon,
                color: ceiling,
            },
            Span {
                y_start: horizon,
                y_end: height,
                color: floor,
            },
        ] {
            if !span.is_empty() {
                runs.push(Run {
                    span,
                    painted: false,
                });
            }
        }
        Self { runs }
    }

    /// Blend `color` over rows `y_start..y_end`.
    pub fn paint(&mut self, y_start: i32, y_end: i32, color: Color) {
        if y_start >= y_end || color.is_transparent() {
            return;
        }
        let mut out = SmallVec::<[Run; 8]>::with_capacity(self.runs.len() + 2);
        for run in self.runs.drain(..) {
            let s = run.span;
            if s.y_end <= y_start || s.y_start >= y_end {
                out.push(run);
                continue;
            }
            if s.y_start < y_start {
                out.push(Run {
                    span: Span { y_end: y_start, ..s },
                    ..run
                });
            }
            out.push(Run {
                span: Span {
                    y_start: s.y_start.max(y_start),
                    y_end: s.y_end.min(y_end),
                    color: blend(color, s.color),
                },
                painted: true,
            });
            if s.y_end > y_end {
                out.push(Run {
                    span: Span { y_start: y_end, ..s },
                    ..run
                });
            }
        }
        self.runs = out;
    }

    /// Painted runs, top to bottom; touching runs of one colour are merged.
    pub fn into_spans(self) -> Spans {
        let mut spans = Spans::new();
        for span in self.runs.into_iter().filter(|r| r.painted).map(|r| r.span) {
            match spans.last_mut() {
                Some(prev) if prev.y_end == span.y_start && prev.color == span.color => {
                    prev.y_end = span.y_end;
                }
                _ => spans.push(span),
            }
        }
        spans
    }
}
