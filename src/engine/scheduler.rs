//! Fork-join frame scheduler.
//!
//! The screen is cut into `N` contiguous column slices; each slice is cast by
//! one task on a fixed-size `rayon` pool and the call only returns once every
//! task has finished, so a frame is never presented half-drawn. Workers share
//! one read-only [`FrameSnapshot`] and write only their own columns.

use std::ops::Range;

use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;

use super::{caster::cast_column, projection::Projection};
use crate::{
    renderer::{ColumnTarget, Renderer},
    world::{Camera, World},
};

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("cannot start {threads} render workers: {source}")]
    Pool {
        threads: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

/// Everything a worker may read during one cast pass.
///
/// Taken after the camera has been moved for this frame; nothing in it is
/// written until every worker has joined.
#[derive(Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub world: &'a World,
    pub camera: Camera,
    pub projection: Projection,
}

/// Split `0..width` into `slices` contiguous ranges.
///
/// Every range is `width / slices` wide except the last, which absorbs the
/// remainder. The slice count is clamped to `1..=width` so no range is empty
/// (a zero `width` yields one empty range).
pub fn partition(width: usize, slices: usize) -> Vec<Range<usize>> {
    let n = slices.clamp(1, width.max(1));
    let step = width / n;
    (0..n)
        .map(|i| {
            let start = i * step;
            let end = if i + 1 == n { width } else { start + step };
            start..end
        })
        .collect()
}

/// Cast every column of `target`.
pub fn cast_slice<T: ColumnTarget + ?Sized>(target: &mut T, frame: &FrameSnapshot<'_>) {
    for column in target.columns() {
        cast_column(frame.world, &frame.camera, &frame.projection, column).draw(target);
    }
}

pub struct FrameScheduler {
    slices: usize,
    pool: Option<ThreadPool>,
}

impl FrameScheduler {
    /// Single slice, cast on the calling thread.
    pub fn synchronous() -> Self {
        Self {
            slices: 1,
            pool: None,
        }
    }

    /// `threads` workers, one slice each. `threads <= 1` stays synchronous.
    pub fn new(threads: usize) -> Result<Self, SchedulerError> {
        if threads <= 1 {
            return Ok(Self::synchronous());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("cast-{i}"))
            .build()
            .map_err(|source| SchedulerError::Pool { threads, source })?;
        log::info!("render pool: {threads} workers");
        Ok(Self {
            slices: threads,
            pool: Some(pool),
        })
    }

    /// Like [`Self::new`] but falls back to synchronous casting.
    pub fn new_or_synchronous(threads: usize) -> Self {
        Self::new(threads).unwrap_or_else(|e| {
            log::warn!("{e}; casting on the main thread");
            Self::synchronous()
        })
    }

    #[inline(always)]
    pub fn slices(&self) -> usize {
        self.slices
    }

    /// Cast the whole frame into `renderer` and wait for every slice.
    pub fn render<R: Renderer>(&self, renderer: &mut R, frame: &FrameSnapshot<'_>) {
        let ranges = partition(frame.projection.plane_width, self.slices);
        let slices = renderer.column_slices(&ranges);
        match &self.pool {
            Some(pool) if slices.len() > 1 => pool.scope(|s| {
                for mut slice in slices {
                    s.spawn(move |_| cast_slice(&mut slice, frame));
                }
            }),
            _ => {
                for mut slice in slices {
                    cast_slice(&mut slice, frame);
                }
            }
        }
    }
}
