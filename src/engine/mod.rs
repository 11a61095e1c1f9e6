pub mod caster;
pub mod column;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod projection;
pub mod scheduler;

pub use caster::{ColumnCast, RayHit, RayTrace, Side, cast_column, horizon_row, trace_ray};
pub use column::{Span, Spans};
pub use engine::Engine;
pub use projection::Projection;
pub use scheduler::{FrameScheduler, FrameSnapshot, SchedulerError, partition};
