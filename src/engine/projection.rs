use crate::world::{MAX_FOV, MIN_FOV};

/// Constants that depend on the frame-buffer and the field of view, not on
/// the map.
///
/// ```text
/// plane_distance = plane_width / (2 * tan(fov/2))
/// ```
///
/// Rebuilt through [`Projection::set_fov`] whenever the fov changes; always
/// positive and finite because fov is clamped to `[MIN_FOV, MAX_FOV]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub plane_width: usize,
    pub plane_height: usize,
    pub plane_distance: f32,
    fov: f32,
}

impl Projection {
    pub fn new(plane_width: usize, plane_height: usize, fov: f32) -> Self {
        let mut p = Self {
            plane_width: plane_width.max(1),
            plane_height: plane_height.max(1),
            plane_distance: 1.0,
            fov: 0.0,
        };
        p.set_fov(fov);
        p
    }

    #[inline(always)]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Recompute the plane distance for `fov` (clamped).
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(MIN_FOV, MAX_FOV);
        self.plane_distance = self.plane_width as f32 * 0.5 / (self.fov * 0.5).tan();
        log::debug!(
            "projection: fov {:.1}° → plane distance {:.2}",
            self.fov.to_degrees(),
            self.plane_distance
        );
    }

    /// Angle of column `i` relative to the view direction.
    ///
    /// Columns are spread evenly across the projection plane, not in equal
    /// angle steps, so walls stay straight at wide fov.
    #[inline]
    pub fn column_angle(&self, i: usize) -> f32 {
        let offset = i as f32 - self.plane_width as f32 * 0.5 + 0.5;
        (offset / self.plane_distance).atan()
    }
}
