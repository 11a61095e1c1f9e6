//! 2-D helpers layered on top of `glam::Vec2`.
//!
//! Arithmetic, length and normalisation come straight from glam; this module
//! only adds what the grid world needs on top: headings in `[0, 2π)`, angle
//! wrapping and truncation to a grid cell.

use glam::{IVec2, Vec2};
use std::f32::consts::TAU;

/// Wrap any angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit vector for `angle` (0 = +X, growing towards +Y).
#[inline(always)]
pub fn unit(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}

pub trait Vec2Ext {
    /// Heading of the vector in `[0, 2π)`, `None` for the zero vector.
    fn heading(self) -> Option<f32>;

    /// Grid cell holding this point (truncation toward zero).
    fn cell(self) -> IVec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn heading(self) -> Option<f32> {
        if self == Vec2::ZERO {
            return None;
        }
        Some(wrap_angle(self.y.atan2(self.x)))
    }

    #[inline]
    fn cell(self) -> IVec2 {
        IVec2::new(self.x as i32, self.y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn heading_covers_all_quadrants() {
        let cases = [
            (Vec2::new(1.0, 0.0), 0.0),
            (Vec2::new(0.0, 1.0), FRAC_PI_2),
            (Vec2::new(-1.0, 0.0), PI),
            (Vec2::new(0.0, -1.0), 3.0 * FRAC_PI_2),
            (Vec2::new(1.0, -1.0), 7.0 * PI / 4.0),
        ];
        for (v, expected) in cases {
            let h = v.heading().unwrap();
            assert!((h - expected).abs() < 1e-5, "{v:?}: {h} != {expected}");
        }
        assert_eq!(Vec2::ZERO.heading(), None);
    }

    #[test]
    fn wrap_stays_in_range() {
        assert!((wrap_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert_eq!(wrap_angle(TAU), 0.0);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn cell_truncates() {
        assert_eq!(Vec2::new(2.99, 0.01).cell(), IVec2::new(2, 0));
        assert_eq!(Vec2::new(5.0, 7.5).cell(), IVec2::new(5, 7));
    }

    #[test]
    fn unit_matches_heading() {
        let v = unit(1.0);
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.heading().unwrap() - 1.0).abs() < 1e-5);
    }
}
