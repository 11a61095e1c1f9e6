use glam::Vec2;

use super::vector::{unit, wrap_angle};

/// Narrowest horizontal field of view the projection accepts.
pub const MIN_FOV: f32 = 10.0 * std::f32::consts::PI / 180.0;
/// Widest horizontal field of view (180° would put the plane at zero).
pub const MAX_FOV: f32 = 179.0 * std::f32::consts::PI / 180.0;
/// Vertical look limit, strictly inside ±90°.
pub const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Player view-point on the grid.
///
/// * `direction` is radians, 0 = +X, growing towards +Y, kept in `[0, 2π)`.
/// * `height` is the eye level inside a one-unit-tall column, `[0, 1]`
///   (0 = crouched on the floor, 0.5 = centred).
/// * Every setter clamps or wraps; out-of-range input is never an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    direction: f32,
    pitch: f32,
    height: f32,
    fov: f32,
}

impl Camera {
    /// Create a camera at `pos`, facing `direction`, with horizontal FoV `fov`.
    pub fn new(pos: Vec2, direction: f32, fov: f32) -> Self {
        Self {
            pos,
            direction: wrap_angle(direction),
            pitch: 0.0,
            height: 0.5,
            fov: fov.clamp(MIN_FOV, MAX_FOV),
        }
    }

    #[inline(always)]
    pub fn direction(&self) -> f32 {
        self.direction
    }

    #[inline(always)]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline(always)]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        unit(self.direction)
    }

    /// Unit vector pointing to the camera's right on screen.
    #[inline(always)]
    pub fn right(self) -> Vec2 {
        // screen x grows with the ray angle, so "right" is forward + 90°
        self.forward().perp()
    }

    /*──────────────────────── mutation ──────────────────────────────*/

    /// Turn by `delta` radians (positive = towards screen right).
    pub fn turn(&mut self, delta: f32) {
        self.direction = wrap_angle(self.direction + delta);
    }

    pub fn set_direction(&mut self, direction: f32) {
        self.direction = wrap_angle(direction);
    }

    /// Tilt the view by `delta` radians (positive = look up).
    pub fn look(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn rise(&mut self, delta: f32) {
        self.set_height(self.height + delta);
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height.clamp(0.0, 1.0);
    }

    /// Widen (positive) or narrow the field of view.
    /// Returns `true` when the stored value actually changed.
    pub fn zoom(&mut self, delta: f32) -> bool {
        self.set_fov(self.fov + delta)
    }

    pub fn set_fov(&mut self, fov: f32) -> bool {
        let fov = fov.clamp(MIN_FOV, MAX_FOV);
        let changed = fov != self.fov;
        self.fov = fov;
        changed
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

    #[test]
    fn forward_and_right_are_orthonormal() {
        let cam = Camera::new(Vec2::ZERO, 0.3, FRAC_PI_3);
        let f = cam.forward();
        let r = cam.right();
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
    }

    #[test]
    fn right_is_a_positive_turn_away() {
        let cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_3);
        assert!((cam.right() - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn turning_wraps() {
        let mut cam = Camera::new(Vec2::ZERO, 0.1, FRAC_PI_3);
        cam.turn(-0.2);
        assert!((cam.direction() - (TAU - 0.1)).abs() < 1e-5);
        cam.turn(0.3);
        assert!((cam.direction() - 0.2).abs() < 1e-5);
        cam.set_direction(-TAU);
        assert!(cam.direction() >= 0.0 && cam.direction() < TAU);
    }

    #[test]
    fn controls_clamp() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_3);
        cam.look(10.0);
        assert_eq!(cam.pitch(), MAX_PITCH);
        assert!(cam.pitch() < FRAC_PI_2);
        cam.look(-20.0);
        assert_eq!(cam.pitch(), -MAX_PITCH);

        cam.rise(3.0);
        assert_eq!(cam.height(), 1.0);
        cam.rise(-3.0);
        assert_eq!(cam.height(), 0.0);

        assert!(cam.zoom(100.0));
        assert_eq!(cam.fov(), MAX_FOV);
        assert!(!cam.zoom(1.0), "already at the limit");
        cam.zoom(-100.0);
        assert_eq!(cam.fov(), MIN_FOV);
    }
}
