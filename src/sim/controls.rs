use glam::Vec2;

use super::input::{Buttons, InputState};
use crate::config::Config;
use crate::world::Camera;

/// What one frame of input asks of the rest of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Steering {
    /// Unit-length or zero movement direction for the resolver.
    pub movement: Vec2,
    /// The field of view changed; projection constants must be rebuilt.
    pub fov_changed: bool,
}

/// Turn one frame of input into camera changes and a movement direction.
///
/// Every camera setter clamps or wraps, so the returned state always sits
/// inside the ranges the caster relies on.
pub fn player_input(camera: &mut Camera, input: &InputState, cfg: &Config, dt: f32) -> Steering {
    /* 1. turn: keys scale with time, pointer with sensitivity */
    let turn = input.axis(Buttons::TURN_RIGHT, Buttons::TURN_LEFT) * cfg.turn_rate * dt
        + input.pointer_delta.x * cfg.sensitivity;
    if turn != 0.0 {
        camera.turn(turn);
    }

    /* 2. look up/down (pointer up = look up) */
    let look = input.axis(Buttons::LOOK_UP, Buttons::LOOK_DOWN) * cfg.pitch_rate * dt
        - input.pointer_delta.y * cfg.sensitivity;
    if look != 0.0 {
        camera.look(look);
    }

    /* 3. crouch / rise */
    let rise = input.axis(Buttons::RISE, Buttons::CROUCH);
    if rise != 0.0 {
        camera.rise(rise * cfg.height_rate * dt);
    }

    /* 4. zoom */
    let zoom = input.axis(Buttons::ZOOM_OUT, Buttons::ZOOM_IN);
    let fov_changed = zoom != 0.0 && camera.zoom(zoom * cfg.zoom_rate * dt);

    /* 5. wish direction, relative to the new heading */
    let fwd = camera.forward();
    let right = camera.right();
    let dir = fwd * input.axis(Buttons::FORWARD, Buttons::BACK)
        + right * input.axis(Buttons::STRAFE_RIGHT, Buttons::STRAFE_LEFT);

    Steering {
        movement: dir.normalize_or_zero(),
        fov_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{MAX_FOV, MAX_PITCH};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

    fn held(buttons: Buttons) -> InputState {
        let mut input = InputState::default();
        input.update(buttons, None, false);
        input
    }

    fn cfg() -> Config {
        Config {
            threads: 1,
            ..Config::default()
        }
    }

    #[test]
    fn diagonal_movement_is_normalised() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_3);
        let s = player_input(&mut cam, &held(Buttons::FORWARD | Buttons::STRAFE_RIGHT), &cfg(), 0.016);
        assert!((s.movement.length() - 1.0).abs() < 1e-6);
        assert!((s.movement - Vec2::new(1.0, 1.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn idle_and_cancelling_input_does_not_move() {
        let mut cam = Camera::new(Vec2::ZERO, 1.0, FRAC_PI_3);
        let s = player_input(&mut cam, &held(Buttons::empty()), &cfg(), 0.016);
        assert_eq!(s, Steering::default());
        let s = player_input(&mut cam, &held(Buttons::FORWARD | Buttons::BACK), &cfg(), 0.016);
        assert_eq!(s.movement, Vec2::ZERO);
        assert_eq!(cam.direction(), 1.0);
    }

    #[test]
    fn turning_wraps_and_uses_frame_time() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_3);
        let cfg = cfg();
        player_input(&mut cam, &held(Buttons::TURN_LEFT), &cfg, 0.5);
        assert!((cam.direction() - (TAU - cfg.turn_rate * 0.5)).abs() < 1e-5);
        // after turning right by 90° forward now points at +Y
        let mut cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_3);
        let s = player_input(&mut cam, &held(Buttons::TURN_RIGHT | Buttons::FORWARD), &cfg, 0.5);
        assert!((cam.direction() - FRAC_PI_2).abs() < 1e-5);
        assert!((s.movement - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn pointer_turns_and_looks() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_3);
        let cfg = cfg();
        let mut input = InputState::default();
        input.update(Buttons::empty(), Some(Vec2::new(100.0, 100.0)), false);
        input.update(Buttons::empty(), Some(Vec2::new(110.0, 90.0)), false);
        player_input(&mut cam, &input, &cfg, 0.016);
        assert!((cam.direction() - 10.0 * cfg.sensitivity).abs() < 1e-6);
        assert!((cam.pitch() - 10.0 * cfg.sensitivity).abs() < 1e-6);
    }

    #[test]
    fn controls_are_clamped_and_zoom_is_reported() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_3);
        let cfg = cfg();
        let input = held(Buttons::LOOK_UP | Buttons::RISE | Buttons::ZOOM_OUT);
        let mut changed = false;
        for _ in 0..100 {
            changed |= player_input(&mut cam, &input, &cfg, 0.1).fov_changed;
        }
        assert!(changed);
        assert_eq!(cam.pitch(), MAX_PITCH);
        assert_eq!(cam.height(), 1.0);
        assert_eq!(cam.fov(), MAX_FOV);
        // pinned at the limit: no further change reported
        assert!(!player_input(&mut cam, &input, &cfg, 0.1).fov_changed);
    }
}
