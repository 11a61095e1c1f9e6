//! Run-time tunables.
//!
//! Rates are per second and scaled by the (clamped) frame time, so the feel
//! does not depend on the frame rate.

use thiserror::Error;

use crate::world::{MAX_FOV, MIN_FOV};

/// Longest frame time fed to the simulation, in seconds.
///
/// Keeps one frame's movement well under one grid cell after a stall.
pub const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number (got {value})")]
    NotPositive { name: &'static str, value: f32 },

    #[error("field of view {0:.1}° is outside 10°..179°")]
    FovOutOfRange(f32),

    #[error("move speed {0} covers a whole cell in a single frame")]
    TooFast(f32),

    #[error("screen must be at least 1×1 pixels (got {0}×{1})")]
    EmptyScreen(usize, usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Worker threads for the cast pass; 1 renders synchronously.
    pub threads: usize,
    /// Initial horizontal field of view, radians.
    pub fov: f32,
    /// Map units per second.
    pub move_rate: f32,
    /// Radians per second.
    pub turn_rate: f32,
    /// Radians per second of keyboard look.
    pub pitch_rate: f32,
    /// Column heights per second of crouch/rise.
    pub height_rate: f32,
    /// Radians of fov per second of zoom.
    pub zoom_rate: f32,
    /// Radians per pixel of pointer motion.
    pub sensitivity: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            threads: default_threads(),
            fov: 60f32.to_radians(),
            move_rate: 3.0,
            turn_rate: std::f32::consts::PI, // 180°/s
            pitch_rate: std::f32::consts::FRAC_PI_2,
            height_rate: 1.0,
            zoom_rate: 45f32.to_radians(),
            sensitivity: 0.003,
        }
    }
}

/// Detected hardware concurrency, 1 if unknown.
pub fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyScreen(self.width, self.height));
        }
        for (name, value) in [
            ("move rate", self.move_rate),
            ("turn rate", self.turn_rate),
            ("pitch rate", self.pitch_rate),
            ("height rate", self.height_rate),
            ("zoom rate", self.zoom_rate),
            ("sensitivity", self.sensitivity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(MIN_FOV..=MAX_FOV).contains(&self.fov) {
            return Err(ConfigError::FovOutOfRange(self.fov.to_degrees()));
        }
        if self.move_rate * MAX_FRAME_TIME >= 1.0 {
            return Err(ConfigError::TooFast(self.move_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert!(cfg.threads >= 1);
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = Config {
            move_rate: 12.0,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::TooFast(12.0)));

        let cfg = Config {
            turn_rate: -1.0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { name: "turn rate", .. })));

        let cfg = Config {
            fov: 3f32.to_radians(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::FovOutOfRange(_))));

        let cfg = Config {
            height: 0,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyScreen(1280, 0)));
    }
}
