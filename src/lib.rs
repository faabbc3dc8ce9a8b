//! Danmaku Lasers - laser beam simulation for a 2D bullet-hell shooter
//!
//! Core modules:
//! - `sim`: Deterministic beam simulation (fade lifecycle, trails, pools, hit-tests)
//! - `renderer`: Read-only records handed to the external renderer
//! - `settings`: Data-driven pool capacities and timings
//! - `demo`: Seeded laser test level driving the headless binary

pub mod demo;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{LaserSettings, SettingsError};
pub use sim::{BentLaserId, LaserField, LaserId};

use glam::Vec2;

/// Laser configuration constants
pub mod consts {
    /// Opacity a beam must reach before it can damage (guards the transition frame)
    pub const FULL_OPACITY_THRESHOLD: f32 = 0.999;
    /// Opacity target for the half-on telegraph state
    pub const HALF_OPACITY: f32 = 0.5;

    /// Frames used by `kill()` to retract a beam
    pub const KILL_FRAMES: u32 = 30;
    /// Default expand duration when none is given
    pub const DEFAULT_ACTIVATION_FRAMES: u32 = 30;

    /// Color palette range (rows in the laser atlas)
    pub const MIN_COLOR_INDEX: u8 = 1;
    pub const MAX_COLOR_INDEX: u8 = 16;

    /// Upper bound on bent laser trail samples (fixed ring storage)
    pub const MAX_TRAIL_SAMPLES: usize = 64;
    /// Lower bound on bent laser trail samples (one segment)
    pub const MIN_TRAIL_SAMPLES: usize = 2;

    /// Segments shorter than this (squared) are tested as points
    pub const DEGENERATE_SEGMENT_EPSILON: f32 = 1e-6;

    /// Default pool capacities
    pub const DEFAULT_MAX_LASERS: usize = 100;
    pub const DEFAULT_MAX_BENT_LASERS: usize = 50;
}

/// Clamp a palette color index into the atlas range
#[inline]
pub fn clamp_color_index(color_index: i32) -> u8 {
    color_index.clamp(
        consts::MIN_COLOR_INDEX as i32,
        consts::MAX_COLOR_INDEX as i32,
    ) as u8
}

/// Unit direction vector for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_color_index() {
        assert_eq!(clamp_color_index(0), 1);
        assert_eq!(clamp_color_index(-4), 1);
        assert_eq!(clamp_color_index(9), 9);
        assert_eq!(clamp_color_index(40), 16);
    }

    #[test]
    fn test_direction() {
        let d = direction(std::f32::consts::FRAC_PI_2);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
    }
}
