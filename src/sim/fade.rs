//! Fade/width lifecycle shared by straight and bent lasers
//!
//! A beam fades in to full width, holds, then fades out and dies. Every
//! transition is a linear interpolation over a fixed number of frames,
//! starting from whatever the current values are.

use serde::{Deserialize, Serialize};

use crate::consts::{FULL_OPACITY_THRESHOLD, HALF_OPACITY, KILL_FRAMES};

/// Current stage of a beam's fade lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BeamPhase {
    /// Spawned but never activated
    #[default]
    Off,
    /// Growing toward its target width/opacity
    Expanding,
    /// Settled at its target
    Steady,
    /// Retracting toward zero width
    Shrinking,
    /// Finished retracting, waiting for the pool to sweep it
    Dead,
}

/// Width/opacity animator with the phase machine on top
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FadeAnimator {
    phase: BeamPhase,
    max_width: f32,
    width: f32,
    opacity: f32,
    target_width: f32,
    target_opacity: f32,
    /// Frames left in the current interpolation
    counter: u32,
    d_width: f32,
    d_opacity: f32,
    alive: bool,
    visible: bool,
    collidable: bool,
    /// Frames since spawn
    age: u32,
}

impl FadeAnimator {
    pub fn new(max_width: f32) -> Self {
        Self {
            phase: BeamPhase::Off,
            max_width: max_width.max(0.0),
            width: 0.0,
            opacity: 0.0,
            target_width: 0.0,
            target_opacity: 0.0,
            counter: 0,
            d_width: 0.0,
            d_opacity: 0.0,
            alive: true,
            visible: true,
            collidable: false,
            age: 0,
        }
    }

    /// Fade in to full width and opacity over `frames`
    ///
    /// Interpolates from the current values, so re-triggering mid-fade
    /// continues smoothly instead of snapping back to zero.
    pub fn turn_on(&mut self, frames: u32) {
        self.retarget(BeamPhase::Expanding, self.max_width, 1.0, frames);
    }

    /// Fade to half width and half opacity (warning telegraph)
    pub fn turn_half_on(&mut self, frames: u32) {
        self.retarget(
            BeamPhase::Expanding,
            self.max_width * 0.5,
            HALF_OPACITY,
            frames,
        );
    }

    /// Fade out over `frames`. Damage stops immediately.
    pub fn turn_off(&mut self, frames: u32) {
        self.retarget(BeamPhase::Shrinking, 0.0, 0.0, frames);
    }

    /// Forced despawn with the default retract duration
    pub fn kill(&mut self) {
        self.turn_off(KILL_FRAMES);
    }

    fn retarget(&mut self, phase: BeamPhase, target_width: f32, target_opacity: f32, frames: u32) {
        if !self.alive {
            return;
        }

        let frames = frames.max(1);
        self.phase = phase;
        self.counter = frames;
        self.target_width = target_width;
        self.target_opacity = target_opacity;
        self.d_width = (target_width - self.width) / frames as f32;
        self.d_opacity = (target_opacity - self.opacity) / frames as f32;
        // Only a settled full-opacity beam may damage
        self.collidable = false;
    }

    /// Advance one frame
    pub fn update(&mut self) {
        if !self.alive {
            return;
        }

        self.age = self.age.saturating_add(1);

        if self.counter == 0 {
            return;
        }

        self.counter -= 1;
        self.width = (self.width + self.d_width).clamp(0.0, self.max_width);
        self.opacity = (self.opacity + self.d_opacity).clamp(0.0, 1.0);

        if self.counter == 0 {
            self.finish();
        }
    }

    fn finish(&mut self) {
        match self.phase {
            BeamPhase::Expanding => {
                // Snap to the exact target so accumulated deltas leave no drift
                self.width = self.target_width;
                self.opacity = self.target_opacity;
                self.phase = BeamPhase::Steady;
                self.collidable = self.opacity >= FULL_OPACITY_THRESHOLD;
            }
            BeamPhase::Shrinking => {
                self.width = 0.0;
                self.opacity = 0.0;
                self.phase = BeamPhase::Dead;
                self.alive = false;
                self.visible = false;
            }
            BeamPhase::Off | BeamPhase::Steady | BeamPhase::Dead => {}
        }
    }

    /// Whether the beam currently deals damage
    #[inline]
    pub fn is_hot(&self) -> bool {
        self.collidable
            && self.phase == BeamPhase::Steady
            && self.opacity >= FULL_OPACITY_THRESHOLD
    }

    #[inline]
    pub fn phase(&self) -> BeamPhase {
        self.phase
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_collidable(&self) -> bool {
        self.collidable
    }

    /// Frames left in the current fade
    #[inline]
    pub fn remaining_frames(&self) -> u32 {
        self.counter
    }

    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }
}
