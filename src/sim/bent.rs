//! Bent (curved) lasers
//!
//! A bent laser follows its source: scripts move the head every frame and the
//! beam body is the polyline of recent head positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::bent_hit;
use super::fade::{BeamPhase, FadeAnimator};
use super::trail::TrailRing;
use crate::clamp_color_index;
use crate::consts::{MAX_TRAIL_SAMPLES, MIN_TRAIL_SAMPLES};

/// Spawn parameters for a bent laser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BentLaserSpec {
    pub x: f32,
    pub y: f32,
    /// Number of trail samples kept (clamped to 2..=64)
    pub trail_length: usize,
    pub width: f32,
    pub color_index: i32,
    /// Record a trail sample every this many head updates
    pub sample_rate: u32,
    /// Frames to expand after spawning; `None` uses the field's default
    pub activation_frames: Option<u32>,
}

impl Default for BentLaserSpec {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            trail_length: 32,
            width: 0.0,
            color_index: 1,
            sample_rate: 4,
            activation_frames: None,
        }
    }
}

/// A curved laser that trails behind a moving head
#[derive(Debug, Clone)]
pub struct BentLaser {
    head: Vec2,
    trail: TrailRing<MAX_TRAIL_SAMPLES>,
    sample_rate: u32,
    head_updates: u32,
    color_index: u8,
    fade: FadeAnimator,
}

impl BentLaser {
    pub fn new(spec: &BentLaserSpec) -> Self {
        let capacity = spec.trail_length.clamp(MIN_TRAIL_SAMPLES, MAX_TRAIL_SAMPLES);
        Self {
            head: Vec2::new(spec.x, spec.y),
            trail: TrailRing::new(capacity),
            sample_rate: spec.sample_rate.max(1),
            head_updates: 0,
            color_index: clamp_color_index(spec.color_index),
            fade: FadeAnimator::new(spec.width),
        }
    }

    /// Move the head; every `sample_rate` calls the position joins the trail
    ///
    /// Runs in every phase so the trail keeps building while fading.
    pub fn update_head(&mut self, pos: Vec2) {
        self.head = pos;
        self.head_updates = self.head_updates.wrapping_add(1);
        if self.head_updates % self.sample_rate == 0 {
            self.trail.push(pos);
        }
    }

    pub fn turn_on(&mut self, frames: u32) {
        self.fade.turn_on(frames);
    }

    pub fn turn_half_on(&mut self, frames: u32) {
        self.fade.turn_half_on(frames);
    }

    pub fn turn_off(&mut self, frames: u32) {
        self.fade.turn_off(frames);
    }

    pub fn kill(&mut self) {
        self.fade.kill();
    }

    pub fn update(&mut self) {
        self.fade.update();
    }

    /// Whether a circle at `point` overlaps the trail this frame
    pub fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        if self.trail.len() < 2 || !self.fade.is_hot() {
            return false;
        }

        let width = self.fade.width();
        let (older, newer) = self.trail.as_slices();
        if bent_hit(point, radius, older, width) || bent_hit(point, radius, newer, width) {
            return true;
        }

        // Segment bridging the wrap point of the ring
        match (older.last(), newer.first()) {
            (Some(&a), Some(&b)) => bent_hit(point, radius, &[a, b], width),
            _ => false,
        }
    }

    #[inline]
    pub fn head(&self) -> Vec2 {
        self.head
    }

    #[inline]
    pub fn trail(&self) -> &TrailRing<MAX_TRAIL_SAMPLES> {
        &self.trail
    }

    /// Samples currently in the trail
    #[inline]
    pub fn valid_samples(&self) -> usize {
        self.trail.len()
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn color_index(&self) -> u8 {
        self.color_index
    }

    #[inline]
    pub fn fade(&self) -> &FadeAnimator {
        &self.fade
    }

    #[inline]
    pub fn phase(&self) -> BeamPhase {
        self.fade.phase()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.fade.is_alive()
    }
}
