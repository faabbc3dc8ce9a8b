//! Straight three-segment lasers
//!
//! A straight laser is drawn as head / body / tail strips laid end to end
//! from its origin. The head and tail taper to a point, the body keeps the
//! full current width.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::straight_hit;
use super::fade::{BeamPhase, FadeAnimator};
use crate::clamp_color_index;
use crate::renderer::TextureKey;

/// Spawn parameters for a straight laser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSpec {
    pub x: f32,
    pub y: f32,
    /// Direction in degrees
    pub angle_degrees: f32,
    /// Head (tapered) length
    pub l1: f32,
    /// Body (constant width) length
    pub l2: f32,
    /// Tail (tapered) length
    pub l3: f32,
    /// Full width once expanded
    pub width: f32,
    pub texture_id: u32,
    /// Palette row, clamped to 1..=16
    pub color_index: i32,
    /// Frames to expand after spawning; `None` uses the field's default
    pub activation_frames: Option<u32>,
    /// Origin decoration size (0 = hidden)
    pub node: f32,
    /// Tip decoration size (0 = hidden)
    pub head_node: f32,
}

impl Default for LaserSpec {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            angle_degrees: 0.0,
            l1: 0.0,
            l2: 0.0,
            l3: 0.0,
            width: 0.0,
            texture_id: 1,
            color_index: 1,
            activation_frames: None,
            node: 0.0,
            head_node: 0.0,
        }
    }
}

/// A straight laser beam
#[derive(Debug, Clone)]
pub struct Laser {
    /// Beam start point
    pub origin: Vec2,
    /// Direction (radians)
    pub angle: f32,
    l1: f32,
    l2: f32,
    l3: f32,
    texture_id: u32,
    color_index: u8,
    pub node: f32,
    pub head_node: f32,
    fade: FadeAnimator,
}

impl Laser {
    /// Build an inactive laser (phase `Off`); pools turn it on right away
    pub fn new(spec: &LaserSpec) -> Self {
        Self {
            origin: Vec2::new(spec.x, spec.y),
            angle: spec.angle_degrees.to_radians(),
            l1: spec.l1.max(0.0),
            l2: spec.l2.max(0.0),
            l3: spec.l3.max(0.0),
            texture_id: spec.texture_id,
            color_index: clamp_color_index(spec.color_index),
            node: spec.node,
            head_node: spec.head_node,
            fade: FadeAnimator::new(spec.width),
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

    /// Whether a circle at `point` overlaps the beam this frame
    pub fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        if !self.fade.is_hot() {
            return false;
        }

        straight_hit(
            point,
            radius,
            self.origin,
            self.angle,
            self.l1,
            self.l2,
            self.l3,
            self.fade.width(),
        )
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn set_angle_degrees(&mut self, degrees: f32) {
        self.angle = degrees.to_radians();
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    /// Segment lengths (head, body, tail)
    pub fn lengths(&self) -> (f32, f32, f32) {
        (self.l1, self.l2, self.l3)
    }

    pub fn set_lengths(&mut self, l1: f32, l2: f32, l3: f32) {
        self.l1 = l1.max(0.0);
        self.l2 = l2.max(0.0);
        self.l3 = l3.max(0.0);
    }

    #[inline]
    pub fn total_length(&self) -> f32 {
        self.l1 + self.l2 + self.l3
    }

    /// Far end of the tail
    pub fn tip(&self) -> Vec2 {
        self.origin + crate::direction(self.angle) * self.total_length()
    }

    /// Swap the atlas image, optionally recoloring
    pub fn change_image(&mut self, texture_id: u32, color_index: Option<i32>) {
        self.texture_id = texture_id;
        if let Some(color) = color_index {
            self.color_index = clamp_color_index(color);
        }
    }

    pub fn texture_key(&self) -> TextureKey {
        TextureKey {
            texture_id: self.texture_id,
            color_index: self.color_index,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_laser() -> Laser {
        let mut laser = Laser::new(&LaserSpec {
            l1: 10.0,
            l2: 20.0,
            l3: 10.0,
            width: 10.0,
            activation_frames: Some(1),
            ..Default::default()
        });
        laser.turn_on(1);
        laser
    }

    #[test]
    fn test_reference_scenario() {
        let mut laser = reference_laser();
        assert_eq!(laser.phase(), BeamPhase::Expanding);
        laser.update();
        assert_eq!(laser.phase(), BeamPhase::Steady);

        assert!(laser.check_collision(Vec2::new(15.0, 0.0), 0.0));
        assert!(!laser.check_collision(Vec2::new(45.0, 0.0), 0.0));
        // Head taper half-width at x = 5 is 2.5
        assert!(laser.check_collision(Vec2::new(5.0, 2.0), 0.0));
        assert!(!laser.check_collision(Vec2::new(5.0, 4.0), 0.0));
        assert!(!laser.check_collision(Vec2::new(5.0, 6.0), 0.0));
    }

    #[test]
    fn test_no_damage_while_expanding() {
        let mut laser = Laser::new(&LaserSpec {
            l2: 100.0,
            width: 20.0,
            ..Default::default()
        });
        laser.turn_on(10);
        for _ in 0..9 {
            laser.update();
            assert!(!laser.check_collision(Vec2::new(50.0, 0.0), 2.0));
        }
        laser.update();
        assert!(laser.check_collision(Vec2::new(50.0, 0.0), 2.0));
    }

    #[test]
    fn test_turn_off_stops_damage_immediately() {
        let mut laser = reference_laser();
        laser.update();
        assert!(laser.check_collision(Vec2::new(15.0, 0.0), 0.0));

        laser.turn_off(10);
        assert!(!laser.check_collision(Vec2::new(15.0, 0.0), 0.0));
        laser.update();
        assert!(laser.fade().width() > 0.0);
        assert!(!laser.check_collision(Vec2::new(15.0, 0.0), 0.0));
    }

    #[test]
    fn test_spec_clamping() {
        let laser = Laser::new(&LaserSpec {
            l1: -5.0,
            l2: 10.0,
            width: -3.0,
            color_index: 99,
            ..Default::default()
        });
        assert_eq!(laser.lengths(), (0.0, 10.0, 0.0));
        assert_eq!(laser.fade().max_width(), 0.0);
        assert_eq!(laser.color_index(), 16);
    }

    #[test]
    fn test_angle_is_degrees_at_the_boundary() {
        let laser = Laser::new(&LaserSpec {
            x: 10.0,
            y: 10.0,
            angle_degrees: 90.0,
            l2: 50.0,
            ..Default::default()
        });
        let tip = laser.tip();
        assert!((tip.x - 10.0).abs() < 1e-4);
        assert!((tip.y - 60.0).abs() < 1e-4);
        assert!((laser.angle_degrees() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_moving_beam_tracks_new_geometry() {
        let mut laser = reference_laser();
        laser.update();
        laser.set_origin(Vec2::new(100.0, 0.0));
        assert!(!laser.check_collision(Vec2::new(15.0, 0.0), 0.0));
        assert!(laser.check_collision(Vec2::new(115.0, 0.0), 0.0));

        laser.set_angle_degrees(180.0);
        assert!(laser.check_collision(Vec2::new(85.0, 0.0), 0.0));
    }

    #[test]
    fn test_change_image() {
        let mut laser = reference_laser();
        laser.change_image(3, None);
        assert_eq!(laser.texture_key(), TextureKey { texture_id: 3, color_index: 1 });
        laser.change_image(4, Some(0));
        assert_eq!(laser.texture_key(), TextureKey { texture_id: 4, color_index: 1 });
        laser.change_image(4, Some(12));
        assert_eq!(laser.color_index(), 12);
    }
}
