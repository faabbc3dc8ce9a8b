//! All lasers on screen: one pool per beam kind
//!
//! Game logic spawns through the field, the game loop steps it once per
//! frame, and the renderer and collision pass read it afterwards.

use glam::Vec2;

use super::bent::{BentLaser, BentLaserSpec};
use super::laser::{Laser, LaserSpec};
use super::pool::{BentLaserId, BentLaserPool, LaserId, LaserPool};
use crate::consts::DEFAULT_ACTIVATION_FRAMES;
use crate::renderer::{BeamRecord, BentLaserRecord, LaserRecord};
use crate::settings::LaserSettings;

/// Which beam hit the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserHit {
    Straight(LaserId),
    Bent(BentLaserId),
}

/// Counts from one `LaserField::update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Straight lasers swept this frame
    pub lasers_removed: usize,
    /// Bent lasers swept this frame
    pub bent_removed: usize,
}

/// Owner of every straight and bent laser
#[derive(Debug, Clone)]
pub struct LaserField {
    lasers: LaserPool,
    bent_lasers: BentLaserPool,
    /// Expand duration for spawns that leave it unset
    default_activation_frames: u32,
}

impl LaserField {
    pub fn new(settings: &LaserSettings) -> Self {
        Self {
            default_activation_frames: settings.default_activation_frames,
            ..Self::with_capacity(settings.max_lasers, settings.max_bent_lasers)
        }
    }

    pub fn with_capacity(max_lasers: usize, max_bent_lasers: usize) -> Self {
        Self {
            lasers: LaserPool::new(max_lasers),
            bent_lasers: BentLaserPool::new(max_bent_lasers),
            default_activation_frames: DEFAULT_ACTIVATION_FRAMES,
        }
    }

    /// Spawn a straight laser, already expanding. `None` when the pool is full.
    pub fn create_laser(&mut self, spec: &LaserSpec) -> Option<LaserId> {
        let mut laser = Laser::new(spec);
        laser.turn_on(spec.activation_frames.unwrap_or(self.default_activation_frames));
        self.lasers.insert(laser)
    }

    /// Spawn a bent laser, already expanding. `None` when the pool is full.
    pub fn create_bent_laser(&mut self, spec: &BentLaserSpec) -> Option<BentLaserId> {
        let mut laser = BentLaser::new(spec);
        laser.turn_on(spec.activation_frames.unwrap_or(self.default_activation_frames));
        self.bent_lasers.insert(laser)
    }

    /// Step every beam one frame and sweep the dead ones
    pub fn update(&mut self) -> UpdateStats {
        UpdateStats {
            lasers_removed: self.lasers.update(),
            bent_removed: self.bent_lasers.update(),
        }
    }

    /// Whether any beam hits the circle
    pub fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        self.lasers.check_collision(point, radius) || self.bent_lasers.check_collision(point, radius)
    }

    /// The first beam that hits the circle, straight lasers first
    pub fn first_hit(&self, point: Vec2, radius: f32) -> Option<LaserHit> {
        self.lasers
            .first_hit(point, radius)
            .map(LaserHit::Straight)
            .or_else(|| self.bent_lasers.first_hit(point, radius).map(LaserHit::Bent))
    }

    /// Drop every beam without the retract animation (stage teardown)
    pub fn clear(&mut self) {
        log::info!(
            "Clearing lasers: {} straight, {} bent",
            self.lasers.len(),
            self.bent_lasers.len()
        );
        self.lasers.clear();
        self.bent_lasers.clear();
    }

    /// Read-only view for rendering and collision
    pub fn query(&self) -> Query<'_> {
        Query { field: self }
    }

    pub fn lasers(&self) -> &LaserPool {
        &self.lasers
    }

    pub fn lasers_mut(&mut self) -> &mut LaserPool {
        &mut self.lasers
    }

    pub fn bent_lasers(&self) -> &BentLaserPool {
        &self.bent_lasers
    }

    pub fn bent_lasers_mut(&mut self) -> &mut BentLaserPool {
        &mut self.bent_lasers
    }

    pub fn default_activation_frames(&self) -> u32 {
        self.default_activation_frames
    }

    #[inline]
    pub fn laser_count(&self) -> usize {
        self.lasers.len()
    }

    #[inline]
    pub fn bent_laser_count(&self) -> usize {
        self.bent_lasers.len()
    }
}

/// Visible beams, split by kind
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    field: &'a LaserField,
}

impl<'a> Query<'a> {
    pub fn lasers(self) -> impl Iterator<Item = LaserRecord> + 'a {
        self.field
            .lasers
            .iter()
            .filter_map(|(id, laser)| LaserRecord::from_laser(id, laser))
    }

    pub fn bent_lasers(self) -> impl Iterator<Item = BentLaserRecord<'a>> + 'a {
        self.field
            .bent_lasers
            .iter()
            .filter_map(|(id, laser)| BentLaserRecord::from_laser(id, laser))
    }

    /// Both kinds, straight lasers first
    pub fn iter(self) -> impl Iterator<Item = BeamRecord<'a>> + 'a {
        self.lasers()
            .map(BeamRecord::Straight)
            .chain(self.bent_lasers().map(BeamRecord::Bent))
    }
}
