//! Fixed-capacity beam pools
//!
//! Beams live in a slot map so handles held by scripts carry a generation.
//! Once a beam is swept out, its old handle stops resolving even after the
//! slot is reused by a new beam.

use glam::Vec2;
use slotmap::{Key, SlotMap, new_key_type};

use super::bent::BentLaser;
use super::fade::FadeAnimator;
use super::laser::Laser;

new_key_type! {
    /// Handle to a straight laser
    pub struct LaserId;
    /// Handle to a bent laser
    pub struct BentLaserId;
}

/// Common surface the pool needs from a beam kind
pub trait Beam {
    fn fade(&self) -> &FadeAnimator;

    /// Advance one frame
    fn update(&mut self);

    fn turn_off(&mut self, frames: u32);

    fn kill(&mut self);

    fn check_collision(&self, point: Vec2, radius: f32) -> bool;

    #[inline]
    fn is_alive(&self) -> bool {
        self.fade().is_alive()
    }
}

impl Beam for Laser {
    fn fade(&self) -> &FadeAnimator {
        Laser::fade(self)
    }

    fn update(&mut self) {
        Laser::update(self);
    }

    fn turn_off(&mut self, frames: u32) {
        Laser::turn_off(self, frames);
    }

    fn kill(&mut self) {
        Laser::kill(self);
    }

    fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        Laser::check_collision(self, point, radius)
    }
}

impl Beam for BentLaser {
    fn fade(&self) -> &FadeAnimator {
        BentLaser::fade(self)
    }

    fn update(&mut self) {
        BentLaser::update(self);
    }

    fn turn_off(&mut self, frames: u32) {
        BentLaser::turn_off(self, frames);
    }

    fn kill(&mut self) {
        BentLaser::kill(self);
    }

    fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        BentLaser::check_collision(self, point, radius)
    }
}

/// Owner of up to `capacity` beams of one kind
#[derive(Debug, Clone)]
pub struct BeamPool<K: Key, B> {
    beams: SlotMap<K, B>,
    capacity: usize,
}

/// Pool of straight lasers
pub type LaserPool = BeamPool<LaserId, Laser>;
/// Pool of bent lasers
pub type BentLaserPool = BeamPool<BentLaserId, BentLaser>;

impl<K: Key, B: Beam> BeamPool<K, B> {
    /// Create a pool; all slots are reserved up front
    pub fn new(capacity: usize) -> Self {
        Self {
            beams: SlotMap::with_capacity_and_key(capacity),
            capacity,
        }
    }

    /// Take ownership of a beam
    ///
    /// When full, dead beams are swept first. Returns `None` if the pool is
    /// still full afterwards; the caller decides whether to drop the spawn.
    pub fn insert(&mut self, beam: B) -> Option<K> {
        if self.beams.len() >= self.capacity {
            self.compact();
            if self.beams.len() >= self.capacity {
                log::debug!("Beam pool exhausted ({} live)", self.beams.len());
                return None;
            }
        }
        Some(self.beams.insert(beam))
    }

    /// Advance every beam one frame, then sweep the dead ones
    pub fn update(&mut self) -> usize {
        for beam in self.beams.values_mut() {
            beam.update();
        }
        self.compact()
    }

    /// Remove dead beams, returning how many were dropped
    pub fn compact(&mut self) -> usize {
        let before = self.beams.len();
        self.beams.retain(|_, beam| beam.is_alive());
        before - self.beams.len()
    }

    /// Drop everything immediately, skipping the retract animation
    pub fn clear(&mut self) {
        self.beams.clear();
    }

    pub fn get(&self, id: K) -> Option<&B> {
        self.beams.get(id)
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut B> {
        self.beams.get_mut(id)
    }

    pub fn contains(&self, id: K) -> bool {
        self.beams.contains_key(id)
    }

    /// Retract a beam with the default duration. `false` for stale handles.
    pub fn kill(&mut self, id: K) -> bool {
        match self.beams.get_mut(id) {
            Some(beam) => {
                beam.kill();
                true
            }
            None => false,
        }
    }

    /// Retract a beam over `frames`. `false` for stale handles.
    pub fn turn_off(&mut self, id: K, frames: u32) -> bool {
        match self.beams.get_mut(id) {
            Some(beam) => {
                beam.turn_off(frames);
                true
            }
            None => false,
        }
    }

    /// Whether any beam in the pool hits the circle
    pub fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        self.beams
            .values()
            .any(|beam| beam.check_collision(point, radius))
    }

    /// Handle of the first beam that hits the circle
    pub fn first_hit(&self, point: Vec2, radius: f32) -> Option<K> {
        self.beams
            .iter()
            .find(|(_, beam)| beam.check_collision(point, radius))
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &B)> {
        self.beams.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.beams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.beams.len() >= self.capacity
    }
}

impl<K: Key> BeamPool<K, BentLaser> {
    /// Move a bent laser's head. `false` for stale handles.
    pub fn update_head(&mut self, id: K, pos: Vec2) -> bool {
        match self.beams.get_mut(id) {
            Some(laser) => {
                laser.update_head(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bent::BentLaserSpec;
    use crate::sim::fade::BeamPhase;
    use crate::sim::laser::LaserSpec;

    fn beam() -> Laser {
        let mut laser = Laser::new(&LaserSpec {
            l2: 50.0,
            width: 10.0,
            ..Default::default()
        });
        laser.turn_on(1);
        laser
    }

    #[test]
    fn test_full_pool_rejects() {
        let mut pool = LaserPool::new(2);
        assert!(pool.insert(beam()).is_some());
        assert!(pool.insert(beam()).is_some());
        assert!(pool.is_full());
        assert!(pool.insert(beam()).is_none());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_insert_reclaims_dead_slots() {
        let mut pool = LaserPool::new(2);
        let a = pool.insert(beam()).unwrap();
        pool.insert(beam()).unwrap();

        pool.turn_off(a, 1);
        pool.update();
        assert_eq!(pool.len(), 1);
        assert!(pool.insert(beam()).is_some());
    }

    #[test]
    fn test_insert_sweeps_before_giving_up() {
        let mut pool = LaserPool::new(1);
        let a = pool.insert(beam()).unwrap();
        // Kill without a pool update: the dead beam is still stored
        pool.get_mut(a).unwrap().turn_off(1);
        pool.get_mut(a).unwrap().update();
        assert_eq!(pool.len(), 1);
        assert!(pool.insert(beam()).is_some());
    }

    #[test]
    fn test_stale_handle_is_inert() {
        let mut pool = LaserPool::new(1);
        let old = pool.insert(beam()).unwrap();
        pool.turn_off(old, 1);
        pool.update();

        // Same slot, new generation
        let new = pool.insert(beam()).unwrap();
        assert_ne!(old, new);
        assert!(pool.get(old).is_none());
        assert!(!pool.contains(old));
        assert!(!pool.kill(old));
        assert!(!pool.turn_off(old, 5));
        assert_eq!(pool.get(new).unwrap().phase(), BeamPhase::Expanding);
    }

    #[test]
    fn test_update_returns_swept_count() {
        let mut pool = LaserPool::new(4);
        let ids: Vec<_> = (0..3).map(|_| pool.insert(beam()).unwrap()).collect();
        pool.kill(ids[0]);
        pool.kill(ids[2]);

        let mut swept = 0;
        for _ in 0..crate::consts::KILL_FRAMES {
            swept += pool.update();
        }
        assert_eq!(swept, 2);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(ids[1]));
    }

    #[test]
    fn test_first_hit_and_aggregate() {
        let mut pool = LaserPool::new(4);
        let id = pool.insert(beam()).unwrap();
        pool.update();

        assert!(pool.check_collision(Vec2::new(25.0, 0.0), 1.0));
        assert_eq!(pool.first_hit(Vec2::new(25.0, 0.0), 1.0), Some(id));
        assert_eq!(pool.first_hit(Vec2::new(25.0, 40.0), 1.0), None);
    }

    #[test]
    fn test_clear_skips_animation() {
        let mut pool = LaserPool::new(4);
        let id = pool.insert(beam()).unwrap();
        pool.clear();
        assert!(pool.is_empty());
        assert!(pool.get(id).is_none());
    }

    #[test]
    fn test_bent_update_head_by_handle() {
        let mut pool = BentLaserPool::new(1);
        let id = pool
            .insert(BentLaser::new(&BentLaserSpec {
                sample_rate: 1,
                ..Default::default()
            }))
            .unwrap();
        assert!(pool.update_head(id, Vec2::new(3.0, 4.0)));
        assert_eq!(pool.get(id).unwrap().head(), Vec2::new(3.0, 4.0));

        pool.clear();
        assert!(!pool.update_head(id, Vec2::ZERO));
    }

    #[test]
    fn test_zero_capacity_never_spawns() {
        let mut pool = LaserPool::new(0);
        assert!(pool.insert(beam()).is_none());
    }
}
